//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in systems and in the
//! `barrage-ai` crate, not here.

use serde::{Deserialize, Serialize};

use crate::enums::ProjectileOwner;

/// Hit points. `max` is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

/// What killing an enemy is worth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub score: u32,
    /// Probability in [0, 1] of a loot drop on death.
    pub drop_chance: f32,
}

/// Factory tag the enemy was created from (e.g. "zigzag", "boss_level_2").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTag(pub String);

/// Marks an entity as a boss and records which level it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossMarker {
    pub level: u32,
    /// y at which the entry descent stops.
    pub hover_y: f32,
}

/// A live projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: ProjectileOwner,
    pub damage: f32,
}

impl Health {
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// current / max, in [0, 1].
    pub fn ratio(&self) -> f32 {
        (self.current / self.max).clamp(0.0, 1.0)
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}
