//! Player-side interfaces.
//!
//! The player's own movement, input, and health bookkeeping are owned by an
//! external subsystem. The director only reads the player's position and
//! bounds and reports damage through [`PlayerState::apply_damage`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::types::Aabb;

/// Read access to the player plus the damage hook.
pub trait PlayerState {
    fn position(&self) -> Vec2;
    fn bounds(&self) -> Aabb;
    fn apply_damage(&mut self, amount: f32);
}

/// A player bullet in flight this tick, tested against enemies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerShot {
    pub bounds: Aabb,
    pub damage: f32,
}

/// Minimal player used by headless hosts and tests: fixed box, damage tally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticPlayer {
    pub position: Vec2,
    pub size: Vec2,
    pub damage_taken: f32,
    pub hits: u32,
}

impl StaticPlayer {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            damage_taken: 0.0,
            hits: 0,
        }
    }
}

impl PlayerState for StaticPlayer {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.size)
    }

    fn apply_damage(&mut self, amount: f32) {
        self.damage_taken += amount;
        self.hits += 1;
    }
}
