//! Archetype-specific enemy profiles.
//!
//! Consolidates per-archetype stats for the enemy factory.

use barrage_core::constants::*;
use barrage_core::enums::EnemyKind;

/// Regular (non-boss) enemy archetypes known to the standard factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyArchetype {
    /// Basic straight-down minion.
    Minion,
    /// Swaying minion.
    Zigzag,
    /// Player-seeking diver.
    Kamikaze,
    /// Gunner that fires aimed shots.
    Shooter,
}

/// Stats for an archetype.
pub struct EnemyProfile {
    pub kind: EnemyKind,
    pub max_health: f32,
    pub score: u32,
    pub drop_chance: f32,
    /// Descent speed (px/s); the homing entry speed for kamikazes.
    pub speed: f32,
}

impl EnemyArchetype {
    pub const ALL: [EnemyArchetype; 4] = [
        EnemyArchetype::Minion,
        EnemyArchetype::Zigzag,
        EnemyArchetype::Kamikaze,
        EnemyArchetype::Shooter,
    ];

    /// Level-script tag for this archetype.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Minion => "minion1",
            Self::Zigzag => "zigzag",
            Self::Kamikaze => "kamikaze",
            Self::Shooter => "shooter",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.tag() == tag)
    }
}

/// Get the profile for a given archetype.
pub fn get_profile(archetype: EnemyArchetype) -> EnemyProfile {
    match archetype {
        EnemyArchetype::Minion => EnemyProfile {
            kind: EnemyKind::Straight,
            max_health: 15.0,
            score: 50,
            drop_chance: ENEMY_DROP_CHANCE,
            speed: STRAIGHT_SPEED,
        },
        EnemyArchetype::Zigzag => EnemyProfile {
            kind: EnemyKind::Zigzag,
            max_health: 25.0,
            score: 80,
            drop_chance: ENEMY_DROP_CHANCE,
            speed: ZIGZAG_SPEED,
        },
        EnemyArchetype::Kamikaze => EnemyProfile {
            kind: EnemyKind::Homing,
            max_health: 40.0,
            score: 150,
            drop_chance: ENEMY_DROP_CHANCE,
            speed: HOMING_ENTRY_SPEED,
        },
        EnemyArchetype::Shooter => EnemyProfile {
            kind: EnemyKind::Shooter,
            max_health: 30.0,
            score: 120,
            drop_chance: ENEMY_DROP_CHANCE,
            speed: SHOOTER_SPEED,
        },
    }
}
