//! Director snapshot: the visible encounter state handed to the HUD each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::EncounterEvent;
use crate::types::SimTime;

/// Complete encounter state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectorSnapshot {
    pub time: SimTime,
    pub status: DirectorStatus,
    /// Identifier of the level being played (last level once the campaign is complete).
    pub level: u32,
    /// Seconds elapsed in the current level.
    pub level_elapsed_secs: f32,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub boss: Option<BossView>,
    pub events: Vec<EncounterEvent>,
}

/// A live enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub enemy_type: String,
    pub kind: EnemyKind,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
}

/// A live projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Vec2,
    pub velocity: Vec2,
    pub owner: ProjectileOwner,
}

/// Boss bar data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub level: u32,
    pub phase: u32,
    /// Health ratio in [0, 1].
    pub health_ratio: f32,
    pub position: Vec2,
}
