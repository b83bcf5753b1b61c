//! Events and intents emitted by the director for external collaborators.
//!
//! The HUD, score tracker, audio, and level manager consume
//! [`EncounterEvent`]s; the bonus subsystem consumes [`LootIntent`]s.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::BonusKind;

/// Named notifications published during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EncounterEvent {
    /// The active boss switched phase.
    PhaseChanged { phase: u32 },
    /// The boss of `level` was killed.
    BossDefeated { level: u32 },
    /// Any enemy (boss included) was killed.
    EnemyKilled { score: u32, position: Vec2 },
    /// The level's boss entered play.
    BossSpawned { level: u32, boss_type: String },
    /// The level's run finished.
    LevelComplete { level: u32 },
    /// An enemy projectile hit the player.
    PlayerHit { damage: f32 },
}

/// Publish interface for encounter events.
pub trait EventSink {
    fn publish(&mut self, event: EncounterEvent);
}

impl EventSink for Vec<EncounterEvent> {
    fn publish(&mut self, event: EncounterEvent) {
        self.push(event);
    }
}

/// Request to create a projectile. Realized by the projectile registry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireIntent {
    pub origin: Vec2,
    pub velocity: Vec2,
}

/// Request to bring a new enemy into play at an absolute position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnIntent {
    pub enemy_type: String,
    pub position: Vec2,
}

/// Request to drop a collectible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LootIntent {
    pub position: Vec2,
    pub bonus: BonusKind,
}

/// Bonus/loot spawn interface. The collectible lives outside this core.
pub trait LootSink {
    fn spawn_bonus(&mut self, position: Vec2, bonus: BonusKind);
}

impl LootSink for Vec<LootIntent> {
    fn spawn_bonus(&mut self, position: Vec2, bonus: BonusKind) {
        self.push(LootIntent { position, bonus });
    }
}
