//! Enumeration types used throughout the director.

use serde::{Deserialize, Serialize};

/// Behavior variant of an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Straight descent at fixed speed.
    Straight,
    /// Lateral sinusoidal sway while descending.
    Zigzag,
    /// Accelerates toward the player.
    Homing,
    /// Descends and fires aimed shots on a cooldown.
    Shooter,
    /// Phase-driven boss.
    Boss,
}

/// Side that fired a projectile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileOwner {
    #[default]
    Enemy,
    Player,
}

/// Collectible produced by a loot drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "level", rename_all = "snake_case")]
pub enum BonusKind {
    Score,
    Heal,
    ExtraLife,
    WeaponUp,
    CooldownReduction,
    /// Level-specific reward dropped by that level's boss.
    LevelReward(u32),
}

/// Generic drops, in roll order.
pub const GENERIC_BONUSES: [BonusKind; 5] = [
    BonusKind::Score,
    BonusKind::Heal,
    BonusKind::ExtraLife,
    BonusKind::WeaponUp,
    BonusKind::CooldownReduction,
];

/// Director-level status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectorStatus {
    /// A level is being played.
    #[default]
    Running,
    /// Every level script has been completed.
    CampaignComplete,
}
