//! Configuration errors.
//!
//! Every error here is raised while building levels, patterns, or enemies,
//! never mid-tick.

use thiserror::Error;

/// Errors in a pattern's action list.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatternError {
    #[error("pattern has no actions")]
    EmptyActionList,

    #[error("action {index} has non-positive duration {duration}")]
    NonPositiveDuration { index: usize, duration: f32 },

    #[error("action {index} fires zero bullets")]
    ZeroBulletCount { index: usize },

    #[error("action {index} summons zero enemies")]
    ZeroSummonCount { index: usize },

    #[error("unknown action kind: {0}")]
    UnknownActionKind(String),

    #[error("malformed pattern: {0}")]
    Malformed(String),
}

/// Errors in a boss phase table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhaseError {
    #[error("phase table is empty")]
    NoPhases,

    #[error("first phase must have rank 1, got {0}")]
    FirstPhaseRank(u32),

    #[error("phase ranks must increase by one: {previous} followed by {next}")]
    RanksNotSequential { previous: u32, next: u32 },

    #[error("phase {rank} threshold {threshold} is not below the previous phase's")]
    ThresholdsNotDecreasing { rank: u32, threshold: f32 },

    #[error("phase {rank} threshold {threshold} is outside [0, 1]")]
    ThresholdOutOfRange { rank: u32, threshold: f32 },
}

/// Errors raised while loading levels or constructing enemies.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown enemy type: {0}")]
    UnknownEnemyType(String),

    #[error("unknown boss type: {0}")]
    UnknownBossType(String),

    #[error("invalid max health {0}: must be positive")]
    InvalidHealth(f32),

    #[error("invalid drop chance {0}: must be within [0, 1]")]
    InvalidDropChance(f32),

    #[error("spawn parameter {name} = {value} is not a finite number")]
    InvalidParameter { name: String, value: f32 },

    #[error("spawn x {0} is outside the normalized range [0, 1]")]
    InvalidSpawnPosition(f32),

    #[error("trigger time {0} is negative")]
    NegativeTriggerTime(f32),

    #[error("no level scripts supplied")]
    NoLevels,

    #[error("no built-in script for level {0}")]
    UnknownLevel(u32),

    #[error("invalid pattern")]
    Pattern(#[from] PatternError),

    #[error("invalid phase table")]
    Phase(#[from] PhaseError),
}
