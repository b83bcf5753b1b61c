//! Built-in boss definitions for levels 1 through 5.
//!
//! Phase 1 sweeps and snipes, phase 2 adds cone volleys, phase 3 rings the
//! screen and calls in minions. Higher levels shoot sooner and sweep wider.

use barrage_core::constants::*;
use barrage_core::error::ConfigError;

use crate::pattern::{Pattern, PatternAction};
use crate::phase::{BossPhase, PhaseTable};
use crate::profiles::EnemyArchetype;

/// Tag prefix for boss types: `boss_level_<n>`.
pub const BOSS_TAG_PREFIX: &str = "boss_level_";

/// Highest level with a preset.
pub const MAX_PRESET_LEVEL: u32 = 5;

/// Everything needed to build a boss.
#[derive(Debug, Clone)]
pub struct BossPreset {
    pub level: u32,
    pub max_health: f32,
    pub score: u32,
    pub drop_chance: f32,
    pub phases: PhaseTable,
}

/// Parse `boss_level_<n>` for a level with a preset.
pub fn parse_boss_tag(tag: &str) -> Option<u32> {
    let level: u32 = tag.strip_prefix(BOSS_TAG_PREFIX)?.parse().ok()?;
    (1..=MAX_PRESET_LEVEL).contains(&level).then_some(level)
}

/// Default boss hit points when the level script gives none.
pub fn default_boss_health(level: u32) -> f32 {
    50.0 * level as f32 + 50.0
}

/// Build the preset for `level`. `max_health` overrides the default pool.
pub fn boss_preset(level: u32, max_health: Option<f32>) -> Result<BossPreset, ConfigError> {
    let max_health = max_health.unwrap_or_else(|| default_boss_health(level));
    if !max_health.is_finite() || max_health <= 0.0 {
        return Err(ConfigError::InvalidHealth(max_health));
    }

    let phases = PhaseTable::new(vec![
        BossPhase::new(1, 1.0, phase_one(level)?),
        BossPhase::new(2, BOSS_PHASE2_THRESHOLD, phase_two(level)?),
        BossPhase::new(3, BOSS_PHASE3_THRESHOLD, phase_three(level)?),
    ])?;

    Ok(BossPreset {
        level,
        max_health,
        score: BOSS_REWARD_PER_LEVEL * level,
        drop_chance: 1.0,
        phases,
    })
}

/// Seconds between volleys in `phase`, shrinking with phase and level.
fn volley_interval(level: u32, phase: u32) -> f32 {
    (0.8 - (phase - 1) as f32 * 0.3 - level as f32 * 0.1).max(0.4)
}

/// Sweep width as a fraction of the half-playfield.
fn sweep_amplitude(level: u32) -> f32 {
    (0.6 + 0.05 * level as f32).min(0.85)
}

fn sweep(level: u32) -> PatternAction {
    PatternAction::MoveSine {
        duration: 2.0,
        amplitude: sweep_amplitude(level),
    }
}

fn phase_one(level: u32) -> Result<Pattern, ConfigError> {
    let shot = PatternAction::ShootSingle {
        duration: volley_interval(level, 1),
    };
    Ok(Pattern::new(
        vec![sweep(level), shot.clone(), shot.clone(), shot],
        true,
    )?)
}

fn phase_two(level: u32) -> Result<Pattern, ConfigError> {
    let cone = PatternAction::ShootCone {
        duration: volley_interval(level, 2),
        bullet_count: 3,
    };
    Ok(Pattern::new(
        vec![sweep(level), cone.clone(), cone.clone(), cone],
        true,
    )?)
}

fn phase_three(level: u32) -> Result<Pattern, ConfigError> {
    let ring = PatternAction::ShootCircle {
        duration: volley_interval(level, 3),
        bullet_count: 8,
    };
    Ok(Pattern::new(
        vec![
            sweep(level),
            ring.clone(),
            PatternAction::Summon {
                duration: 1.0,
                enemy_type: EnemyArchetype::Minion.tag().to_string(),
                count: 3,
            },
            ring,
        ],
        true,
    )?)
}
