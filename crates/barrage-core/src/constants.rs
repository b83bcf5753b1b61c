//! Director constants and tuning parameters.

use std::f32::consts::PI;

/// Nominal frame rate used by hosts and tests (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal frame rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Playfield ---

/// Default playfield width in pixels.
pub const PLAYFIELD_WIDTH: f32 = 800.0;

/// Default playfield height in pixels.
pub const PLAYFIELD_HEIGHT: f32 = 600.0;

/// y coordinate at which regular enemies spawn (just above the top edge).
pub const ENEMY_SPAWN_Y: f32 = -40.0;

// --- Sizes ---

/// Edge length of a regular enemy's bounding box.
pub const ENEMY_SIZE: f32 = 40.0;

/// Edge length of a boss's bounding box.
pub const BOSS_SIZE: f32 = 120.0;

/// Enemy projectile bounding box (narrow and tall).
pub const PROJECTILE_WIDTH: f32 = 10.0;
pub const PROJECTILE_HEIGHT: f32 = 20.0;

// --- Regular enemies ---

/// Straight minion descent speed (px/s).
pub const STRAIGHT_SPEED: f32 = 120.0;

/// Zigzag descent speed (px/s).
pub const ZIGZAG_SPEED: f32 = 90.0;

/// Default zigzag lateral amplitude (px).
pub const ZIGZAG_DEFAULT_AMPLITUDE: f32 = 40.0;

/// Zigzag angular frequency (rad/s).
pub const ZIGZAG_FREQUENCY: f32 = 3.0;

/// Homing acceleration toward the player (px/s²).
pub const HOMING_ACCEL: f32 = 150.0;

/// Homing speed cap (px/s).
pub const HOMING_MAX_SPEED: f32 = 220.0;

/// Initial descent speed of a homing enemy before it locks on (px/s).
pub const HOMING_ENTRY_SPEED: f32 = 60.0;

/// Shooter descent speed (px/s).
pub const SHOOTER_SPEED: f32 = 70.0;

/// Seconds between shooter volleys.
pub const SHOOTER_FIRE_RATE: f32 = 2.0;

/// Shooter projectile speed (px/s).
pub const SHOOTER_BULLET_SPEED: f32 = 200.0;

/// Loot probability for regular enemies.
pub const ENEMY_DROP_CHANCE: f32 = 0.3;

// --- Bosses ---

/// Boss spawn y (above the playfield).
pub const BOSS_SPAWN_Y: f32 = -200.0;

/// Fraction of the playfield height at which the boss stops descending.
pub const BOSS_HOVER_FRACTION: f32 = 0.25;

/// Boss entry descent speed (px/s).
pub const BOSS_DESCEND_SPEED: f32 = 40.0;

/// Phase thresholds used by the boss presets (health ratio upper bounds).
pub const BOSS_PHASE2_THRESHOLD: f32 = 2.0 / 3.0;
pub const BOSS_PHASE3_THRESHOLD: f32 = 1.0 / 3.0;

/// Score multiplier per boss level.
pub const BOSS_REWARD_PER_LEVEL: u32 = 1000;

/// Radius around the boss in which summoned minions appear (px).
pub const SUMMON_SPREAD_X: f32 = 100.0;
pub const SUMMON_MIN_OFFSET_Y: f32 = 50.0;
pub const SUMMON_MAX_OFFSET_Y: f32 = 150.0;

// --- Pattern interpreter ---

/// Horizontal pursuit gain for `move_sine` (1/s).
pub const PURSUIT_GAIN: f32 = 3.0;

/// Horizontal speed cap for `move_sine` (px/s).
pub const PURSUIT_MAX_SPEED: f32 = 180.0;

/// `shoot_single` projectile speed (px/s).
pub const SINGLE_SHOT_SPEED: f32 = 200.0;

/// `shoot_cone` projectile speed (px/s).
pub const CONE_SHOT_SPEED: f32 = 180.0;

/// `shoot_circle` projectile speed (px/s).
pub const CIRCLE_SHOT_SPEED: f32 = 160.0;

/// Total angular spread of a cone volley (radians, 40°).
pub const CONE_SPREAD: f32 = 40.0 * PI / 180.0;

/// Aim vectors shorter than this are degenerate.
pub const MIN_AIM_DISTANCE: f32 = 1e-4;

// --- Combat ---

/// Damage applied to the player by one enemy projectile.
pub const PLAYER_HIT_DAMAGE: f32 = 10.0;
