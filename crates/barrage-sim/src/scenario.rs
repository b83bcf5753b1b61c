//! Built-in campaign: five hand-tuned level scripts.
//!
//! Each level mixes the four minion archetypes on a timeline and ends with
//! that level's boss. Later levels spawn earlier, sway wider, and field a
//! tougher boss.

use barrage_core::error::ConfigError;

use crate::level::{BossSpawnEvent, EnemySpawnEvent, LevelScript};

/// All five levels in order.
pub fn build_campaign() -> Result<Vec<LevelScript>, ConfigError> {
    (1..=5).map(build_level).collect()
}

/// Build the script for one level (1 through 5).
pub fn build_level(level: u32) -> Result<LevelScript, ConfigError> {
    match level {
        1 => build_level_1(),
        2 => build_level_2(),
        3 => build_level_3(),
        4 => build_level_4(),
        5 => build_level_5(),
        other => Err(ConfigError::UnknownLevel(other)),
    }
}

fn spawn(time: f32, enemy_type: &str, x: f32) -> EnemySpawnEvent {
    EnemySpawnEvent::new(time, enemy_type, x)
}

fn zigzag(time: f32, x: f32, amplitude: f32) -> EnemySpawnEvent {
    spawn(time, "zigzag", x).with_param("amplitude", amplitude)
}

fn boss(level: u32, time: f32, hp: f32) -> BossSpawnEvent {
    BossSpawnEvent::new(time, format!("boss_level_{level}")).with_param("hp", hp)
}

/// Level 1: a gentle introduction, boss at 20 s.
fn build_level_1() -> Result<LevelScript, ConfigError> {
    LevelScript::new(
        1,
        vec![
            spawn(1.0, "minion1", 0.2),
            spawn(2.0, "minion1", 0.5),
            zigzag(4.0, 0.8, 50.0),
            spawn(7.0, "kamikaze", 0.3),
        ],
        boss(1, 20.0, 500.0),
    )
}

/// Level 2: first shooter, flanking minions.
fn build_level_2() -> Result<LevelScript, ConfigError> {
    LevelScript::new(
        2,
        vec![
            spawn(1.0, "minion1", 0.1),
            spawn(1.5, "minion1", 0.9),
            spawn(3.0, "shooter", 0.5),
            zigzag(6.0, 0.3, 80.0),
        ],
        boss(2, 25.0, 800.0),
    )
}

fn build_level_3() -> Result<LevelScript, ConfigError> {
    LevelScript::new(
        3,
        vec![
            spawn(1.0, "minion1", 0.2),
            spawn(2.0, "shooter", 0.7),
            zigzag(4.0, 0.4, 100.0),
            spawn(8.0, "kamikaze", 0.5),
        ],
        boss(3, 30.0, 1000.0),
    )
}

fn build_level_4() -> Result<LevelScript, ConfigError> {
    LevelScript::new(
        4,
        vec![
            spawn(0.5, "minion1", 0.1),
            spawn(1.0, "minion1", 0.9),
            spawn(3.0, "shooter", 0.5),
            zigzag(5.0, 0.3, 120.0),
            spawn(9.0, "kamikaze", 0.6),
        ],
        boss(4, 35.0, 1300.0),
    )
}

/// Level 5: everything at once, two shooters.
fn build_level_5() -> Result<LevelScript, ConfigError> {
    LevelScript::new(
        5,
        vec![
            spawn(0.5, "minion1", 0.2),
            spawn(1.5, "shooter", 0.8),
            zigzag(3.0, 0.4, 150.0),
            spawn(6.0, "kamikaze", 0.5),
            spawn(10.0, "shooter", 0.3),
        ],
        boss(5, 40.0, 1800.0),
    )
}
