//! Enemy factories: turn a type tag plus spawn parameters into a ready
//! [`Enemy`] bundle.
//!
//! The timeline scheduler and boss summons only talk to the
//! [`EnemyFactory`] trait; [`StandardFactory`] knows the built-in archetypes
//! and the `boss_level_<n>` presets.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::RngCore;

use barrage_ai::behavior::Behavior;
use barrage_ai::phase::PhaseMachine;
use barrage_ai::presets::{boss_preset, parse_boss_tag};
use barrage_ai::profiles::{get_profile, EnemyArchetype};
use barrage_core::components::{Health, Reward};
use barrage_core::constants::*;
use barrage_core::enums::EnemyKind;
use barrage_core::error::ConfigError;
use barrage_core::types::{Actor, Playfield};

/// Per-spawn numeric parameters (`amplitude`, `hp`, ...).
pub type SpawnParams = BTreeMap<String, f32>;

/// How a freshly built enemy decides what to do each tick.
#[derive(Debug, Clone)]
pub enum EnemyBrain {
    Regular(Behavior),
    Boss {
        level: u32,
        /// y at which the entry descent stops.
        hover_y: f32,
        machine: PhaseMachine,
    },
}

/// Component bundle for one enemy, validated at construction.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub enemy_type: String,
    pub kind: EnemyKind,
    pub actor: Actor,
    pub health: Health,
    pub reward: Reward,
    pub brain: EnemyBrain,
}

impl Enemy {
    /// Rejects `max_health <= 0` and drop chances outside [0, 1].
    pub fn new(
        enemy_type: impl Into<String>,
        actor: Actor,
        max_health: f32,
        reward: Reward,
        brain: EnemyBrain,
    ) -> Result<Self, ConfigError> {
        if !max_health.is_finite() || max_health <= 0.0 {
            return Err(ConfigError::InvalidHealth(max_health));
        }
        if !(0.0..=1.0).contains(&reward.drop_chance) {
            return Err(ConfigError::InvalidDropChance(reward.drop_chance));
        }
        let kind = match &brain {
            EnemyBrain::Regular(behavior) => behavior.kind(),
            EnemyBrain::Boss { .. } => EnemyKind::Boss,
        };
        Ok(Self {
            enemy_type: enemy_type.into(),
            kind,
            actor,
            health: Health::full(max_health),
            reward,
            brain,
        })
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.brain, EnemyBrain::Boss { .. })
    }
}

/// Builds enemies and bosses from level-script tags.
pub trait EnemyFactory {
    fn supports_enemy(&self, enemy_type: &str) -> bool;

    fn supports_boss(&self, boss_type: &str) -> bool;

    /// Load-time check for an enemy spawn.
    fn check_enemy(&self, enemy_type: &str, _params: &SpawnParams) -> Result<(), ConfigError> {
        if self.supports_enemy(enemy_type) {
            Ok(())
        } else {
            Err(ConfigError::UnknownEnemyType(enemy_type.to_string()))
        }
    }

    /// Load-time check for a boss spawn.
    fn check_boss(&self, boss_type: &str, _params: &SpawnParams) -> Result<(), ConfigError> {
        if self.supports_boss(boss_type) {
            Ok(())
        } else {
            Err(ConfigError::UnknownBossType(boss_type.to_string()))
        }
    }

    /// Build a regular enemy centered at `position` (playfield coordinates).
    fn create_enemy(
        &self,
        enemy_type: &str,
        position: Vec2,
        params: &SpawnParams,
        rng: &mut dyn RngCore,
    ) -> Result<Enemy, ConfigError>;

    /// Build a boss at its entry point.
    fn create_boss(
        &self,
        boss_type: &str,
        params: &SpawnParams,
        rng: &mut dyn RngCore,
    ) -> Result<Enemy, ConfigError>;
}

/// Factory for the built-in archetypes (`minion1`, `zigzag`, `kamikaze`,
/// `shooter`) and bosses `boss_level_1` through `boss_level_5`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFactory {
    playfield: Playfield,
}

impl StandardFactory {
    pub fn new(playfield: Playfield) -> Self {
        Self { playfield }
    }

    fn boss_level(boss_type: &str) -> Result<u32, ConfigError> {
        parse_boss_tag(boss_type).ok_or_else(|| ConfigError::UnknownBossType(boss_type.to_string()))
    }
}

impl EnemyFactory for StandardFactory {
    fn supports_enemy(&self, enemy_type: &str) -> bool {
        EnemyArchetype::from_tag(enemy_type).is_some()
    }

    fn supports_boss(&self, boss_type: &str) -> bool {
        parse_boss_tag(boss_type).is_some()
    }

    fn check_enemy(&self, enemy_type: &str, params: &SpawnParams) -> Result<(), ConfigError> {
        if EnemyArchetype::from_tag(enemy_type).is_none() {
            return Err(ConfigError::UnknownEnemyType(enemy_type.to_string()));
        }
        for (name, &value) in params {
            if !value.is_finite() {
                return Err(ConfigError::InvalidParameter {
                    name: name.clone(),
                    value,
                });
            }
        }
        match params.get("hp") {
            Some(&hp) if hp <= 0.0 => Err(ConfigError::InvalidHealth(hp)),
            _ => Ok(()),
        }
    }

    fn check_boss(&self, boss_type: &str, params: &SpawnParams) -> Result<(), ConfigError> {
        let level = Self::boss_level(boss_type)?;
        boss_preset(level, params.get("hp").copied()).map(|_| ())
    }

    fn create_enemy(
        &self,
        enemy_type: &str,
        position: Vec2,
        params: &SpawnParams,
        rng: &mut dyn RngCore,
    ) -> Result<Enemy, ConfigError> {
        let archetype = EnemyArchetype::from_tag(enemy_type)
            .ok_or_else(|| ConfigError::UnknownEnemyType(enemy_type.to_string()))?;
        let profile = get_profile(archetype);

        let mut actor = Actor::new(position, Vec2::splat(ENEMY_SIZE));
        let behavior = match archetype {
            EnemyArchetype::Minion => Behavior::straight(profile.speed),
            EnemyArchetype::Zigzag => {
                let amplitude = params
                    .get("amplitude")
                    .copied()
                    .unwrap_or(ZIGZAG_DEFAULT_AMPLITUDE);
                Behavior::zigzag(profile.speed, position.x, amplitude, rng)
            }
            EnemyArchetype::Kamikaze => {
                actor.velocity = Vec2::new(0.0, profile.speed);
                Behavior::homing()
            }
            EnemyArchetype::Shooter => Behavior::shooter(profile.speed),
        };

        Enemy::new(
            enemy_type,
            actor,
            params.get("hp").copied().unwrap_or(profile.max_health),
            Reward {
                score: profile.score,
                drop_chance: profile.drop_chance,
            },
            EnemyBrain::Regular(behavior),
        )
    }

    fn create_boss(
        &self,
        boss_type: &str,
        params: &SpawnParams,
        _rng: &mut dyn RngCore,
    ) -> Result<Enemy, ConfigError> {
        let level = Self::boss_level(boss_type)?;
        let preset = boss_preset(level, params.get("hp").copied())?;
        let actor = Actor::new(
            Vec2::new(self.playfield.center_x(), BOSS_SPAWN_Y),
            Vec2::splat(BOSS_SIZE),
        );

        Enemy::new(
            boss_type,
            actor,
            preset.max_health,
            Reward {
                score: preset.score,
                drop_chance: preset.drop_chance,
            },
            EnemyBrain::Boss {
                level,
                hover_y: self.playfield.height * BOSS_HOVER_FRACTION,
                machine: PhaseMachine::new(preset.phases),
            },
        )
    }
}
