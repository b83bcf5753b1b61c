//! Encounter director: the core of the game loop.
//!
//! `EncounterDirector` owns both registries, the level progression, and the
//! seeded RNG. Each `tick` advances the level clock, updates every enemy and
//! projectile, and returns a `DirectorSnapshot`. Completely headless, so the
//! same seed and inputs always produce the same snapshots.

use hecs::Entity;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use barrage_core::constants::PLAYER_HIT_DAMAGE;
use barrage_core::enums::DirectorStatus;
use barrage_core::error::ConfigError;
use barrage_core::events::{EncounterEvent, LootSink};
use barrage_core::player::{PlayerShot, PlayerState};
use barrage_core::state::DirectorSnapshot;
use barrage_core::types::{Playfield, SimTime};

use crate::combat::{self, DamageOutcome};
use crate::factory::{EnemyFactory, StandardFactory};
use crate::level::{LevelProgression, LevelScript, ProgressionEvent};
use crate::registry::{EnemyRegistry, ProjectileRegistry};
use crate::scenario;
use crate::systems;
use crate::systems::enemies::EnemyPass;

/// Configuration for a new director.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorConfig {
    /// RNG seed for determinism. Same seed = same encounter.
    pub seed: u64,
    pub playfield: Playfield,
    /// Damage dealt to the player by one enemy projectile.
    pub player_hit_damage: f32,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            playfield: Playfield::default(),
            player_hit_damage: PLAYER_HIT_DAMAGE,
        }
    }
}

/// The encounter director. Owns all enemies, projectiles, and level state.
pub struct EncounterDirector {
    enemies: EnemyRegistry,
    projectiles: ProjectileRegistry,
    factory: Box<dyn EnemyFactory>,
    progression: LevelProgression,
    playfield: Playfield,
    player_hit_damage: f32,
    time: SimTime,
    rng: ChaCha8Rng,
    despawn_buffer: Vec<Entity>,
    /// Events raised since the last snapshot.
    events: Vec<EncounterEvent>,
}

impl EncounterDirector {
    /// Director over `levels` using the standard enemy factory.
    pub fn new(config: DirectorConfig, levels: Vec<LevelScript>) -> Result<Self, ConfigError> {
        let factory = StandardFactory::new(config.playfield);
        Self::with_factory(config, levels, Box::new(factory))
    }

    /// Director over the five built-in levels.
    pub fn campaign(config: DirectorConfig) -> Result<Self, ConfigError> {
        Self::new(config, scenario::build_campaign()?)
    }

    /// Director with a caller-supplied factory. Every level is checked
    /// against the factory before the first tick.
    pub fn with_factory(
        config: DirectorConfig,
        levels: Vec<LevelScript>,
        factory: Box<dyn EnemyFactory>,
    ) -> Result<Self, ConfigError> {
        let progression = LevelProgression::new(levels, factory.as_ref())?;
        tracing::info!(
            seed = config.seed,
            levels = progression.len(),
            "encounter director ready"
        );
        Ok(Self {
            enemies: EnemyRegistry::new(),
            projectiles: ProjectileRegistry::new(),
            factory,
            progression,
            playfield: config.playfield,
            player_hit_damage: config.player_hit_damage,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Advance the encounter by `dt` seconds and return the resulting snapshot.
    /// Once the campaign is complete the world is frozen.
    pub fn tick(&mut self, dt: f32, player: &mut dyn PlayerState) -> DirectorSnapshot {
        if !self.progression.is_finished() {
            self.run_systems(dt, player);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.enemies,
            &self.projectiles,
            &self.time,
            self.status(),
            self.progression.run(),
            events,
        )
    }

    /// Apply `amount` damage to one enemy. A killed enemy is removed at once.
    pub fn damage_enemy(
        &mut self,
        entity: Entity,
        amount: f32,
        loot: &mut dyn LootSink,
    ) -> DamageOutcome {
        let outcome = combat::apply_damage(
            &mut self.enemies,
            entity,
            amount,
            &mut self.rng,
            &mut self.events,
            loot,
        );
        if outcome == DamageOutcome::Killed {
            self.enemies.remove(entity);
        }
        outcome
    }

    /// Restore health to a live enemy, capped at its max.
    pub fn heal_enemy(&mut self, entity: Entity, amount: f32) -> bool {
        combat::heal(&mut self.enemies, entity, amount)
    }

    /// Hit-test this frame's player shots. Returns which shots were consumed.
    pub fn resolve_player_shots(
        &mut self,
        shots: &[PlayerShot],
        loot: &mut dyn LootSink,
    ) -> Vec<bool> {
        combat::resolve_player_shots(
            shots,
            &mut self.enemies,
            &mut self.rng,
            &mut self.events,
            loot,
            &mut self.despawn_buffer,
        )
    }

    pub fn status(&self) -> DirectorStatus {
        if self.progression.is_finished() {
            DirectorStatus::CampaignComplete
        } else {
            DirectorStatus::Running
        }
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn playfield(&self) -> Playfield {
        self.playfield
    }

    pub fn current_level(&self) -> u32 {
        self.progression.current_level()
    }

    pub fn progression(&self) -> &LevelProgression {
        &self.progression
    }

    pub fn enemies(&self) -> &EnemyRegistry {
        &self.enemies
    }

    pub fn projectiles(&self) -> &ProjectileRegistry {
        &self.projectiles
    }

    /// The live boss, if one has spawned and not died.
    pub fn boss(&self) -> Option<Entity> {
        self.enemies.boss()
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32, player: &mut dyn PlayerState) {
        // 1. Timeline: due spawns, boss entry, level completion
        let (_step, progress) = self.progression.advance(
            dt,
            &mut self.enemies,
            self.factory.as_ref(),
            self.playfield,
            &mut self.rng,
            &mut self.events,
        );
        if let Some(ProgressionEvent::LevelAdvanced { from, to }) = progress {
            tracing::debug!(from, to, tick = self.time.tick, "level run replaced");
        }

        // 2. Enemies: behaviors, boss phases and patterns, fire, summons
        let pass = EnemyPass {
            factory: self.factory.as_ref(),
            playfield: self.playfield,
            player: Some(player.position()),
            dt,
            shot_damage: self.player_hit_damage,
        };
        systems::enemies::run(
            &pass,
            &mut self.enemies,
            &mut self.projectiles,
            &mut self.rng,
            &mut self.events,
            &mut self.despawn_buffer,
        );

        // 3. Projectiles: movement, player hits, cleanup
        systems::projectiles::run(
            &mut self.projectiles,
            self.playfield,
            dt,
            player,
            &mut self.events,
            &mut self.despawn_buffer,
        );
    }
}
