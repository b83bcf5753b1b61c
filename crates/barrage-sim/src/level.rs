//! Timeline scheduler: level scripts, per-playthrough runs, and progression
//! through the campaign.

use std::sync::Arc;

use glam::Vec2;
use hecs::Entity;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use barrage_core::constants::ENEMY_SPAWN_Y;
use barrage_core::error::ConfigError;
use barrage_core::events::{EncounterEvent, EventSink};
use barrage_core::types::Playfield;

use crate::factory::{EnemyFactory, SpawnParams};
use crate::registry::EnemyRegistry;

/// A timed regular-enemy spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawnEvent {
    /// Level-clock seconds.
    pub time: f32,
    pub enemy_type: String,
    /// Horizontal spawn position as a fraction of the playfield width.
    pub x: f32,
    #[serde(default)]
    pub params: SpawnParams,
}

/// The level's single boss spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossSpawnEvent {
    pub time: f32,
    pub boss_type: String,
    #[serde(default)]
    pub params: SpawnParams,
}

/// Immutable level definition. Spawns are held in ascending time order,
/// ties in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LevelScriptDef", into = "LevelScriptDef")]
pub struct LevelScript {
    level: u32,
    spawns: Vec<EnemySpawnEvent>,
    boss: BossSpawnEvent,
}

/// Unvalidated wire form of a level script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelScriptDef {
    pub level: u32,
    #[serde(default)]
    pub spawns: Vec<EnemySpawnEvent>,
    pub boss: BossSpawnEvent,
}

/// Mutable state of one playthrough of a level.
#[derive(Debug, Clone)]
pub struct LevelRun {
    script: Arc<LevelScript>,
    elapsed: f32,
    /// Index of the next untriggered spawn.
    cursor: usize,
    boss_spawned: bool,
    complete: bool,
}

/// What one [`LevelRun::advance`] did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelStep {
    pub spawned: Vec<Entity>,
    pub boss: Option<Entity>,
    /// The run completed on this step.
    pub completed: bool,
}

/// Signals from [`LevelProgression::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressionEvent {
    LevelAdvanced { from: u32, to: u32 },
    CampaignComplete,
}

/// Ordered campaign of level scripts and the run currently being played.
#[derive(Debug, Clone)]
pub struct LevelProgression {
    scripts: Vec<Arc<LevelScript>>,
    index: usize,
    run: LevelRun,
    finished: bool,
}

impl EnemySpawnEvent {
    pub fn new(time: f32, enemy_type: impl Into<String>, x: f32) -> Self {
        Self {
            time,
            enemy_type: enemy_type.into(),
            x,
            params: SpawnParams::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: f32) -> Self {
        self.params.insert(key.to_string(), value);
        self
    }

    /// Spawn point just above the top edge.
    pub fn position(&self, playfield: Playfield) -> Vec2 {
        Vec2::new(self.x * playfield.width, ENEMY_SPAWN_Y)
    }
}

impl BossSpawnEvent {
    pub fn new(time: f32, boss_type: impl Into<String>) -> Self {
        Self {
            time,
            boss_type: boss_type.into(),
            params: SpawnParams::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: f32) -> Self {
        self.params.insert(key.to_string(), value);
        self
    }
}

fn check_time(time: f32) -> Result<(), ConfigError> {
    if !time.is_finite() || time < 0.0 {
        return Err(ConfigError::NegativeTriggerTime(time));
    }
    Ok(())
}

impl LevelScript {
    /// Validate times and positions, then stable-sort spawns by time.
    pub fn new(
        level: u32,
        mut spawns: Vec<EnemySpawnEvent>,
        boss: BossSpawnEvent,
    ) -> Result<Self, ConfigError> {
        for spawn in &spawns {
            check_time(spawn.time)?;
            if !(0.0..=1.0).contains(&spawn.x) {
                return Err(ConfigError::InvalidSpawnPosition(spawn.x));
            }
        }
        check_time(boss.time)?;

        spawns.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(Self {
            level,
            spawns,
            boss,
        })
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn spawns(&self) -> &[EnemySpawnEvent] {
        &self.spawns
    }

    pub fn boss(&self) -> &BossSpawnEvent {
        &self.boss
    }

    /// Fail fast on tags or parameters the factory cannot build.
    pub fn check(&self, factory: &dyn EnemyFactory) -> Result<(), ConfigError> {
        for spawn in &self.spawns {
            factory.check_enemy(&spawn.enemy_type, &spawn.params)?;
        }
        factory.check_boss(&self.boss.boss_type, &self.boss.params)
    }
}

impl TryFrom<LevelScriptDef> for LevelScript {
    type Error = ConfigError;

    fn try_from(def: LevelScriptDef) -> Result<Self, Self::Error> {
        LevelScript::new(def.level, def.spawns, def.boss)
    }
}

impl From<LevelScript> for LevelScriptDef {
    fn from(script: LevelScript) -> Self {
        LevelScriptDef {
            level: script.level,
            spawns: script.spawns,
            boss: script.boss,
        }
    }
}

impl LevelRun {
    /// Start a run after checking every tag against the factory.
    pub fn start(script: LevelScript, factory: &dyn EnemyFactory) -> Result<Self, ConfigError> {
        script.check(factory)?;
        Ok(Self::fresh(Arc::new(script)))
    }

    fn fresh(script: Arc<LevelScript>) -> Self {
        Self {
            script,
            elapsed: 0.0,
            cursor: 0,
            boss_spawned: false,
            complete: false,
        }
    }

    pub fn level(&self) -> u32 {
        self.script.level
    }

    pub fn script(&self) -> &LevelScript {
        &self.script
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn boss_spawned(&self) -> bool {
        self.boss_spawned
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Spawns not yet triggered.
    pub fn pending_spawns(&self) -> &[EnemySpawnEvent] {
        &self.script.spawns[self.cursor..]
    }

    /// Advance the level clock by `dt` and trigger everything that came due.
    /// A large `dt` fires all due spawns in order; none fires twice.
    pub fn advance(
        &mut self,
        dt: f32,
        enemies: &mut EnemyRegistry,
        factory: &dyn EnemyFactory,
        playfield: Playfield,
        rng: &mut dyn RngCore,
        events: &mut dyn EventSink,
    ) -> LevelStep {
        let mut step = LevelStep::default();
        if self.complete {
            return step;
        }
        self.elapsed += dt;

        let script = Arc::clone(&self.script);
        while let Some(spawn) = script.spawns.get(self.cursor) {
            if spawn.time > self.elapsed {
                break;
            }
            self.cursor += 1;
            match factory.create_enemy(&spawn.enemy_type, spawn.position(playfield), &spawn.params, rng)
            {
                Ok(enemy) => {
                    tracing::debug!(
                        level = script.level,
                        enemy_type = %spawn.enemy_type,
                        time = spawn.time,
                        "enemy spawned"
                    );
                    step.spawned.push(enemies.spawn(enemy));
                }
                Err(err) => {
                    tracing::error!(level = script.level, enemy_type = %spawn.enemy_type, %err, "spawn failed");
                }
            }
        }

        let boss = &script.boss;
        if !self.boss_spawned && self.elapsed >= boss.time {
            self.boss_spawned = true;
            match factory.create_boss(&boss.boss_type, &boss.params, rng) {
                Ok(enemy) => {
                    tracing::info!(level = script.level, boss_type = %boss.boss_type, "boss spawned");
                    events.publish(EncounterEvent::BossSpawned {
                        level: script.level,
                        boss_type: boss.boss_type.clone(),
                    });
                    step.boss = Some(enemies.spawn(enemy));
                }
                Err(err) => {
                    tracing::error!(level = script.level, boss_type = %boss.boss_type, %err, "boss spawn failed");
                }
            }
        }

        if self.boss_spawned && !enemies.has_boss() {
            self.complete = true;
            step.completed = true;
            tracing::info!(level = script.level, elapsed = self.elapsed, "level complete");
            events.publish(EncounterEvent::LevelComplete {
                level: script.level,
            });
        }
        step
    }
}

impl LevelProgression {
    /// Check every script up front; the campaign starts on the first one.
    pub fn new(scripts: Vec<LevelScript>, factory: &dyn EnemyFactory) -> Result<Self, ConfigError> {
        for script in &scripts {
            script.check(factory)?;
        }
        let scripts: Vec<Arc<LevelScript>> = scripts.into_iter().map(Arc::new).collect();
        let first = scripts.first().ok_or(ConfigError::NoLevels)?;
        let run = LevelRun::fresh(Arc::clone(first));
        Ok(Self {
            scripts,
            index: 0,
            run,
            finished: false,
        })
    }

    pub fn run(&self) -> &LevelRun {
        &self.run
    }

    pub fn current_level(&self) -> u32 {
        self.run.level()
    }

    /// Zero-based position in the campaign.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance the current run; on completion move to the next script, or
    /// finish the campaign after the last one. A finished campaign no longer
    /// advances.
    pub fn advance(
        &mut self,
        dt: f32,
        enemies: &mut EnemyRegistry,
        factory: &dyn EnemyFactory,
        playfield: Playfield,
        rng: &mut dyn RngCore,
        events: &mut dyn EventSink,
    ) -> (LevelStep, Option<ProgressionEvent>) {
        if self.finished {
            return (LevelStep::default(), None);
        }
        let step = self.run.advance(dt, enemies, factory, playfield, rng, events);
        if !step.completed {
            return (step, None);
        }

        let from = self.run.level();
        match self.scripts.get(self.index + 1) {
            Some(next) => {
                self.index += 1;
                self.run = LevelRun::fresh(Arc::clone(next));
                let to = self.run.level();
                tracing::info!(from, to, "advancing to next level");
                (step, Some(ProgressionEvent::LevelAdvanced { from, to }))
            }
            None => {
                self.finished = true;
                tracing::info!(levels = self.scripts.len(), "campaign complete");
                (step, Some(ProgressionEvent::CampaignComplete))
            }
        }
    }
}
