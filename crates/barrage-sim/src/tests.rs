//! Tests for the timeline scheduler, combat pipeline, systems, and director.

use glam::Vec2;
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use barrage_ai::behavior::Behavior;
use barrage_ai::phase::PhaseMachine;
use barrage_core::components::Reward;
use barrage_core::constants::*;
use barrage_core::enums::*;
use barrage_core::error::ConfigError;
use barrage_core::events::{EncounterEvent, FireIntent, LootIntent};
use barrage_core::player::{PlayerShot, StaticPlayer};
use barrage_core::state::DirectorSnapshot;
use barrage_core::types::{Aabb, Actor, Playfield};

use crate::combat::{self, DamageOutcome};
use crate::engine::{DirectorConfig, EncounterDirector};
use crate::factory::{Enemy, EnemyBrain, EnemyFactory, SpawnParams, StandardFactory};
use crate::level::{
    BossSpawnEvent, EnemySpawnEvent, LevelProgression, LevelRun, LevelScript, ProgressionEvent,
};
use crate::registry::{EnemyRegistry, ProjectileRegistry};
use crate::scenario;
use crate::systems;
use crate::systems::enemies::EnemyPass;

// ---- Helpers ----

/// RNG whose every `gen::<f32>()` returns `value`.
fn fixed_roll(value: f32) -> StepRng {
    let bits = (value * (1u32 << 24) as f32).ceil() as u64;
    StepRng::new(bits << 8, 0)
}

fn test_player() -> StaticPlayer {
    StaticPlayer::new(Vec2::new(400.0, 550.0), Vec2::splat(40.0))
}

fn minion(position: Vec2, max_health: f32, drop_chance: f32) -> Enemy {
    Enemy::new(
        "minion1",
        Actor::new(position, Vec2::splat(ENEMY_SIZE)),
        max_health,
        Reward {
            score: 50,
            drop_chance,
        },
        EnemyBrain::Regular(Behavior::straight(STRAIGHT_SPEED)),
    )
    .unwrap()
}

fn boss_only_level(level: u32, boss_time: f32, hp: f32) -> LevelScript {
    LevelScript::new(
        level,
        vec![],
        BossSpawnEvent::new(boss_time, format!("boss_level_{level}")).with_param("hp", hp),
    )
    .unwrap()
}

fn four_spawn_script() -> LevelScript {
    LevelScript::new(
        1,
        vec![
            EnemySpawnEvent::new(1.0, "minion1", 0.2),
            EnemySpawnEvent::new(2.0, "minion1", 0.5),
            EnemySpawnEvent::new(4.0, "minion1", 0.8),
            EnemySpawnEvent::new(7.0, "minion1", 0.3),
        ],
        BossSpawnEvent::new(100.0, "boss_level_1"),
    )
    .unwrap()
}

fn count_phase_changes(snapshot: &DirectorSnapshot, phase: u32) -> usize {
    snapshot
        .events
        .iter()
        .filter(|e| **e == EncounterEvent::PhaseChanged { phase })
        .count()
}

// ---- Timeline scheduler ----

#[test]
fn test_large_step_coalesces_spawns() {
    let factory = StandardFactory::default();
    let playfield = Playfield::default();

    let spawned_with = |steps: usize, dt: f32| {
        let mut run = LevelRun::start(four_spawn_script(), &factory).unwrap();
        let mut enemies = EnemyRegistry::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut events: Vec<EncounterEvent> = Vec::new();
        let mut spawned = Vec::new();
        for _ in 0..steps {
            let step = run.advance(dt, &mut enemies, &factory, playfield, &mut rng, &mut events);
            spawned.extend(step.spawned);
        }
        assert!(run.pending_spawns().is_empty());
        assert!(!run.boss_spawned());
        spawned
            .into_iter()
            .map(|e| (enemies.enemy_type(e).unwrap(), enemies.position(e).unwrap()))
            .collect::<Vec<_>>()
    };

    let one_step = spawned_with(1, 10.0);
    let many_steps = spawned_with(100, 0.1);
    assert_eq!(one_step.len(), 4);
    assert_eq!(one_step, many_steps, "spawn order must not depend on dt");
    assert!((one_step[0].1 - Vec2::new(160.0, ENEMY_SPAWN_Y)).length() < 1e-3);
    assert!((one_step[3].1 - Vec2::new(240.0, ENEMY_SPAWN_Y)).length() < 1e-3);
}

#[test]
fn test_spawns_fire_once() {
    let factory = StandardFactory::default();
    let mut run = LevelRun::start(four_spawn_script(), &factory).unwrap();
    let mut enemies = EnemyRegistry::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut events: Vec<EncounterEvent> = Vec::new();

    let first = run.advance(2.0, &mut enemies, &factory, Playfield::default(), &mut rng, &mut events);
    assert_eq!(first.spawned.len(), 2);
    let again = run.advance(0.0, &mut enemies, &factory, Playfield::default(), &mut rng, &mut events);
    assert!(again.spawned.is_empty());
    assert_eq!(enemies.len(), 2);
    assert_eq!(run.pending_spawns().len(), 2);
}

#[test]
fn test_spawn_ties_keep_declaration_order() {
    let script = LevelScript::new(
        1,
        vec![
            EnemySpawnEvent::new(2.0, "zigzag", 0.1),
            EnemySpawnEvent::new(1.0, "minion1", 0.5),
            EnemySpawnEvent::new(2.0, "shooter", 0.9),
        ],
        BossSpawnEvent::new(10.0, "boss_level_1"),
    )
    .unwrap();
    let order: Vec<&str> = script
        .spawns()
        .iter()
        .map(|s| s.enemy_type.as_str())
        .collect();
    assert_eq!(order, vec!["minion1", "zigzag", "shooter"]);
}

#[test]
fn test_level_completes_only_after_boss_dies() {
    let factory = StandardFactory::default();
    let mut run = LevelRun::start(boss_only_level(1, 5.0, 100.0), &factory).unwrap();
    let mut enemies = EnemyRegistry::new();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut events: Vec<EncounterEvent> = Vec::new();
    let playfield = Playfield::default();

    let step = run.advance(4.9, &mut enemies, &factory, playfield, &mut rng, &mut events);
    assert!(step.boss.is_none());
    assert!(!run.is_complete());

    let step = run.advance(0.2, &mut enemies, &factory, playfield, &mut rng, &mut events);
    let boss = step.boss.expect("boss should spawn at t=5");
    assert!(run.boss_spawned());
    assert!(!run.is_complete());
    assert_eq!(
        events,
        vec![EncounterEvent::BossSpawned {
            level: 1,
            boss_type: "boss_level_1".into()
        }]
    );

    for _ in 0..10 {
        run.advance(1.0, &mut enemies, &factory, playfield, &mut rng, &mut events);
        assert!(!run.is_complete(), "boss is still alive");
    }

    let mut loot: Vec<LootIntent> = Vec::new();
    let outcome = combat::apply_damage(&mut enemies, boss, 100.0, &mut rng, &mut events, &mut loot);
    assert_eq!(outcome, DamageOutcome::Killed);
    enemies.remove(boss);

    let step = run.advance(DT, &mut enemies, &factory, playfield, &mut rng, &mut events);
    assert!(step.completed);
    assert!(run.is_complete());
    assert_eq!(events.last(), Some(&EncounterEvent::LevelComplete { level: 1 }));

    // A completed run is inert.
    let step = run.advance(DT, &mut enemies, &factory, playfield, &mut rng, &mut events);
    assert!(!step.completed);
}

#[test]
fn test_unknown_tags_fail_at_start() {
    let factory = StandardFactory::default();

    let bad_enemy = LevelScript::new(
        1,
        vec![EnemySpawnEvent::new(1.0, "gunship", 0.5)],
        BossSpawnEvent::new(10.0, "boss_level_1"),
    )
    .unwrap();
    assert_eq!(
        LevelRun::start(bad_enemy.clone(), &factory).unwrap_err(),
        ConfigError::UnknownEnemyType("gunship".into())
    );
    assert!(EncounterDirector::new(DirectorConfig::default(), vec![bad_enemy]).is_err());

    let bad_boss = LevelScript::new(1, vec![], BossSpawnEvent::new(10.0, "boss_level_9")).unwrap();
    assert_eq!(
        LevelRun::start(bad_boss, &factory).unwrap_err(),
        ConfigError::UnknownBossType("boss_level_9".into())
    );

    let bad_hp = LevelScript::new(
        1,
        vec![],
        BossSpawnEvent::new(10.0, "boss_level_1").with_param("hp", -5.0),
    )
    .unwrap();
    assert_eq!(
        LevelRun::start(bad_hp, &factory).unwrap_err(),
        ConfigError::InvalidHealth(-5.0)
    );

    assert_eq!(
        EncounterDirector::new(DirectorConfig::default(), vec![]).err(),
        Some(ConfigError::NoLevels)
    );
}

#[test]
fn test_bad_spawn_params_fail_at_start() {
    let factory = StandardFactory::default();

    let zero_hp = LevelScript::new(
        1,
        vec![EnemySpawnEvent::new(1.0, "minion1", 0.5).with_param("hp", 0.0)],
        BossSpawnEvent::new(10.0, "boss_level_1"),
    )
    .unwrap();
    assert_eq!(
        LevelRun::start(zero_hp.clone(), &factory).unwrap_err(),
        ConfigError::InvalidHealth(0.0)
    );
    assert_eq!(
        EncounterDirector::new(DirectorConfig::default(), vec![zero_hp]).err(),
        Some(ConfigError::InvalidHealth(0.0))
    );

    let bad_amplitude = LevelScript::new(
        1,
        vec![EnemySpawnEvent::new(1.0, "zigzag", 0.5).with_param("amplitude", f32::INFINITY)],
        BossSpawnEvent::new(10.0, "boss_level_1"),
    )
    .unwrap();
    assert!(matches!(
        LevelRun::start(bad_amplitude, &factory),
        Err(ConfigError::InvalidParameter { ref name, .. }) if name == "amplitude"
    ));

    let custom_hp = LevelScript::new(
        1,
        vec![EnemySpawnEvent::new(1.0, "minion1", 0.5).with_param("hp", 40.0)],
        BossSpawnEvent::new(10.0, "boss_level_1"),
    )
    .unwrap();
    assert!(LevelRun::start(custom_hp, &factory).is_ok());
}

#[test]
fn test_level_script_validation() {
    let boss = BossSpawnEvent::new(10.0, "boss_level_1");
    assert_eq!(
        LevelScript::new(1, vec![EnemySpawnEvent::new(-1.0, "minion1", 0.5)], boss.clone())
            .unwrap_err(),
        ConfigError::NegativeTriggerTime(-1.0)
    );
    assert_eq!(
        LevelScript::new(1, vec![EnemySpawnEvent::new(1.0, "minion1", 1.5)], boss).unwrap_err(),
        ConfigError::InvalidSpawnPosition(1.5)
    );
}

#[test]
fn test_level_script_from_json() {
    let script: LevelScript = serde_json::from_str(
        r#"{
            "level": 2,
            "spawns": [
                {"time": 6.0, "enemy_type": "zigzag", "x": 0.3, "params": {"amplitude": 80.0}},
                {"time": 1.0, "enemy_type": "minion1", "x": 0.1}
            ],
            "boss": {"time": 25.0, "boss_type": "boss_level_2", "params": {"hp": 800.0}}
        }"#,
    )
    .unwrap();
    assert_eq!(script.level(), 2);
    assert_eq!(script.spawns()[0].enemy_type, "minion1");
    assert_eq!(script.spawns()[1].params.get("amplitude"), Some(&80.0));
    assert!(script.spawns()[0].params.is_empty());

    let bad: Result<LevelScript, _> = serde_json::from_str(
        r#"{"level": 1, "boss": {"time": -3.0, "boss_type": "boss_level_1"}}"#,
    );
    assert!(bad.is_err());
}

// ---- Factory ----

#[test]
fn test_factory_builds_archetypes() {
    let factory = StandardFactory::default();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let params = SpawnParams::new();

    let zigzag = factory
        .create_enemy("zigzag", Vec2::new(320.0, ENEMY_SPAWN_Y), &params, &mut rng)
        .unwrap();
    assert_eq!(zigzag.kind, EnemyKind::Zigzag);
    assert_eq!(zigzag.health.max, 25.0);
    assert_eq!(zigzag.reward.score, 80);

    let kamikaze = factory
        .create_enemy("kamikaze", Vec2::new(100.0, ENEMY_SPAWN_Y), &params, &mut rng)
        .unwrap();
    assert_eq!(kamikaze.kind, EnemyKind::Homing);
    assert_eq!(kamikaze.actor.velocity, Vec2::new(0.0, HOMING_ENTRY_SPEED));

    let boss = factory.create_boss("boss_level_3", &params, &mut rng).unwrap();
    assert!(boss.is_boss());
    assert_eq!(boss.kind, EnemyKind::Boss);
    assert_eq!(boss.health.max, 200.0);
    assert_eq!(boss.reward.score, 3000);
    assert_eq!(boss.actor.position, Vec2::new(400.0, BOSS_SPAWN_Y));

    assert_eq!(
        factory
            .create_enemy("gunship", Vec2::ZERO, &params, &mut rng)
            .unwrap_err(),
        ConfigError::UnknownEnemyType("gunship".into())
    );
}

#[test]
fn test_enemy_construction_validates() {
    let actor = Actor::new(Vec2::ZERO, Vec2::splat(ENEMY_SIZE));
    let brain = EnemyBrain::Regular(Behavior::straight(STRAIGHT_SPEED));
    let reward = Reward {
        score: 10,
        drop_chance: 0.3,
    };
    assert_eq!(
        Enemy::new("minion1", actor, 0.0, reward, brain.clone()).unwrap_err(),
        ConfigError::InvalidHealth(0.0)
    );
    assert_eq!(
        Enemy::new(
            "minion1",
            actor,
            10.0,
            Reward {
                score: 10,
                drop_chance: 1.5
            },
            brain
        )
        .unwrap_err(),
        ConfigError::InvalidDropChance(1.5)
    );
}

// ---- Combat ----

#[test]
fn test_lethal_hit_below_drop_roll_drops_loot() {
    let mut enemies = EnemyRegistry::new();
    let position = Vec2::new(200.0, 100.0);
    let entity = enemies.spawn(minion(position, 20.0, 0.3));
    let mut rng = fixed_roll(0.2);
    let mut events: Vec<EncounterEvent> = Vec::new();
    let mut loot: Vec<LootIntent> = Vec::new();

    let outcome = combat::apply_damage(&mut enemies, entity, 25.0, &mut rng, &mut events, &mut loot);
    assert_eq!(outcome, DamageOutcome::Killed);
    assert_eq!(enemies.health(entity).unwrap().current, 0.0);
    assert_eq!(
        events,
        vec![EncounterEvent::EnemyKilled {
            score: 50,
            position
        }]
    );
    assert_eq!(loot.len(), 1);
    assert_eq!(loot[0].position, position);
    assert!(GENERIC_BONUSES.contains(&loot[0].bonus));

    // Second hit on the corpse changes nothing.
    let outcome = combat::apply_damage(&mut enemies, entity, 25.0, &mut rng, &mut events, &mut loot);
    assert_eq!(outcome, DamageOutcome::AlreadyDead);
    assert_eq!(events.len(), 1);
    assert_eq!(loot.len(), 1);

    assert!(enemies.remove(entity));
    assert!(enemies.is_empty());
    assert_eq!(
        combat::apply_damage(&mut enemies, entity, 25.0, &mut rng, &mut events, &mut loot),
        DamageOutcome::Missing
    );
}

#[test]
fn test_lethal_hit_at_drop_chance_drops_nothing() {
    let mut enemies = EnemyRegistry::new();
    let entity = enemies.spawn(minion(Vec2::new(200.0, 100.0), 20.0, 0.3));
    let mut rng = fixed_roll(0.3);
    let mut events: Vec<EncounterEvent> = Vec::new();
    let mut loot: Vec<LootIntent> = Vec::new();

    let outcome = combat::apply_damage(&mut enemies, entity, 25.0, &mut rng, &mut events, &mut loot);
    assert_eq!(outcome, DamageOutcome::Killed);
    assert_eq!(events.len(), 1, "score is emitted exactly once");
    assert!(loot.is_empty(), "roll equal to drop chance gives no loot");
}

#[test]
fn test_partial_damage_and_heal() {
    let mut enemies = EnemyRegistry::new();
    let entity = enemies.spawn(minion(Vec2::new(200.0, 100.0), 20.0, 0.3));
    let mut rng = fixed_roll(0.5);
    let mut events: Vec<EncounterEvent> = Vec::new();
    let mut loot: Vec<LootIntent> = Vec::new();

    assert_eq!(
        combat::apply_damage(&mut enemies, entity, 5.0, &mut rng, &mut events, &mut loot),
        DamageOutcome::Damaged { remaining: 15.0 }
    );
    assert!(combat::heal(&mut enemies, entity, 100.0));
    assert_eq!(enemies.health(entity).unwrap().current, 20.0);
    assert!(events.is_empty());
}

#[test]
fn test_boss_always_drops_level_reward() {
    let factory = StandardFactory::default();
    let mut rng = fixed_roll(0.99);
    let mut params = SpawnParams::new();
    params.insert("hp".into(), 100.0);
    let boss = factory.create_boss("boss_level_2", &params, &mut rng).unwrap();

    let mut enemies = EnemyRegistry::new();
    let entity = enemies.spawn(boss);
    assert!(enemies.has_boss());
    let mut events: Vec<EncounterEvent> = Vec::new();
    let mut loot: Vec<LootIntent> = Vec::new();

    let outcome = combat::apply_damage(&mut enemies, entity, 150.0, &mut rng, &mut events, &mut loot);
    assert_eq!(outcome, DamageOutcome::Killed);
    assert!(matches!(
        events[0],
        EncounterEvent::EnemyKilled { score: 2000, .. }
    ));
    assert_eq!(events[1], EncounterEvent::BossDefeated { level: 2 });
    assert_eq!(loot.len(), 1);
    assert_eq!(loot[0].bonus, BonusKind::LevelReward(2));
}

#[test]
fn test_player_shots_hit_first_live_enemy() {
    let mut enemies = EnemyRegistry::new();
    let a = enemies.spawn(minion(Vec2::new(100.0, 100.0), 15.0, 0.3));
    let b = enemies.spawn(minion(Vec2::new(500.0, 100.0), 15.0, 0.3));
    let mut rng = fixed_roll(0.9);
    let mut events: Vec<EncounterEvent> = Vec::new();
    let mut loot: Vec<LootIntent> = Vec::new();
    let mut buffer = Vec::new();

    let on_a = PlayerShot {
        bounds: Aabb::from_center(Vec2::new(100.0, 110.0), Vec2::new(6.0, 16.0)),
        damage: 15.0,
    };
    let miss = PlayerShot {
        bounds: Aabb::from_center(Vec2::new(300.0, 110.0), Vec2::new(6.0, 16.0)),
        damage: 15.0,
    };

    let consumed = combat::resolve_player_shots(
        &[on_a, on_a, miss],
        &mut enemies,
        &mut rng,
        &mut events,
        &mut loot,
        &mut buffer,
    );
    assert_eq!(consumed, vec![true, false, false]);
    assert!(!enemies.contains(a));
    assert!(enemies.contains(b));
    assert_eq!(events.len(), 1);
}

// ---- Systems ----

#[test]
fn test_projectile_hits_player() {
    let mut projectiles = ProjectileRegistry::new();
    let mut player = test_player();
    projectiles.spawn(
        FireIntent {
            origin: Vec2::new(400.0, 500.0),
            velocity: Vec2::new(0.0, 200.0),
        },
        ProjectileOwner::Enemy,
        PLAYER_HIT_DAMAGE,
    );
    let mut events: Vec<EncounterEvent> = Vec::new();
    let mut buffer = Vec::new();

    let mut hits = 0;
    for _ in 0..30 {
        hits += systems::projectiles::run(
            &mut projectiles,
            Playfield::default(),
            DT,
            &mut player,
            &mut events,
            &mut buffer,
        );
    }
    assert_eq!(hits, 1);
    assert_eq!(player.hits, 1);
    assert_eq!(player.damage_taken, PLAYER_HIT_DAMAGE);
    assert_eq!(
        events,
        vec![EncounterEvent::PlayerHit {
            damage: PLAYER_HIT_DAMAGE
        }]
    );
    assert!(projectiles.is_empty(), "projectile is consumed by the hit");
}

#[test]
fn test_projectile_leaving_playfield_is_removed() {
    let mut projectiles = ProjectileRegistry::new();
    let mut player = test_player();
    projectiles.spawn(
        FireIntent {
            origin: Vec2::new(100.0, 590.0),
            velocity: Vec2::new(0.0, 200.0),
        },
        ProjectileOwner::Enemy,
        PLAYER_HIT_DAMAGE,
    );
    let mut events: Vec<EncounterEvent> = Vec::new();
    let mut buffer = Vec::new();

    let hits = systems::projectiles::run(
        &mut projectiles,
        Playfield::default(),
        0.5,
        &mut player,
        &mut events,
        &mut buffer,
    );
    assert_eq!(hits, 0);
    assert!(projectiles.is_empty());
    assert!(events.is_empty());
    assert_eq!(player.hits, 0);
}

#[test]
fn test_shot_from_above_top_edge_survives() {
    let mut projectiles = ProjectileRegistry::new();
    let mut player = test_player();
    let inbound = projectiles.spawn(
        FireIntent {
            origin: Vec2::new(400.0, -150.0),
            velocity: Vec2::new(0.0, 300.0),
        },
        ProjectileOwner::Enemy,
        PLAYER_HIT_DAMAGE,
    );
    let outbound = projectiles.spawn(
        FireIntent {
            origin: Vec2::new(400.0, -150.0),
            velocity: Vec2::new(0.0, -300.0),
        },
        ProjectileOwner::Enemy,
        PLAYER_HIT_DAMAGE,
    );
    let mut events: Vec<EncounterEvent> = Vec::new();
    let mut buffer = Vec::new();

    systems::projectiles::run(
        &mut projectiles,
        Playfield::default(),
        DT,
        &mut player,
        &mut events,
        &mut buffer,
    );
    assert!(projectiles.contains(inbound), "heading into the playfield");
    assert!(!projectiles.contains(outbound), "heading away from it");
}

#[test]
fn test_descending_boss_shots_reach_the_playfield() {
    let mut director =
        EncounterDirector::new(DirectorConfig::default(), vec![boss_only_level(1, 0.0, 500.0)])
            .unwrap();
    let mut player = test_player();

    let mut max_live = 0;
    for _ in 0..(4 * TICK_RATE) {
        let snapshot = director.tick(DT, &mut player);
        max_live = max_live.max(snapshot.projectiles.len());
    }
    let boss_y = director
        .boss()
        .and_then(|boss| director.enemies().position(boss))
        .map(|p| p.y)
        .unwrap();
    assert!(boss_y < 0.0, "boss is still above the top edge");
    assert!(max_live > 0, "shots fired during the entry stay alive");
}

#[test]
fn test_zigzag_stays_inside_side_edges() {
    let factory = StandardFactory::default();
    let mut enemies = EnemyRegistry::new();
    let mut projectiles = ProjectileRegistry::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let params = SpawnParams::from([("amplitude".to_string(), 150.0)]);
    let zigzag = factory
        .create_enemy("zigzag", Vec2::new(30.0, 0.0), &params, &mut rng)
        .unwrap();
    let entity = enemies.spawn(zigzag);
    let mut events: Vec<EncounterEvent> = Vec::new();
    let mut buffer = Vec::new();

    let pass = EnemyPass {
        factory: &factory,
        playfield: Playfield::default(),
        player: None,
        dt: DT,
        shot_damage: PLAYER_HIT_DAMAGE,
    };
    let half = ENEMY_SIZE * 0.5;
    for _ in 0..240 {
        systems::enemies::run(
            &pass,
            &mut enemies,
            &mut projectiles,
            &mut rng,
            &mut events,
            &mut buffer,
        );
        let x = enemies.position(entity).unwrap().x;
        assert!(x >= half && x <= PLAYFIELD_WIDTH - half, "x = {x}");
    }
}

#[test]
fn test_enemy_below_bottom_removed_without_score() {
    let factory = StandardFactory::default();
    let mut enemies = EnemyRegistry::new();
    let mut projectiles = ProjectileRegistry::new();
    enemies.spawn(minion(Vec2::new(300.0, 630.0), 15.0, 0.3));
    enemies.spawn(minion(Vec2::new(300.0, 100.0), 15.0, 0.3));
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut events: Vec<EncounterEvent> = Vec::new();
    let mut buffer = Vec::new();

    let pass = EnemyPass {
        factory: &factory,
        playfield: Playfield::default(),
        player: Some(Vec2::new(400.0, 550.0)),
        dt: DT,
        shot_damage: PLAYER_HIT_DAMAGE,
    };
    systems::enemies::run(
        &pass,
        &mut enemies,
        &mut projectiles,
        &mut rng,
        &mut events,
        &mut buffer,
    );
    assert_eq!(enemies.len(), 1);
    assert!(events.is_empty(), "leaving the playfield is not a kill");
}

#[test]
fn test_shooter_projectile_spawns_after_interval() {
    let factory = StandardFactory::default();
    let mut enemies = EnemyRegistry::new();
    let mut projectiles = ProjectileRegistry::new();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let shooter = factory
        .create_enemy("shooter", Vec2::new(400.0, 50.0), &SpawnParams::new(), &mut rng)
        .unwrap();
    enemies.spawn(shooter);
    let mut events: Vec<EncounterEvent> = Vec::new();
    let mut buffer = Vec::new();

    let pass = EnemyPass {
        factory: &factory,
        playfield: Playfield::default(),
        player: Some(Vec2::new(400.0, 550.0)),
        dt: 0.25,
        shot_damage: PLAYER_HIT_DAMAGE,
    };
    for i in 1..=8 {
        systems::enemies::run(
            &pass,
            &mut enemies,
            &mut projectiles,
            &mut rng,
            &mut events,
            &mut buffer,
        );
        let expected = if i < 8 { 0 } else { 1 };
        assert_eq!(projectiles.len(), expected, "after pass {i}");
    }
}

// ---- Director ----

#[test]
fn test_boss_enters_and_hovers() {
    let mut director =
        EncounterDirector::new(DirectorConfig::default(), vec![boss_only_level(1, 0.0, 500.0)])
            .unwrap();
    let mut player = test_player();

    let first = director.tick(DT, &mut player);
    assert!(first
        .events
        .iter()
        .any(|e| matches!(e, EncounterEvent::BossSpawned { level: 1, .. })));

    let mut snapshot = first;
    for _ in 0..600 {
        snapshot = director.tick(DT, &mut player);
    }
    let boss = snapshot.boss.expect("boss should be alive");
    let hover_y = PLAYFIELD_HEIGHT * BOSS_HOVER_FRACTION;
    assert_eq!(boss.position.y, hover_y);
    let half = BOSS_SIZE * 0.5;
    assert!(boss.position.x >= half && boss.position.x <= PLAYFIELD_WIDTH - half);
    assert_eq!(boss.phase, 1);
}

#[test]
fn test_boss_phase_three_transition_once() {
    let mut director =
        EncounterDirector::new(DirectorConfig::default(), vec![boss_only_level(1, 0.0, 900.0)])
            .unwrap();
    let mut player = test_player();
    let mut loot: Vec<LootIntent> = Vec::new();

    director.tick(DT, &mut player);
    let boss = director.boss().expect("boss spawns on the first tick");

    // 500 / 900 sits in phase 2.
    director.damage_enemy(boss, 400.0, &mut loot);
    let snapshot = director.tick(DT, &mut player);
    assert_eq!(count_phase_changes(&snapshot, 2), 1);
    assert_eq!(snapshot.boss.as_ref().unwrap().phase, 2);

    // 270 / 900 = 0.3, below the phase 3 threshold.
    director.damage_enemy(boss, 230.0, &mut loot);
    let snapshot = director.tick(DT, &mut player);
    assert_eq!(count_phase_changes(&snapshot, 3), 1);
    assert_eq!(snapshot.boss.as_ref().unwrap().phase, 3);
    {
        let machine = director
            .enemies()
            .world()
            .get::<&PhaseMachine>(boss)
            .unwrap();
        assert_eq!(machine.current_phase(), 3);
        assert_eq!(machine.interpreter().index(), 0);
    }

    let snapshot = director.tick(DT, &mut player);
    assert_eq!(count_phase_changes(&snapshot, 3), 0);
    assert!(loot.is_empty());
}

#[test]
fn test_healed_boss_returns_to_earlier_phase() {
    let mut director =
        EncounterDirector::new(DirectorConfig::default(), vec![boss_only_level(1, 0.0, 900.0)])
            .unwrap();
    let mut player = test_player();
    let mut loot: Vec<LootIntent> = Vec::new();

    director.tick(DT, &mut player);
    let boss = director.boss().unwrap();
    director.damage_enemy(boss, 630.0, &mut loot);
    director.tick(DT, &mut player);

    assert!(director.heal_enemy(boss, 900.0));
    let snapshot = director.tick(DT, &mut player);
    assert_eq!(count_phase_changes(&snapshot, 1), 1);
    assert_eq!(snapshot.boss.unwrap().phase, 1);
}

#[test]
fn test_campaign_progression() {
    let mut director = EncounterDirector::new(
        DirectorConfig::default(),
        vec![boss_only_level(1, 0.5, 100.0), boss_only_level(2, 0.5, 100.0)],
    )
    .unwrap();
    let mut player = test_player();
    let mut loot: Vec<LootIntent> = Vec::new();

    for level in 1..=2 {
        assert_eq!(director.current_level(), level);
        let mut guard = 0;
        while director.boss().is_none() {
            director.tick(DT, &mut player);
            guard += 1;
            assert!(guard < 120, "boss {level} never spawned");
        }
        let boss = director.boss().unwrap();
        assert_eq!(
            director.damage_enemy(boss, 1000.0, &mut loot),
            DamageOutcome::Killed
        );

        let snapshot = director.tick(DT, &mut player);
        assert!(snapshot
            .events
            .contains(&EncounterEvent::BossDefeated { level }));
        assert!(snapshot
            .events
            .contains(&EncounterEvent::LevelComplete { level }));
    }

    assert_eq!(director.status(), DirectorStatus::CampaignComplete);
    assert!(director.progression().is_finished());
    assert_eq!(loot.len(), 2);

    // Frozen once complete.
    let tick = director.time().tick;
    let snapshot = director.tick(DT, &mut player);
    assert_eq!(snapshot.status, DirectorStatus::CampaignComplete);
    assert_eq!(director.time().tick, tick);
}

#[test]
fn test_progression_reports_advance() {
    let factory = StandardFactory::default();
    let mut progression = LevelProgression::new(
        vec![boss_only_level(1, 0.0, 100.0), boss_only_level(2, 0.0, 100.0)],
        &factory,
    )
    .unwrap();
    let mut enemies = EnemyRegistry::new();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut events: Vec<EncounterEvent> = Vec::new();
    let mut loot: Vec<LootIntent> = Vec::new();
    let playfield = Playfield::default();

    let (step, progress) =
        progression.advance(DT, &mut enemies, &factory, playfield, &mut rng, &mut events);
    assert!(progress.is_none());
    let boss = step.boss.unwrap();
    combat::apply_damage(&mut enemies, boss, 100.0, &mut rng, &mut events, &mut loot);
    enemies.remove(boss);

    let (_, progress) =
        progression.advance(DT, &mut enemies, &factory, playfield, &mut rng, &mut events);
    assert_eq!(progress, Some(ProgressionEvent::LevelAdvanced { from: 1, to: 2 }));
    assert_eq!(progression.current_level(), 2);
    assert_eq!(progression.index(), 1);
}

#[test]
fn test_builtin_campaign() {
    let levels = scenario::build_campaign().unwrap();
    assert_eq!(levels.len(), 5);
    let times: Vec<f32> = levels[0].spawns().iter().map(|s| s.time).collect();
    assert_eq!(times, vec![1.0, 2.0, 4.0, 7.0]);
    assert_eq!(levels[0].boss().time, 20.0);
    assert_eq!(levels[4].boss().params.get("hp"), Some(&1800.0));
    assert_eq!(
        scenario::build_level(6).unwrap_err(),
        ConfigError::UnknownLevel(6)
    );
    assert!(EncounterDirector::campaign(DirectorConfig::default()).is_ok());
}

// ---- Determinism ----

/// Play the campaign with a player that fires at the first listed enemy
/// every tenth tick; returns every snapshot serialized.
fn scripted_run(seed: u64, ticks: usize) -> Vec<String> {
    let mut director = EncounterDirector::campaign(DirectorConfig {
        seed,
        ..Default::default()
    })
    .unwrap();
    let mut player = test_player();
    let mut loot: Vec<LootIntent> = Vec::new();
    let mut out = Vec::with_capacity(ticks);
    let mut target: Option<Vec2> = None;

    for i in 0..ticks {
        if let (0, Some(position)) = (i % 10, target) {
            let shot = PlayerShot {
                bounds: Aabb::from_center(position, Vec2::new(6.0, 16.0)),
                damage: 10.0,
            };
            director.resolve_player_shots(&[shot], &mut loot);
        }
        let snapshot = director.tick(DT, &mut player);
        target = snapshot.enemies.first().map(|e| e.position);
        out.push(serde_json::to_string(&snapshot).unwrap());
    }
    out
}

#[test]
fn test_determinism_same_seed() {
    let a = scripted_run(12345, 900);
    let b = scripted_run(12345, 900);
    for (tick, (json_a, json_b)) in a.iter().zip(&b).enumerate() {
        assert_eq!(json_a, json_b, "snapshots diverged at tick {tick}");
    }
}

#[test]
fn test_determinism_different_seeds() {
    // Zigzag sway phase comes from the RNG, so seeds diverge once one spawns.
    let a = scripted_run(111, 600);
    let b = scripted_run(222, 600);
    assert!(a != b, "different seeds should produce divergent output");
}
