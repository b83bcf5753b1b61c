//! Combat resolution: damage, death, and the score/loot/event pipeline.
//!
//! Dead enemies stay in the registry with zero health until the end of the
//! pass that killed them; every test here skips them, so an enemy dies
//! exactly once.

use hecs::Entity;
use rand::{Rng, RngCore};

use barrage_core::components::{BossMarker, Health, Reward};
use barrage_core::enums::{BonusKind, GENERIC_BONUSES};
use barrage_core::events::{EncounterEvent, EventSink, LootSink};
use barrage_core::player::PlayerShot;
use barrage_core::types::Actor;

use crate::registry::EnemyRegistry;

/// Result of one damage application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// No such enemy.
    Missing,
    /// Already at zero health; nothing happened.
    AlreadyDead,
    Damaged { remaining: f32 },
    /// Health reached zero on this hit. The caller removes the entity.
    Killed,
}

/// Reduce an enemy's health, clamping at zero. On the killing hit, runs
/// the death pipeline: `enemy_killed`, one drop roll, loot, and for bosses
/// `boss_defeated`.
pub fn apply_damage(
    enemies: &mut EnemyRegistry,
    entity: Entity,
    amount: f32,
    rng: &mut dyn RngCore,
    events: &mut dyn EventSink,
    loot: &mut dyn LootSink,
) -> DamageOutcome {
    let world = enemies.world_mut();
    let Ok(mut health) = world.get::<&mut Health>(entity) else {
        return DamageOutcome::Missing;
    };
    if health.is_depleted() {
        return DamageOutcome::AlreadyDead;
    }

    health.current = (health.current - amount.max(0.0)).max(0.0);
    if !health.is_depleted() {
        return DamageOutcome::Damaged {
            remaining: health.current,
        };
    }
    drop(health);

    let position = world
        .get::<&Actor>(entity)
        .map(|actor| actor.position)
        .unwrap_or_default();
    let reward = world.get::<&Reward>(entity).map(|reward| *reward).ok();
    let boss_level = world.get::<&BossMarker>(entity).ok().map(|marker| marker.level);

    let score = reward.map_or(0, |reward| reward.score);
    let drop_chance = reward.map_or(0.0, |reward| reward.drop_chance);
    events.publish(EncounterEvent::EnemyKilled { score, position });

    let roll: f32 = rng.gen();
    match boss_level {
        Some(level) => {
            loot.spawn_bonus(position, BonusKind::LevelReward(level));
            events.publish(EncounterEvent::BossDefeated { level });
            tracing::info!(level, score, "boss defeated");
        }
        None if roll < drop_chance => {
            let bonus = GENERIC_BONUSES[rng.gen_range(0..GENERIC_BONUSES.len())];
            loot.spawn_bonus(position, bonus);
            tracing::debug!(score, ?bonus, roll, "enemy killed, loot dropped");
        }
        None => {
            tracing::debug!(score, roll, "enemy killed");
        }
    }

    DamageOutcome::Killed
}

/// Raise an enemy's health, capped at its max. Dead enemies stay dead.
pub fn heal(enemies: &mut EnemyRegistry, entity: Entity, amount: f32) -> bool {
    let Ok(mut health) = enemies.world_mut().get::<&mut Health>(entity) else {
        return false;
    };
    if health.is_depleted() {
        return false;
    }
    health.current = (health.current + amount.max(0.0)).min(health.max);
    true
}

/// Hit-test each player shot against the live enemies, applying the shot's
/// damage to the first one it overlaps. Returns which shots were consumed.
///
/// Killed enemies are removed once every shot has been resolved.
pub fn resolve_player_shots(
    shots: &[PlayerShot],
    enemies: &mut EnemyRegistry,
    rng: &mut dyn RngCore,
    events: &mut dyn EventSink,
    loot: &mut dyn LootSink,
    despawn_buffer: &mut Vec<Entity>,
) -> Vec<bool> {
    despawn_buffer.clear();
    let handles = enemies.handles();

    let mut consumed = Vec::with_capacity(shots.len());
    for shot in shots {
        let target = handles.iter().copied().find(|&entity| {
            enemies.is_alive(entity)
                && enemies
                    .bounds(entity)
                    .is_some_and(|bounds| bounds.intersects(&shot.bounds))
        });
        let Some(entity) = target else {
            consumed.push(false);
            continue;
        };
        if apply_damage(enemies, entity, shot.damage, rng, events, loot) == DamageOutcome::Killed {
            despawn_buffer.push(entity);
        }
        consumed.push(true);
    }

    for entity in despawn_buffer.drain(..) {
        enemies.remove(entity);
    }
    consumed
}
