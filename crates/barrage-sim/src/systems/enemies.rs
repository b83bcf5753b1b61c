//! Enemy update pass: behaviors, boss phases and patterns, boss entry,
//! firing, summons, and removal below the bottom edge.

use glam::Vec2;
use hecs::Entity;
use rand::RngCore;

use barrage_ai::behavior::Behavior;
use barrage_ai::interpreter::{PatternContext, PatternOutput};
use barrage_ai::phase::PhaseMachine;
use barrage_core::components::{BossMarker, Health};
use barrage_core::constants::BOSS_DESCEND_SPEED;
use barrage_core::enums::ProjectileOwner;
use barrage_core::events::{EncounterEvent, EventSink, FireIntent, SpawnIntent};
use barrage_core::types::{Actor, Playfield};

use crate::factory::{EnemyFactory, SpawnParams};
use crate::registry::{EnemyRegistry, ProjectileRegistry};

/// Shared per-tick inputs.
pub struct EnemyPass<'a> {
    pub factory: &'a dyn EnemyFactory,
    pub playfield: Playfield,
    pub player: Option<Vec2>,
    pub dt: f32,
    /// Damage carried by projectiles fired this pass.
    pub shot_damage: f32,
}

/// Run one update over the enemies alive at the start of the pass.
///
/// Projectiles and summoned enemies requested during the pass are created
/// after it, so they are first updated next tick.
pub fn run(
    pass: &EnemyPass,
    enemies: &mut EnemyRegistry,
    projectiles: &mut ProjectileRegistry,
    rng: &mut dyn RngCore,
    events: &mut dyn EventSink,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();
    let mut fire: Vec<FireIntent> = Vec::new();
    let mut summons: Vec<SpawnIntent> = Vec::new();

    for entity in enemies.handles() {
        let Ok((actor, health, behavior, boss)) = enemies.world_mut().query_one_mut::<(
            &mut Actor,
            &Health,
            Option<&mut Behavior>,
            Option<(&BossMarker, &mut PhaseMachine)>,
        )>(entity) else {
            continue;
        };
        if health.is_depleted() {
            continue;
        }

        if let Some(behavior) = behavior {
            fire.extend(behavior.update(actor, pass.dt, pass.player));
            if matches!(behavior, Behavior::Zigzag { .. }) {
                actor.position.x = pass.playfield.clamp_x(actor.position.x, actor.size.x);
            }
        } else if let Some((marker, machine)) = boss {
            let out = step_boss(pass, actor, health.ratio(), marker, machine, events);
            fire.extend(out.fire);
            summons.extend(out.summons);
        }

        if pass.playfield.is_below(&actor.bounds()) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        tracing::debug!(?entity, "enemy left the playfield");
        enemies.remove(entity);
    }

    for intent in fire {
        projectiles.spawn(intent, ProjectileOwner::Enemy, pass.shot_damage);
    }

    let params = SpawnParams::new();
    for intent in summons {
        match pass
            .factory
            .create_enemy(&intent.enemy_type, intent.position, &params, rng)
        {
            Ok(enemy) => {
                tracing::debug!(enemy_type = %intent.enemy_type, x = intent.position.x, "minion summoned");
                enemies.spawn(enemy);
            }
            Err(err) => {
                tracing::warn!(enemy_type = %intent.enemy_type, %err, "summon dropped");
            }
        }
    }
}

/// One boss update: phase re-evaluation, pattern step, entry descent to the
/// hover line, and horizontal clamping.
fn step_boss(
    pass: &EnemyPass,
    actor: &mut Actor,
    health_ratio: f32,
    marker: &BossMarker,
    machine: &mut PhaseMachine,
    events: &mut dyn EventSink,
) -> PatternOutput {
    let ctx = PatternContext {
        position: actor.position,
        player: pass.player,
        playfield: pass.playfield,
    };
    let (transition, out) = machine.step(health_ratio, &ctx, pass.dt);
    if let Some(transition) = transition {
        tracing::info!(
            level = marker.level,
            from = transition.from,
            to = transition.to,
            health_ratio,
            "boss phase changed"
        );
        events.publish(EncounterEvent::PhaseChanged {
            phase: transition.to,
        });
    }

    if let Some(vx) = out.velocity_x {
        actor.velocity.x = vx;
    }
    actor.velocity.y = if actor.position.y < marker.hover_y {
        BOSS_DESCEND_SPEED
    } else {
        0.0
    };
    actor.integrate(pass.dt);
    actor.position.y = actor.position.y.min(marker.hover_y);
    actor.position.x = pass.playfield.clamp_x(actor.position.x, actor.size.x);
    out
}
