//! Snapshot system: queries both registries and builds a DirectorSnapshot.
//!
//! Read-only: never modifies either registry.

use hecs::World;

use barrage_ai::phase::PhaseMachine;
use barrage_core::components::*;
use barrage_core::enums::*;
use barrage_core::events::EncounterEvent;
use barrage_core::state::*;
use barrage_core::types::{Actor, SimTime};

use crate::level::LevelRun;
use crate::registry::{EnemyRegistry, ProjectileRegistry};

/// Build a complete DirectorSnapshot from the current registries.
pub fn build_snapshot(
    enemies: &EnemyRegistry,
    projectiles: &ProjectileRegistry,
    time: &SimTime,
    status: DirectorStatus,
    run: &LevelRun,
    events: Vec<EncounterEvent>,
) -> DirectorSnapshot {
    DirectorSnapshot {
        time: *time,
        status,
        level: run.level(),
        level_elapsed_secs: run.elapsed(),
        enemies: build_enemies(enemies.world()),
        projectiles: build_projectiles(projectiles.world()),
        boss: build_boss(enemies.world()),
        events,
    }
}

/// EnemyView list in entity order.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<(u32, EnemyView)> = world
        .query::<(&TypeTag, &EnemyKind, &Actor, &Health)>()
        .iter()
        .map(|(entity, (tag, kind, actor, health))| {
            (
                entity.id(),
                EnemyView {
                    enemy_type: tag.0.clone(),
                    kind: *kind,
                    position: actor.position,
                    health: health.current,
                    max_health: health.max,
                },
            )
        })
        .collect();

    enemies.sort_by_key(|(id, _)| *id);
    enemies.into_iter().map(|(_, view)| view).collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<(u32, ProjectileView)> = world
        .query::<(&Actor, &Projectile)>()
        .iter()
        .map(|(entity, (actor, projectile))| {
            (
                entity.id(),
                ProjectileView {
                    position: actor.position,
                    velocity: actor.velocity,
                    owner: projectile.owner,
                },
            )
        })
        .collect();

    projectiles.sort_by_key(|(id, _)| *id);
    projectiles.into_iter().map(|(_, view)| view).collect()
}

/// Boss bar for the live boss, if any.
fn build_boss(world: &World) -> Option<BossView> {
    world
        .query::<(&BossMarker, &PhaseMachine, &Actor, &Health)>()
        .iter()
        .next()
        .map(|(_, (marker, machine, actor, health))| BossView {
            level: marker.level,
            phase: machine.current_phase(),
            health_ratio: health.ratio(),
            position: actor.position,
        })
}
