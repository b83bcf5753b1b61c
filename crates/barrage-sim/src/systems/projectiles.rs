//! Projectile pass: movement, hits on the player, and cleanup.

use hecs::Entity;

use barrage_core::components::Projectile;
use barrage_core::enums::ProjectileOwner;
use barrage_core::events::{EncounterEvent, EventSink};
use barrage_core::player::PlayerState;
use barrage_core::types::{Actor, Playfield};

use crate::registry::ProjectileRegistry;

/// Move every projectile, apply enemy hits to the player, and remove
/// projectiles that hit or left the playfield. Returns the number of hits.
pub fn run(
    projectiles: &mut ProjectileRegistry,
    playfield: Playfield,
    dt: f32,
    player: &mut dyn PlayerState,
    events: &mut dyn EventSink,
    despawn_buffer: &mut Vec<Entity>,
) -> u32 {
    despawn_buffer.clear();
    let player_bounds = player.bounds();
    let mut hits = 0;

    for entity in projectiles.handles() {
        let Ok((actor, projectile)) = projectiles
            .world_mut()
            .query_one_mut::<(&mut Actor, &Projectile)>(entity)
        else {
            continue;
        };
        actor.integrate(dt);
        let bounds = actor.bounds();

        if projectile.owner == ProjectileOwner::Enemy && bounds.intersects(&player_bounds) {
            player.apply_damage(projectile.damage);
            events.publish(EncounterEvent::PlayerHit {
                damage: projectile.damage,
            });
            hits += 1;
            despawn_buffer.push(entity);
        } else if playfield.has_left(&bounds, actor.velocity) {
            despawn_buffer.push(entity);
        }
    }

    if hits > 0 {
        tracing::debug!(hits, "player hit");
    }
    for entity in despawn_buffer.drain(..) {
        projectiles.remove(entity);
    }
    hits
}
