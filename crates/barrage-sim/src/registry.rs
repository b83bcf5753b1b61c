//! Entity registries.
//!
//! Each registry exclusively owns its entities in a private hecs world.
//! Update passes iterate [`EnemyRegistry::handles`] (a snapshot taken at the
//! start of the pass) and defer removals to the end of the pass, so entities
//! spawned mid-pass are first updated on the following tick.

use glam::Vec2;
use hecs::{Entity, World};

use barrage_core::components::{BossMarker, Health, Projectile, TypeTag};
use barrage_core::constants::{PROJECTILE_HEIGHT, PROJECTILE_WIDTH};
use barrage_core::enums::ProjectileOwner;
use barrage_core::events::FireIntent;
use barrage_core::types::{Aabb, Actor};

use crate::factory::{Enemy, EnemyBrain};

/// Every live enemy, bosses included.
#[derive(Default)]
pub struct EnemyRegistry {
    world: World,
}

/// Every live projectile.
#[derive(Default)]
pub struct ProjectileRegistry {
    world: World,
}

impl EnemyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an enemy. Regular enemies carry their `Behavior`; bosses carry
    /// a `BossMarker` and their `PhaseMachine`.
    pub fn spawn(&mut self, enemy: Enemy) -> Entity {
        let Enemy {
            enemy_type,
            kind,
            actor,
            health,
            reward,
            brain,
        } = enemy;
        let tag = TypeTag(enemy_type);
        match brain {
            EnemyBrain::Regular(behavior) => {
                self.world.spawn((actor, health, reward, tag, kind, behavior))
            }
            EnemyBrain::Boss {
                level,
                hover_y,
                machine,
            } => self.world.spawn((
                actor,
                health,
                reward,
                tag,
                kind,
                BossMarker { level, hover_y },
                machine,
            )),
        }
    }

    /// Returns false if the entity was already gone.
    pub fn remove(&mut self, entity: Entity) -> bool {
        self.world.despawn(entity).is_ok()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    /// Snapshot of live handles for one update pass.
    pub fn handles(&self) -> Vec<Entity> {
        self.world.iter().map(|entity| entity.entity()).collect()
    }

    /// Whether any boss-tagged enemy is alive.
    pub fn has_boss(&self) -> bool {
        self.boss().is_some()
    }

    pub fn boss(&self) -> Option<Entity> {
        self.world
            .query::<&BossMarker>()
            .iter()
            .next()
            .map(|(entity, _)| entity)
    }

    /// Present and not yet at zero health.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.world
            .get::<&Health>(entity)
            .is_ok_and(|health| !health.is_depleted())
    }

    pub fn health(&self, entity: Entity) -> Option<Health> {
        self.world.get::<&Health>(entity).ok().map(|health| *health)
    }

    pub fn position(&self, entity: Entity) -> Option<Vec2> {
        self.world.get::<&Actor>(entity).ok().map(|actor| actor.position)
    }

    pub fn bounds(&self, entity: Entity) -> Option<Aabb> {
        self.world.get::<&Actor>(entity).ok().map(|actor| actor.bounds())
    }

    pub fn enemy_type(&self, entity: Entity) -> Option<String> {
        self.world.get::<&TypeTag>(entity).ok().map(|tag| tag.0.clone())
    }

    /// Read-only access for queries (snapshots, tests).
    pub fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

impl ProjectileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, intent: FireIntent, owner: ProjectileOwner, damage: f32) -> Entity {
        let actor = Actor::new(
            intent.origin,
            Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
        )
        .with_velocity(intent.velocity);
        self.world.spawn((actor, Projectile { owner, damage }))
    }

    pub fn remove(&mut self, entity: Entity) -> bool {
        self.world.despawn(entity).is_ok()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    pub fn handles(&self) -> Vec<Entity> {
        self.world.iter().map(|entity| entity.entity()).collect()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
