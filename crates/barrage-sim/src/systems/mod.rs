//! Per-tick systems over the enemy and projectile registries.
//!
//! Systems are plain functions over explicitly passed state. Each pass
//! iterates a handle snapshot and removes entities only after the pass.

pub mod enemies;
pub mod projectiles;
pub mod snapshot;
