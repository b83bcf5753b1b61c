//! Encounter director for BARRAGE.
//!
//! Owns the hecs-backed enemy and projectile registries, schedules level
//! spawns, runs the per-tick systems, and produces `DirectorSnapshot`s for
//! the HUD.

pub mod combat;
pub mod engine;
pub mod factory;
pub mod level;
pub mod registry;
pub mod scenario;
pub mod systems;

pub use barrage_core as core;
pub use engine::{DirectorConfig, EncounterDirector};

#[cfg(test)]
mod tests;
