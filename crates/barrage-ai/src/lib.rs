//! Enemy and boss decision logic for BARRAGE.
//!
//! Implements the regular enemy behavior variants, the timed pattern
//! interpreter that scripts boss movement and fire, and the health-driven
//! boss phase machine. No ECS dependency; everything operates on plain data.

pub mod aim;
pub mod behavior;
pub mod interpreter;
pub mod pattern;
pub mod phase;
pub mod presets;
pub mod profiles;

pub use barrage_core as core;
