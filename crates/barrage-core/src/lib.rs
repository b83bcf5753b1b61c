//! Core types and definitions for the BARRAGE encounter director.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, events, player/loot interfaces, snapshots,
//! tuning constants, and configuration errors.
//! It has no dependency on the ECS or any runtime framework.

pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod player;
pub mod state;
pub mod types;
