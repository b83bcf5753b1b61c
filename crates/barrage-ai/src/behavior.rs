//! Regular enemy behavior variants.
//!
//! Every variant shares one contract: given the frame's `dt` and the
//! player's position (if any), move the actor and optionally request a shot.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use barrage_core::constants::*;
use barrage_core::enums::EnemyKind;
use barrage_core::events::FireIntent;
use barrage_core::types::Actor;

use crate::aim::aim_direction;

/// Per-enemy movement and firing state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum Behavior {
    Straight {
        speed: f32,
    },
    Zigzag {
        speed: f32,
        amplitude: f32,
        /// Angular frequency (rad/s).
        frequency: f32,
        phase: f32,
        /// x the sway oscillates around.
        anchor_x: f32,
        elapsed: f32,
    },
    Homing {
        accel: f32,
        max_speed: f32,
    },
    Shooter {
        speed: f32,
        fire_rate: f32,
        /// Seconds until the next shot is allowed.
        cooldown: f32,
        bullet_speed: f32,
    },
}

impl Behavior {
    pub fn straight(speed: f32) -> Self {
        Self::Straight { speed }
    }

    /// Zigzag with a random starting phase so neighbours don't sway in lockstep.
    pub fn zigzag<R: Rng + ?Sized>(speed: f32, anchor_x: f32, amplitude: f32, rng: &mut R) -> Self {
        Self::Zigzag {
            speed,
            amplitude,
            frequency: ZIGZAG_FREQUENCY,
            phase: rng.gen_range(0.0..TAU),
            anchor_x,
            elapsed: 0.0,
        }
    }

    pub fn homing() -> Self {
        Self::Homing {
            accel: HOMING_ACCEL,
            max_speed: HOMING_MAX_SPEED,
        }
    }

    /// Shooter whose first shot comes one full interval after spawning.
    pub fn shooter(speed: f32) -> Self {
        Self::Shooter {
            speed,
            fire_rate: SHOOTER_FIRE_RATE,
            cooldown: SHOOTER_FIRE_RATE,
            bullet_speed: SHOOTER_BULLET_SPEED,
        }
    }

    pub fn kind(&self) -> EnemyKind {
        match self {
            Self::Straight { .. } => EnemyKind::Straight,
            Self::Zigzag { .. } => EnemyKind::Zigzag,
            Self::Homing { .. } => EnemyKind::Homing,
            Self::Shooter { .. } => EnemyKind::Shooter,
        }
    }

    /// Advance one frame. Moves `actor` and returns a shot request if one is due.
    pub fn update(&mut self, actor: &mut Actor, dt: f32, player: Option<Vec2>) -> Option<FireIntent> {
        match self {
            Behavior::Straight { speed } => {
                actor.velocity = Vec2::new(0.0, *speed);
                actor.integrate(dt);
                None
            }
            Behavior::Zigzag {
                speed,
                amplitude,
                frequency,
                phase,
                anchor_x,
                elapsed,
            } => {
                *elapsed += dt;
                let angle = *elapsed * *frequency + *phase;
                actor.position.x = *anchor_x + angle.sin() * *amplitude;
                actor.position.y += *speed * dt;
                actor.velocity = Vec2::new(angle.cos() * *amplitude * *frequency, *speed);
                None
            }
            Behavior::Homing { accel, max_speed } => {
                if let Some(dir) = player.and_then(|target| aim_direction(actor.position, target)) {
                    actor.velocity = (actor.velocity + dir * *accel * dt).clamp_length_max(*max_speed);
                }
                actor.integrate(dt);
                None
            }
            Behavior::Shooter {
                speed,
                fire_rate,
                cooldown,
                bullet_speed,
            } => {
                actor.velocity = Vec2::new(0.0, *speed);
                actor.integrate(dt);

                *cooldown = (*cooldown - dt).max(0.0);
                if *cooldown > 0.0 {
                    return None;
                }
                // Stays loaded until there is a target to aim at.
                let dir = player.and_then(|target| aim_direction(actor.position, target))?;
                *cooldown = *fire_rate;
                Some(FireIntent {
                    origin: actor.position,
                    velocity: dir * *bullet_speed,
                })
            }
        }
    }
}
