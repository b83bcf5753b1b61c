//! Fundamental geometric and simulation types.
//!
//! Screen space: x grows to the right, y grows downward. The playfield
//! spans `[0, width] x [0, height]`; enemies enter from the top.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

/// Visible play area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

/// A moving game object: position (center), velocity, and fixed size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub position: Vec2,
    /// Units per second.
    pub velocity: Vec2,
    pub size: Vec2,
}

/// Director clock.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks processed.
    pub tick: u64,
    /// Elapsed time in seconds.
    pub elapsed_secs: f64,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap test; boxes that only touch on an edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center_x(&self) -> f32 {
        self.width * 0.5
    }

    /// Box has left through the bottom edge.
    pub fn is_below(&self, bounds: &Aabb) -> bool {
        bounds.min.y > self.height
    }

    /// Box is outside the playfield on a side it is moving away from.
    /// A box above the top edge that is still heading down has not left.
    pub fn has_left(&self, bounds: &Aabb, velocity: Vec2) -> bool {
        bounds.min.y > self.height
            || (bounds.max.y < 0.0 && velocity.y <= 0.0)
            || (bounds.max.x < 0.0 && velocity.x <= 0.0)
            || (bounds.min.x > self.width && velocity.x >= 0.0)
    }

    /// Clamp a center x so a box of `width` stays inside horizontally.
    pub fn clamp_x(&self, x: f32, width: f32) -> f32 {
        let half = width * 0.5;
        if self.width <= width {
            return self.center_x();
        }
        x.clamp(half, self.width - half)
    }
}

impl Actor {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.size)
    }

    /// position += velocity * dt
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt as f64;
    }
}
