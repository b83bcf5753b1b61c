//! Firing geometry: aim vectors and volley direction fans.
//!
//! Every function returns unit vectors; callers scale by projectile speed.

use std::f32::consts::TAU;

use glam::Vec2;

use barrage_core::constants::MIN_AIM_DISTANCE;

/// Unit vector from `from` toward `to`, or `None` when the points coincide.
pub fn aim_direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    if delta.length() < MIN_AIM_DISTANCE {
        return None;
    }
    Some(delta.normalize())
}

/// `count` directions spread evenly across `spread` radians, centered on `center`.
/// A single bullet goes straight down the center line.
pub fn cone_directions(center: Vec2, count: u32, spread: f32) -> Vec<Vec2> {
    let base = center.y.atan2(center.x);
    if count <= 1 {
        return vec![Vec2::from_angle(base)];
    }
    let step = spread / (count - 1) as f32;
    let start = base - spread * 0.5;
    (0..count)
        .map(|i| Vec2::from_angle(start + step * i as f32))
        .collect()
}

/// `count` directions evenly spaced around the full circle, starting at +x.
pub fn circle_directions(count: u32) -> Vec<Vec2> {
    (0..count)
        .map(|i| Vec2::from_angle(TAU * i as f32 / count as f32))
        .collect()
}
