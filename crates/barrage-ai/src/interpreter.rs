//! Pattern interpreter: steps a boss through its pattern's timed actions.
//!
//! Each update advances the clock, moves the cursor when the current action
//! runs out, and dispatches the current action. One-shot actions (every
//! shooting action and summons) are armed when their pass begins and fire
//! once; the interpreter never fires the same pass twice, whatever the frame
//! rate. A shot with no valid aim stays armed and is retried next frame.

use std::f32::consts::TAU;
use std::sync::Arc;

use glam::Vec2;

use barrage_core::constants::*;
use barrage_core::events::{FireIntent, SpawnIntent};
use barrage_core::types::Playfield;

use crate::aim::{aim_direction, circle_directions, cone_directions};
use crate::pattern::{Pattern, PatternAction};

/// What the interpreter sees of the world.
pub struct PatternContext {
    /// Boss center.
    pub position: Vec2,
    pub player: Option<Vec2>,
    pub playfield: Playfield,
}

/// Requests produced by one update.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PatternOutput {
    /// New horizontal velocity, when the action steers.
    pub velocity_x: Option<f32>,
    pub fire: Vec<FireIntent>,
    pub summons: Vec<SpawnIntent>,
}

/// Cursor over a pattern. One per (boss, active phase).
#[derive(Debug, Clone)]
pub struct PatternInterpreter {
    pattern: Arc<Pattern>,
    index: usize,
    time_in_action: f32,
    total_elapsed: f32,
    /// The current pass's one-shot has not gone off yet.
    armed: bool,
}

impl PatternInterpreter {
    pub fn new(pattern: Arc<Pattern>) -> Self {
        Self {
            pattern,
            index: 0,
            time_in_action: 0.0,
            total_elapsed: 0.0,
            armed: true,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn time_in_action(&self) -> f32 {
        self.time_in_action
    }

    pub fn total_elapsed(&self) -> f32 {
        self.total_elapsed
    }

    pub fn current_action(&self) -> &PatternAction {
        &self.pattern.actions()[self.index]
    }

    /// Back to the first action with a fresh clock.
    pub fn reset(&mut self) {
        self.index = 0;
        self.time_in_action = 0.0;
        self.total_elapsed = 0.0;
        self.armed = true;
    }

    /// Advance by `dt` and dispatch the current action.
    pub fn update(&mut self, ctx: &PatternContext, dt: f32) -> PatternOutput {
        self.total_elapsed += dt;
        self.time_in_action += dt;

        if self.time_in_action >= self.current_action().duration() {
            self.next_action();
        }

        let pattern = Arc::clone(&self.pattern);
        let action = &pattern.actions()[self.index];
        let t = self.time_in_action / action.duration();

        let mut out = PatternOutput::default();
        if action.is_one_shot() && !self.armed {
            return out;
        }
        match action {
            PatternAction::MoveSine { amplitude, .. } => {
                out.velocity_x = Some(sine_pursuit(ctx, *amplitude, t));
            }
            PatternAction::ShootSingle { .. } => {
                if let Some(dir) = aim_at_player(ctx) {
                    out.fire.push(fire(ctx.position, dir, SINGLE_SHOT_SPEED));
                    self.armed = false;
                }
            }
            PatternAction::ShootCone { bullet_count, .. } => {
                if let Some(dir) = aim_at_player(ctx) {
                    out.fire.extend(
                        cone_directions(dir, *bullet_count, CONE_SPREAD)
                            .into_iter()
                            .map(|d| fire(ctx.position, d, CONE_SHOT_SPEED)),
                    );
                    self.armed = false;
                }
            }
            PatternAction::ShootCircle { bullet_count, .. } => {
                out.fire.extend(
                    circle_directions(*bullet_count)
                        .into_iter()
                        .map(|d| fire(ctx.position, d, CIRCLE_SHOT_SPEED)),
                );
                self.armed = false;
            }
            PatternAction::Summon {
                enemy_type, count, ..
            } => {
                out.summons = summon_positions(ctx, *count)
                    .into_iter()
                    .map(|position| SpawnIntent {
                        enemy_type: enemy_type.clone(),
                        position,
                    })
                    .collect();
                self.armed = false;
            }
        }
        out
    }

    /// Move to the next action: wrap when looping, otherwise replay the last one.
    fn next_action(&mut self) {
        let last = self.pattern.len() - 1;
        if self.index < last {
            self.index += 1;
        } else if self.pattern.looping() {
            self.index = 0;
        }
        self.time_in_action = 0.0;
        self.armed = true;
    }
}

fn aim_at_player(ctx: &PatternContext) -> Option<Vec2> {
    let player = ctx.player?;
    let dir = aim_direction(ctx.position, player);
    if dir.is_none() {
        tracing::debug!(x = ctx.position.x, y = ctx.position.y, "aim degenerate, shot held");
    }
    dir
}

fn fire(origin: Vec2, dir: Vec2, speed: f32) -> FireIntent {
    FireIntent {
        origin,
        velocity: dir * speed,
    }
}

/// Spring-like horizontal velocity toward a sinusoidal target around the center.
fn sine_pursuit(ctx: &PatternContext, amplitude: f32, t: f32) -> f32 {
    let half_width = ctx.playfield.width * 0.5;
    let target = ctx.playfield.center_x() + (t * TAU).sin() * amplitude * half_width;
    ((target - ctx.position.x) * PURSUIT_GAIN).clamp(-PURSUIT_MAX_SPEED, PURSUIT_MAX_SPEED)
}

/// Summon points fanned out below the boss; points off the playfield are dropped.
fn summon_positions(ctx: &PatternContext, count: u32) -> Vec<Vec2> {
    (0..count)
        .map(|i| {
            let along = (i as f32 + 0.5) / count as f32;
            let dx = -SUMMON_SPREAD_X + 2.0 * SUMMON_SPREAD_X * along;
            let dy = if i % 2 == 0 {
                SUMMON_MIN_OFFSET_Y
            } else {
                SUMMON_MAX_OFFSET_Y
            };
            ctx.position + Vec2::new(dx, dy)
        })
        .filter(|p| p.x > 0.0 && p.x < ctx.playfield.width)
        .collect()
}
