//! Boss phase state machine.
//!
//! The active phase is a pure function of the boss's current health ratio.
//! There is no ratchet and no hysteresis: healing back above a threshold
//! returns the boss to the earlier phase.

use std::sync::Arc;

use barrage_core::error::PhaseError;

use crate::interpreter::{PatternContext, PatternInterpreter, PatternOutput};
use crate::pattern::Pattern;

/// A phase: selected while the health ratio is at or below `threshold`
/// (and no higher-ranked phase also matches).
#[derive(Debug, Clone)]
pub struct BossPhase {
    pub rank: u32,
    pub threshold: f32,
    pub pattern: Arc<Pattern>,
}

/// Validated phases ordered by rank 1..N with strictly decreasing thresholds.
#[derive(Debug, Clone)]
pub struct PhaseTable {
    phases: Vec<BossPhase>,
}

/// A phase switch produced by [`PhaseMachine::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: u32,
    pub to: u32,
}

/// Current phase plus the interpreter running that phase's pattern.
#[derive(Debug, Clone)]
pub struct PhaseMachine {
    table: PhaseTable,
    current: u32,
    interpreter: PatternInterpreter,
}

impl BossPhase {
    pub fn new(rank: u32, threshold: f32, pattern: Pattern) -> Self {
        Self {
            rank,
            threshold,
            pattern: Arc::new(pattern),
        }
    }
}

impl PhaseTable {
    pub fn new(phases: Vec<BossPhase>) -> Result<Self, PhaseError> {
        let first = phases.first().ok_or(PhaseError::NoPhases)?;
        if first.rank != 1 {
            return Err(PhaseError::FirstPhaseRank(first.rank));
        }
        for phase in &phases {
            if !(0.0..=1.0).contains(&phase.threshold) {
                return Err(PhaseError::ThresholdOutOfRange {
                    rank: phase.rank,
                    threshold: phase.threshold,
                });
            }
        }
        for pair in phases.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.rank != prev.rank + 1 {
                return Err(PhaseError::RanksNotSequential {
                    previous: prev.rank,
                    next: next.rank,
                });
            }
            if next.threshold >= prev.threshold {
                return Err(PhaseError::ThresholdsNotDecreasing {
                    rank: next.rank,
                    threshold: next.threshold,
                });
            }
        }
        Ok(Self { phases })
    }

    /// Highest-ranked phase whose threshold is at or above `ratio`; phase 1 otherwise.
    pub fn select(&self, ratio: f32) -> u32 {
        self.phases
            .iter()
            .rev()
            .find(|phase| ratio <= phase.threshold)
            .map_or(1, |phase| phase.rank)
    }

    /// Phase by rank. Ranks are 1-based and contiguous.
    pub fn phase(&self, rank: u32) -> Option<&BossPhase> {
        let index = rank.checked_sub(1)? as usize;
        self.phases.get(index)
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}

impl PhaseMachine {
    /// Start in phase 1.
    pub fn new(table: PhaseTable) -> Self {
        let pattern = Arc::clone(&table.phases[0].pattern);
        Self {
            table,
            current: 1,
            interpreter: PatternInterpreter::new(pattern),
        }
    }

    pub fn current_phase(&self) -> u32 {
        self.current
    }

    pub fn table(&self) -> &PhaseTable {
        &self.table
    }

    pub fn interpreter(&self) -> &PatternInterpreter {
        &self.interpreter
    }

    /// Re-evaluate the phase for `health_ratio`. On a change, the interpreter
    /// is replaced by a fresh one bound to the new phase's pattern.
    pub fn update(&mut self, health_ratio: f32) -> Option<PhaseTransition> {
        let selected = self.table.select(health_ratio);
        if selected == self.current {
            return None;
        }
        let phase = self.table.phase(selected)?;
        self.interpreter = PatternInterpreter::new(Arc::clone(&phase.pattern));
        let transition = PhaseTransition {
            from: self.current,
            to: selected,
        };
        self.current = selected;
        Some(transition)
    }

    /// Phase re-evaluation followed by one interpreter step.
    pub fn step(
        &mut self,
        health_ratio: f32,
        ctx: &PatternContext,
        dt: f32,
    ) -> (Option<PhaseTransition>, PatternOutput) {
        let transition = self.update(health_ratio);
        let output = self.interpreter.update(ctx, dt);
        (transition, output)
    }
}
