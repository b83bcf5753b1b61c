//! Declarative boss patterns: ordered, timed action lists.
//!
//! A [`Pattern`] is immutable once built; runtime cursor state lives in
//! [`crate::interpreter::PatternInterpreter`].

use serde::{Deserialize, Serialize};

use barrage_core::error::PatternError;

/// Action kinds accepted in serialized patterns.
pub const ACTION_KINDS: [&str; 5] = [
    "move_sine",
    "shoot_single",
    "shoot_cone",
    "shoot_circle",
    "summon",
];

/// One timed step of a pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PatternAction {
    /// Sweep horizontally around the playfield center.
    /// `amplitude` is a fraction of the half-width.
    MoveSine { duration: f32, amplitude: f32 },
    /// One shot aimed at the player.
    ShootSingle { duration: f32 },
    /// A fan of shots centered on the player.
    ShootCone { duration: f32, bullet_count: u32 },
    /// A ring of shots, independent of the player.
    ShootCircle { duration: f32, bullet_count: u32 },
    /// Call in `count` regular enemies around the boss.
    Summon {
        duration: f32,
        enemy_type: String,
        count: u32,
    },
}

/// Ordered action list plus loop flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PatternDef", into = "PatternDef")]
pub struct Pattern {
    actions: Vec<PatternAction>,
    looping: bool,
}

/// Unvalidated wire form of a pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternDef {
    pub actions: Vec<PatternAction>,
    #[serde(default = "default_looping")]
    pub looping: bool,
}

fn default_looping() -> bool {
    true
}

impl PatternAction {
    pub fn duration(&self) -> f32 {
        match self {
            Self::MoveSine { duration, .. }
            | Self::ShootSingle { duration }
            | Self::ShootCone { duration, .. }
            | Self::ShootCircle { duration, .. }
            | Self::Summon { duration, .. } => *duration,
        }
    }

    /// Whether the action does its work once per activation.
    pub fn is_one_shot(&self) -> bool {
        !matches!(self, Self::MoveSine { .. })
    }

    fn validate(&self, index: usize) -> Result<(), PatternError> {
        let duration = self.duration();
        if !duration.is_finite() || duration <= 0.0 {
            return Err(PatternError::NonPositiveDuration { index, duration });
        }
        match self {
            Self::ShootCone { bullet_count: 0, .. } | Self::ShootCircle { bullet_count: 0, .. } => {
                Err(PatternError::ZeroBulletCount { index })
            }
            Self::Summon { count: 0, .. } => Err(PatternError::ZeroSummonCount { index }),
            _ => Ok(()),
        }
    }
}

impl Pattern {
    /// Build a validated pattern. Rejects empty lists, non-positive
    /// durations, and volleys of zero bullets.
    pub fn new(actions: Vec<PatternAction>, looping: bool) -> Result<Self, PatternError> {
        if actions.is_empty() {
            return Err(PatternError::EmptyActionList);
        }
        for (index, action) in actions.iter().enumerate() {
            action.validate(index)?;
        }
        Ok(Self { actions, looping })
    }

    /// Parse `{"actions": [{"type": "...", ...}], "looping": bool}`.
    ///
    /// Unknown `type` values are reported as [`PatternError::UnknownActionKind`].
    pub fn from_json(json: &str) -> Result<Self, PatternError> {
        let raw: serde_json::Value =
            serde_json::from_str(json).map_err(|e| PatternError::Malformed(e.to_string()))?;
        if let Some(actions) = raw.get("actions").and_then(|a| a.as_array()) {
            for action in actions {
                let kind = action.get("type").and_then(|k| k.as_str()).unwrap_or_default();
                if !ACTION_KINDS.contains(&kind) {
                    return Err(PatternError::UnknownActionKind(kind.to_string()));
                }
            }
        }
        let def: PatternDef =
            serde_json::from_value(raw).map_err(|e| PatternError::Malformed(e.to_string()))?;
        Self::try_from(def)
    }

    pub fn actions(&self) -> &[PatternAction] {
        &self.actions
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Always false for a constructed pattern.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl TryFrom<PatternDef> for Pattern {
    type Error = PatternError;

    fn try_from(def: PatternDef) -> Result<Self, Self::Error> {
        Pattern::new(def.actions, def.looping)
    }
}

impl From<Pattern> for PatternDef {
    fn from(pattern: Pattern) -> Self {
        PatternDef {
            actions: pattern.actions,
            looping: pattern.looping,
        }
    }
}
