use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::EyesError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
/// Parameters of the autonomous idle behaviour.
pub struct IdleOptions {
    /// Run the idle behaviour instead of a script when no script is given.
    pub enabled: bool,
    /// Shortest pause between idle actions, in milliseconds.
    pub min_pause_ms: u64,
    /// Longest pause between idle actions, in milliseconds.
    pub max_pause_ms: u64,
    /// Probability (0-1) that an idle action is a blink instead of a glance.
    pub blink_chance: f32,
    /// Fixed RNG seed for reproducible idle sequences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for IdleOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            min_pause_ms: 1_000,
            max_pause_ms: 4_000,
            blink_chance: 0.3,
            seed: None,
        }
    }
}

impl IdleOptions {
    pub(crate) fn validate(&self) -> Result<(), EyesError> {
        if self.min_pause_ms > self.max_pause_ms {
            return Err(EyesError::InvalidValue {
                field: "idle.min_pause_ms",
                reason: format!(
                    "{} is larger than idle.max_pause_ms ({})",
                    self.min_pause_ms, self.max_pause_ms
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.blink_chance) {
            return Err(EyesError::InvalidValue {
                field: "idle.blink_chance",
                reason: format!("{} is not a probability", self.blink_chance),
            });
        }
        Ok(())
    }
}
