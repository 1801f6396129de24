use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::EyesError;
use crate::geometry::MIN_EYE_SIZE;

/// Base shape of one eye.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema,
)]
#[serde(default)]
pub struct EyeShapeOptions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels when fully open.
    pub height: u32,
    /// Corner radius in pixels.
    pub roundness: u32,
}

impl Default for EyeShapeOptions {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            roundness: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(default)]
/// Eye shapes and spacing.
pub struct EyeOptions {
    /// Horizontal gap between the eyes in pixels.
    pub distance: u32,
    /// Left eye shape.
    pub left: EyeShapeOptions,
    /// Right eye shape.
    pub right: EyeShapeOptions,
}

impl Default for EyeOptions {
    fn default() -> Self {
        Self {
            distance: 10,
            left: EyeShapeOptions::default(),
            right: EyeShapeOptions::default(),
        }
    }
}

impl EyeOptions {
    pub(crate) fn validate(&self) -> Result<(), EyesError> {
        for (field, shape) in
            [("eye.left", &self.left), ("eye.right", &self.right)]
        {
            if shape.width < MIN_EYE_SIZE as u32
                || shape.height < MIN_EYE_SIZE as u32
            {
                return Err(EyesError::InvalidValue {
                    field,
                    reason: format!(
                        "eye must be at least {MIN_EYE_SIZE}px, got {}x{}",
                        shape.width, shape.height
                    ),
                });
            }
        }
        Ok(())
    }
}
