use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Color;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
/// Render loop pacing and default fill colors.
pub struct RenderOptions {
    /// Target frames (and animation ticks) per second. 0 = unlimited.
    pub fps: u32,
    /// Background fill on color panels.
    #[schemars(with = "String")]
    pub background_color: Color,
    /// Eye fill on color panels.
    #[schemars(with = "String")]
    pub eye_color: Color,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fps: 30,
            background_color: Color::BLACK,
            eye_color: Color::WHITE,
        }
    }
}
