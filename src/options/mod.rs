//! Face configuration with TOML file support.
//!
//! Settings are grouped into `[screen]`, `[render]`, `[eye]` and `[idle]`
//! sections. Every section except `[screen]` uses `#[serde(default)]`, so a
//! partial file (e.g. only overriding `[eye]`) works. A `[screen]` section,
//! when present, must be complete: see [`ScreenOptions::validate`].

mod colors;
mod eye;
mod idle;
mod render;
mod screen;

use std::path::Path;

pub use colors::Color;
pub use eye::{EyeOptions, EyeShapeOptions};
pub use idle::IdleOptions;
pub use render::RenderOptions;
pub use screen::{
    GpioOptions, I2cOptions, Interface, Rotation, ScreenOptions, ScreenSpec,
    SpiOptions,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::EyesError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Display geometry and bus description.
    pub screen: ScreenOptions,
    /// Frame rate and fill colors.
    pub render: RenderOptions,
    /// Eye shapes and spacing.
    pub eye: EyeOptions,
    /// Autonomous idle behaviour.
    pub idle: IdleOptions,
}

impl Options {
    /// Generate JSON Schema describing the configuration file.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a single TOML file and validate them.
    ///
    /// Missing sections use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EyesError::Io`] if the file cannot be read, or a parse or
    /// validation error.
    pub fn load(path: &Path) -> Result<Self, EyesError> {
        let content = std::fs::read_to_string(path).map_err(EyesError::Io)?;
        let options = Self::from_toml_str(&content)?;
        log::info!("Configuration loaded from {}", path.display());
        Ok(options)
    }

    /// Load options split across a screen file and an eye/render file.
    ///
    /// A file that does not exist is replaced by defaults with a warning.
    /// Top-level sections of the second file override the first.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed, or if
    /// the merged options fail validation.
    pub fn load_split(
        screen_path: &Path,
        eye_path: &Path,
    ) -> Result<Self, EyesError> {
        let mut merged = toml::Table::new();
        for path in [screen_path, eye_path] {
            if let Some(table) = read_table(path)? {
                merged.extend(table);
            }
        }
        let options: Self = toml::Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| {
                EyesError::OptionsParse(e.to_string())
            })?;
        let _ = options.validate()?;
        Ok(options)
    }

    /// Parse and validate options from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`EyesError::OptionsParse`] for malformed TOML, or a
    /// validation error.
    pub fn from_toml_str(content: &str) -> Result<Self, EyesError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| EyesError::OptionsParse(e.to_string()))?;
        let _ = options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`EyesError::OptionsParse`] if serialization fails or
    /// [`EyesError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), EyesError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| EyesError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(EyesError::Io)?;
        }
        std::fs::write(path, content).map_err(EyesError::Io)
    }

    /// Check every section and return the resolved screen description.
    ///
    /// # Errors
    ///
    /// Returns the first section error found.
    pub fn validate(&self) -> Result<ScreenSpec, EyesError> {
        let spec = self.screen.validate()?;
        self.eye.validate()?;
        self.idle.validate()?;
        Ok(spec)
    }
}

fn read_table(path: &Path) -> Result<Option<toml::Table>, EyesError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let table = content
                .parse::<toml::Table>()
                .map_err(|e| EyesError::OptionsParse(e.to_string()))?;
            log::info!("Configuration loaded from {}", path.display());
            Ok(Some(table))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!(
                "{} not found. Using default configuration.",
                path.display()
            );
            Ok(None)
        }
        Err(e) => Err(EyesError::Io(e)),
    }
}
