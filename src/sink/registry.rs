use rustc_hash::FxHashMap;

use super::{DisplaySink, NetpbmSink, NullSink, TerminalSink};
use crate::error::EyesError;
use crate::options::ScreenSpec;

/// Builds a sink from a validated screen description.
pub type DriverConstructor =
    fn(&ScreenSpec) -> Result<Box<dyn DisplaySink>, EyesError>;

/// Maps driver identifiers (the `screen.driver` field) to constructors.
///
/// Panel drivers for real buses live outside this crate and are added with
/// [`register`](Self::register).
#[derive(Clone)]
pub struct DriverRegistry {
    drivers: FxHashMap<String, DriverConstructor>,
}

impl DriverRegistry {
    /// A registry with no drivers.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            drivers: FxHashMap::default(),
        }
    }

    /// A registry with the built-in `terminal`, `netpbm` and `null` drivers.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::empty();
        let _ = registry.register("terminal", |spec| {
            Ok(Box::new(TerminalSink::stdout(spec)))
        });
        let _ = registry.register("netpbm", |spec| {
            Ok(Box::new(NetpbmSink::from_spec(spec)))
        });
        let _ = registry.register("null", |spec| {
            Ok(Box::new(NullSink::new(
                spec.width,
                spec.height,
                spec.color_mode,
            )))
        });
        registry
    }

    /// Add or replace a driver. Returns the replaced constructor.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        constructor: DriverConstructor,
    ) -> Option<DriverConstructor> {
        self.drivers.insert(name.into(), constructor)
    }

    /// Whether a driver with this name is known.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.drivers.contains_key(name)
    }

    /// Registered driver names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> =
            self.drivers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Construct the sink named by `spec.driver`.
    ///
    /// # Errors
    ///
    /// Returns [`EyesError::UnsupportedDriver`] for unknown names, or the
    /// constructor's own error.
    pub fn create(
        &self,
        spec: &ScreenSpec,
    ) -> Result<Box<dyn DisplaySink>, EyesError> {
        let constructor = self
            .drivers
            .get(&spec.driver)
            .ok_or_else(|| EyesError::UnsupportedDriver(spec.driver.clone()))?;
        let sink = constructor(spec)?;
        log::info!(
            "Initialized {} screen with driver {} ({}x{})",
            spec.kind,
            spec.driver,
            sink.width(),
            sink.height()
        );
        Ok(sink)
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl std::fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverRegistry")
            .field("drivers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ScreenOptions;
    use crate::sink::ColorMode;

    fn spec_for(driver: &str) -> ScreenSpec {
        let mut spec = ScreenOptions::default().validate().unwrap();
        spec.driver = driver.to_owned();
        spec
    }

    #[test]
    fn builtin_drivers_are_registered() {
        let registry = DriverRegistry::with_builtin();
        assert_eq!(registry.names(), vec!["netpbm", "null", "terminal"]);
        let sink = registry.create(&spec_for("null")).unwrap();
        assert_eq!((sink.width(), sink.height()), (128, 64));
        assert_eq!(sink.color_mode(), ColorMode::Monochrome);
    }

    #[test]
    fn unknown_driver_is_a_typed_error() {
        let registry = DriverRegistry::with_builtin();
        let err = registry.create(&spec_for("ssd1306")).err().unwrap();
        assert!(
            matches!(err, EyesError::UnsupportedDriver(ref name) if name == "ssd1306")
        );
    }

    #[test]
    fn downstream_drivers_can_be_registered() {
        let mut registry = DriverRegistry::empty();
        assert!(!registry.contains("ssd1306"));
        let replaced = registry.register("ssd1306", |spec| {
            Ok(Box::new(NullSink::new(spec.width, 32, ColorMode::Monochrome)))
        });
        assert!(replaced.is_none());
        let sink = registry.create(&spec_for("ssd1306")).unwrap();
        assert_eq!(sink.height(), 32);
    }
}
