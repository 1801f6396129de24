use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::EyesError;
use crate::sink::ColorMode;

/// I2C bus address and port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(default)]
pub struct I2cOptions {
    /// Device address, decimal or `0x` hex (e.g. `"0x3c"`).
    pub address: String,
    /// Bus number (`/dev/i2c-N`).
    #[serde(alias = "i2c_port")]
    pub port: u8,
}

impl Default for I2cOptions {
    fn default() -> Self {
        Self {
            address: "0x3c".to_owned(),
            port: 1,
        }
    }
}

impl I2cOptions {
    /// Parse the configured address.
    ///
    /// # Errors
    ///
    /// Returns [`EyesError::InvalidValue`] if the address is not a decimal
    /// or `0x`-prefixed hex number that fits in 16 bits.
    pub fn address_value(&self) -> Result<u16, EyesError> {
        let text = self.address.trim();
        let parsed = match text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
        {
            Some(hex) => u16::from_str_radix(hex, 16),
            None => text.parse::<u16>(),
        };
        parsed.map_err(|e| EyesError::InvalidValue {
            field: "screen.i2c.address",
            reason: format!("'{}': {e}", self.address),
        })
    }
}

/// SPI bus selection.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema,
)]
#[serde(default)]
pub struct SpiOptions {
    /// SPI controller number.
    #[serde(alias = "spi_port")]
    pub port: u8,
    /// Chip-select line on the controller.
    #[serde(alias = "spi_device")]
    pub device: u8,
    /// Clock speed in Hz.
    #[serde(alias = "spi_bus_speed")]
    pub bus_speed: u32,
}

impl Default for SpiOptions {
    fn default() -> Self {
        Self {
            port: 0,
            device: 0,
            bus_speed: 8_000_000,
        }
    }
}

/// Auxiliary GPIO pins used by SPI panels.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    JsonSchema,
)]
#[serde(default)]
pub struct GpioOptions {
    /// Data/command select pin.
    #[serde(alias = "gpio_data_command", skip_serializing_if = "Option::is_none")]
    pub data_command: Option<u8>,
    /// Reset pin.
    #[serde(alias = "gpio_reset", skip_serializing_if = "Option::is_none")]
    pub reset: Option<u8>,
    /// Backlight enable pin.
    #[serde(alias = "gpio_backlight", skip_serializing_if = "Option::is_none")]
    pub backlight: Option<u8>,
    /// Chip-select pin.
    #[serde(alias = "gpio_chip_select", skip_serializing_if = "Option::is_none")]
    pub chip_select: Option<u8>,
}

/// Raw `[screen]` section as written in the configuration file.
///
/// Required fields are optional here so that their absence can be reported
/// precisely by [`validate`](Self::validate).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ScreenOptions {
    /// Panel family (`oled`, `lcd`, `virtual`, ...). Informational.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Driver identifier looked up in the driver registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    /// Canvas width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Canvas height in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Output rotation in quarter turns (0-3).
    #[serde(default)]
    pub rotate: u8,
    /// Pixel format of the panel.
    #[serde(default)]
    pub mode: ColorMode,
    /// Bus the panel is attached to (`i2c`, `spi`, `virtual`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    /// Output file for file-backed drivers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// I2C parameters, required when `interface = "i2c"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub i2c: Option<I2cOptions>,
    /// SPI parameters, required when `interface = "spi"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spi: Option<SpiOptions>,
    /// GPIO pin assignments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpio: Option<GpioOptions>,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            kind: Some("virtual".to_owned()),
            driver: Some("terminal".to_owned()),
            width: Some(128),
            height: Some(64),
            rotate: 0,
            mode: ColorMode::Monochrome,
            interface: Some("virtual".to_owned()),
            output: None,
            i2c: None,
            spi: None,
            gpio: None,
        }
    }
}

/// Output rotation applied by sinks when presenting a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    /// No rotation.
    #[default]
    None,
    /// 90 degrees clockwise.
    Quarter,
    /// 180 degrees.
    Half,
    /// 270 degrees clockwise.
    ThreeQuarter,
}

impl Rotation {
    /// Number of clockwise quarter turns.
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Quarter => 1,
            Self::Half => 2,
            Self::ThreeQuarter => 3,
        }
    }
}

/// Bus description resolved from `[screen]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interface {
    /// I2C panel.
    I2c {
        /// Parsed device address.
        address: u16,
        /// Bus number.
        port: u8,
    },
    /// SPI panel.
    Spi(SpiOptions),
    /// No physical bus (terminal, file, null sinks).
    Virtual,
}

/// Validated screen description handed to driver constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenSpec {
    /// Panel family.
    pub kind: String,
    /// Driver identifier.
    pub driver: String,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Output rotation.
    pub rotation: Rotation,
    /// Pixel format.
    pub color_mode: ColorMode,
    /// Bus description.
    pub interface: Interface,
    /// Output file for file-backed drivers.
    pub output: Option<PathBuf>,
    /// GPIO pin assignments.
    pub gpio: Option<GpioOptions>,
}

impl ScreenSpec {
    /// Backlight pin, if the panel has one.
    #[must_use]
    pub fn backlight_pin(&self) -> Option<u8> {
        self.gpio.and_then(|g| g.backlight)
    }
}

impl ScreenOptions {
    /// Check required fields and resolve the interface sub-section.
    ///
    /// # Errors
    ///
    /// Returns [`EyesError::MissingField`] for absent required fields,
    /// [`EyesError::MissingInterfaceSection`] when the bus sub-section is
    /// missing, [`EyesError::UnsupportedInterface`] for unknown interfaces
    /// and [`EyesError::InvalidValue`] for out-of-range values.
    pub fn validate(&self) -> Result<ScreenSpec, EyesError> {
        let kind = required(self.kind.as_ref(), "screen.type")?;
        let driver = required(self.driver.as_ref(), "screen.driver")?;
        let width = *required(self.width.as_ref(), "screen.width")?;
        let height = *required(self.height.as_ref(), "screen.height")?;
        let interface_name =
            required(self.interface.as_ref(), "screen.interface")?;

        if width == 0 || height == 0 {
            return Err(EyesError::InvalidValue {
                field: "screen.width",
                reason: format!("screen must not be empty ({width}x{height})"),
            });
        }

        let rotation = match self.rotate {
            0 => Rotation::None,
            1 => Rotation::Quarter,
            2 => Rotation::Half,
            3 => Rotation::ThreeQuarter,
            other => {
                return Err(EyesError::InvalidValue {
                    field: "screen.rotate",
                    reason: format!("expected 0-3 quarter turns, got {other}"),
                })
            }
        };

        let interface = match interface_name.as_str() {
            "i2c" => {
                let i2c = self
                    .i2c
                    .as_ref()
                    .ok_or(EyesError::MissingInterfaceSection("i2c"))?;
                Interface::I2c {
                    address: i2c.address_value()?,
                    port: i2c.port,
                }
            }
            "spi" => Interface::Spi(
                self.spi.ok_or(EyesError::MissingInterfaceSection("spi"))?,
            ),
            "virtual" => Interface::Virtual,
            other => {
                return Err(EyesError::UnsupportedInterface(other.to_owned()))
            }
        };

        Ok(ScreenSpec {
            kind: kind.clone(),
            driver: driver.clone(),
            width,
            height,
            rotation,
            color_mode: self.mode,
            interface,
            output: self.output.clone(),
            gpio: self.gpio,
        })
    }
}

fn required<'a, T>(
    value: Option<&'a T>,
    field: &'static str,
) -> Result<&'a T, EyesError> {
    value.ok_or(EyesError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i2c_address_accepts_hex_and_decimal() {
        let hex = I2cOptions {
            address: "0x3D".to_owned(),
            port: 1,
        };
        assert_eq!(hex.address_value().unwrap(), 0x3d);
        let dec = I2cOptions {
            address: "60".to_owned(),
            port: 1,
        };
        assert_eq!(dec.address_value().unwrap(), 60);
        let bad = I2cOptions {
            address: "zz".to_owned(),
            port: 1,
        };
        assert!(bad.address_value().is_err());
    }

    #[test]
    fn rotation_out_of_range_is_rejected() {
        let screen = ScreenOptions {
            rotate: 4,
            ..ScreenOptions::default()
        };
        assert!(matches!(
            screen.validate(),
            Err(EyesError::InvalidValue {
                field: "screen.rotate",
                ..
            })
        ));
    }

    #[test]
    fn spi_keys_accept_prefixed_aliases() {
        let screen: ScreenOptions = toml::from_str(
            r#"
type = "lcd"
driver = "netpbm"
width = 240
height = 240
mode = "RGB"
interface = "spi"

[spi]
spi_port = 0
spi_device = 1
spi_bus_speed = 52000000

[gpio]
gpio_data_command = 25
gpio_backlight = 18
"#,
        )
        .unwrap();
        let spec = screen.validate().unwrap();
        assert_eq!(spec.color_mode, ColorMode::Color);
        assert_eq!(
            spec.interface,
            Interface::Spi(SpiOptions {
                port: 0,
                device: 1,
                bus_speed: 52_000_000
            })
        );
        assert_eq!(spec.backlight_pin(), Some(18));
    }
}
