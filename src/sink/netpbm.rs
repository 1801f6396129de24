use std::path::{Path, PathBuf};

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

use super::{ColorMode, DisplaySink};
use crate::error::EyesError;
use crate::options::{Rotation, ScreenSpec};
use crate::renderer::Frame;

/// Writes every frame to a Netpbm image file, replacing the previous one.
///
/// Monochrome panels produce binary PBM (`P4`), color panels binary PPM
/// (`P6`). The file is written next to its final path and renamed into
/// place so viewers never observe a half-written image.
#[derive(Debug)]
pub struct NetpbmSink {
    path: PathBuf,
    width: u32,
    height: u32,
    mode: ColorMode,
    rotation: Rotation,
}

impl NetpbmSink {
    /// Sink writing to `spec.output`, or `robo-eyes.pbm`/`.ppm` by default.
    #[must_use]
    pub fn from_spec(spec: &ScreenSpec) -> Self {
        let path = spec.output.clone().unwrap_or_else(|| {
            PathBuf::from(match spec.color_mode {
                ColorMode::Monochrome => "robo-eyes.pbm",
                ColorMode::Color => "robo-eyes.ppm",
            })
        });
        Self {
            path,
            width: spec.width,
            height: spec.height,
            mode: spec.color_mode,
            rotation: spec.rotation,
        }
    }

    /// Output path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Encode a frame as binary PBM. In PBM a set bit is a black pixel.
#[must_use]
pub fn encode_pbm(frame: &Frame) -> Vec<u8> {
    let mut bytes =
        format!("P4\n{} {}\n", frame.width(), frame.height()).into_bytes();
    let row_bytes = frame.width().div_ceil(8) as usize;
    for row in frame.rows() {
        let mut packed = vec![0_u8; row_bytes];
        for (x, pixel) in row.iter().enumerate() {
            if *pixel == Rgb888::BLACK {
                packed[x / 8] |= 0x80 >> (x % 8);
            }
        }
        bytes.extend_from_slice(&packed);
    }
    bytes
}

/// Encode a frame as binary PPM.
#[must_use]
pub fn encode_ppm(frame: &Frame) -> Vec<u8> {
    let mut bytes = format!("P6\n{} {}\n255\n", frame.width(), frame.height())
        .into_bytes();
    for row in frame.rows() {
        for pixel in row {
            bytes.extend_from_slice(&[pixel.r(), pixel.g(), pixel.b()]);
        }
    }
    bytes
}

impl DisplaySink for NetpbmSink {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color_mode(&self) -> ColorMode {
        self.mode
    }

    fn display(&mut self, frame: &Frame) -> Result<(), EyesError> {
        let rotated = frame.rotated(self.rotation);
        let bytes = match self.mode {
            ColorMode::Monochrome => encode_pbm(&rotated),
            ColorMode::Color => encode_ppm(&rotated),
        };
        let staging = self.path.with_extension("tmp");
        std::fs::write(&staging, bytes)
            .and_then(|()| std::fs::rename(&staging, &self.path))
            .map_err(EyesError::Sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pbm_packs_black_as_set_bits() {
        let mut frame = Frame::new(10, 1, Rgb888::WHITE);
        frame.set_pixel(0, 0, Rgb888::BLACK);
        frame.set_pixel(9, 0, Rgb888::BLACK);
        let bytes = encode_pbm(&frame);
        let header = b"P4\n10 1\n";
        assert_eq!(&bytes[..header.len()], header);
        assert_eq!(&bytes[header.len()..], &[0b1000_0000, 0b0100_0000]);
    }

    #[test]
    fn ppm_writes_raw_channels() {
        let frame = Frame::new(1, 1, Rgb888::new(1, 2, 3));
        let bytes = encode_ppm(&frame);
        assert!(bytes.starts_with(b"P6\n1 1\n255\n"));
        assert_eq!(&bytes[bytes.len() - 3..], &[1, 2, 3]);
    }

    #[test]
    fn writes_file_in_place() {
        let path = std::env::temp_dir()
            .join(format!("robo-eyes-sink-{}.pbm", std::process::id()));
        let spec = ScreenSpec {
            kind: "virtual".to_owned(),
            driver: "netpbm".to_owned(),
            width: 8,
            height: 2,
            rotation: Rotation::None,
            color_mode: ColorMode::Monochrome,
            interface: crate::options::Interface::Virtual,
            output: Some(path.clone()),
            gpio: None,
        };
        let mut sink = NetpbmSink::from_spec(&spec);
        sink.display(&Frame::new(8, 2, Rgb888::BLACK)).unwrap();
        let written = std::fs::read(sink.path()).unwrap();
        assert_eq!(written, b"P4\n8 2\n\xff\xff");
        std::fs::remove_file(&path).unwrap();
    }
}
