//! Image buffer and file output.
//!
//! The buffer holds raw linear colors. Gamma correction and clamping happen
//! only when converting to 8-bit output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::bucket::BucketResult;
use crate::Color;

/// Errors raised while writing an image to disk.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output extension '{0}' (expected .ppm or .png)")]
    UnsupportedFormat(String),
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let to_byte = |c: f64| (255.0 * linear_to_gamma(c).clamp(0.0, 1.0)).round() as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Linear pixels in row-major order, top row first.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let b = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % b.width;
            let local_y = i as u32 / b.width;
            self.set(b.x + local_x, b.y + local_y, *color);
        }
    }

    /// Convert to gamma-corrected RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }

    /// Write as an ASCII PPM (P3).
    pub fn write_ppm<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "255")?;

        for color in &self.pixels {
            let [r, g, b] = color_to_rgb(*color);
            writeln!(writer, "{r} {g} {b}")?;
        }

        Ok(())
    }

    /// Save to `path`, choosing PPM or PNG by extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "ppm" => {
                let mut writer = BufWriter::new(File::create(path)?);
                self.write_ppm(&mut writer)?;
                writer.flush()?;
            }
            "png" => {
                image::save_buffer(
                    path,
                    &self.to_rgb8(),
                    self.width,
                    self.height,
                    image::ColorType::Rgb8,
                )?;
            }
            other => return Err(OutputError::UnsupportedFormat(other.to_string())),
        }

        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}
