//! Sampled masks for filtering the particle lattice.
//!
//! A mask is a single 8-bit channel covering the same logical region as the
//! particle grid. Lattice points whose sample is darker than the grid's
//! threshold become particles, which turns an image silhouette into a
//! dot-matrix pattern.
//!
//! # Example
//!
//! ```ignore
//! let mask = Mask::from_file("assets/logo.png", MaskChannel::Luma)?;
//! let grid = ParticleGrid::build(&GridConfig::default(), Some(&mask));
//! ```

use std::path::Path;

use image::{DynamicImage, RgbaImage};

use crate::error::MaskError;

/// Which channel of an RGBA image the mask samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskChannel {
    /// Perceptual luminance (default).
    #[default]
    Luma,
    /// Red channel only.
    Red,
    /// Alpha channel. Transparent pixels read as dark.
    Alpha,
}

/// A 2D field of 8-bit samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl Mask {
    /// Create a mask from one sample per pixel, row-major.
    pub fn from_samples(samples: Vec<u8>, width: u32, height: u32) -> Result<Self, MaskError> {
        if width == 0 || height == 0 {
            return Err(MaskError::Empty);
        }
        if samples.len() != width as usize * height as usize {
            return Err(MaskError::SizeMismatch {
                width,
                height,
                len: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Create a mask from raw RGBA pixel data (4 bytes per pixel).
    pub fn from_rgba(
        data: Vec<u8>,
        width: u32,
        height: u32,
        channel: MaskChannel,
    ) -> Result<Self, MaskError> {
        let len = data.len();
        let img = RgbaImage::from_raw(width, height, data).ok_or(MaskError::SizeMismatch {
            width,
            height,
            len: len / 4,
        })?;
        Self::from_image(&DynamicImage::ImageRgba8(img), channel)
    }

    /// Create a mask from a decoded image.
    pub fn from_image(img: &DynamicImage, channel: MaskChannel) -> Result<Self, MaskError> {
        let (width, height) = (img.width(), img.height());
        let samples = match channel {
            MaskChannel::Luma => img.to_luma8().into_raw(),
            MaskChannel::Red => img.to_rgba8().pixels().map(|p| p.0[0]).collect(),
            MaskChannel::Alpha => img.to_rgba8().pixels().map(|p| p.0[3]).collect(),
        };
        Self::from_samples(samples, width, height)
    }

    /// Load a mask from an image file (PNG or JPEG).
    pub fn from_file<P: AsRef<Path>>(path: P, channel: MaskChannel) -> Result<Self, MaskError> {
        let bytes = std::fs::read(path.as_ref())?;
        let img = image::load_from_memory(&bytes)?;
        Self::from_image(&img, channel)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample at integer pixel coordinates.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.samples
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Sample at a point of a `region_width x region_height` region that the
    /// mask is stretched over.
    ///
    /// Returns `None` for points outside the region.
    pub fn sample_scaled(&self, x: f32, y: f32, region_width: f32, region_height: f32) -> Option<u8> {
        if region_width <= 0.0 || region_height <= 0.0 {
            return None;
        }
        if x < 0.0 || y < 0.0 || x >= region_width || y >= region_height {
            return None;
        }
        let mx = ((x / region_width) * self.width as f32).floor() as u32;
        let my = ((y / region_height) * self.height as f32).floor() as u32;
        self.get(mx.min(self.width - 1), my.min(self.height - 1))
    }
}
