//! Error types for dotfield.
//!
//! The simulation core itself cannot fail. The only fallible surface is
//! building a [`Mask`](crate::mask::Mask) from external image data.

use std::fmt;

/// Errors that can occur while loading or constructing a mask.
#[derive(Debug)]
pub enum MaskError {
    /// Failed to decode the image file.
    ImageLoad(image::ImageError),
    /// Failed to read the file from disk.
    Io(std::io::Error),
    /// Sample buffer length does not match `width * height`.
    SizeMismatch {
        width: u32,
        height: u32,
        len: usize,
    },
    /// Mask has zero width or height.
    Empty,
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskError::ImageLoad(e) => write!(f, "Failed to decode mask image: {}", e),
            MaskError::Io(e) => write!(f, "Failed to read mask file: {}", e),
            MaskError::SizeMismatch { width, height, len } => write!(
                f,
                "Mask sample buffer has {} entries, expected {}x{} = {}",
                len,
                width,
                height,
                *width as usize * *height as usize
            ),
            MaskError::Empty => write!(f, "Mask has zero width or height"),
        }
    }
}

impl std::error::Error for MaskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MaskError::ImageLoad(e) => Some(e),
            MaskError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for MaskError {
    fn from(e: image::ImageError) -> Self {
        MaskError::ImageLoad(e)
    }
}

impl From<std::io::Error> for MaskError {
    fn from(e: std::io::Error) -> Self {
        MaskError::Io(e)
    }
}
