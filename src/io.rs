//! Image loading/saving and grayscale conversion helpers.
//!
//! The engines operate on in-memory buffers; these helpers are the thin I/O
//! layer the higher-level entry points use for file-path texture sources.
//! Load/save failures surface as `Io`/`Image` errors and propagate unchanged
//! through the engine call chain.

use std::path::Path;

use image::{ColorType, DynamicImage, GrayImage, ImageReader};
use tracing::debug;

use crate::error::{ChanPackError, Result};

/// Loads and decodes an image from disk.
///
/// Fails with `NotFound` when the path does not exist; decode failures
/// surface as `Image` errors.
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ChanPackError::NotFound(path.to_path_buf()));
    }
    let image = ImageReader::open(path)?.decode()?;
    debug!(path = %path.display(), width = image.width(), height = image.height(), "loaded image");
    Ok(image)
}

/// Saves an image to disk, inferring the format from the file extension.
///
/// Parent directories are created as needed. Fails with `InvalidInput` when
/// the extension is missing or unrecognized.
pub fn save_image(image: &DynamicImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if image::ImageFormat::from_path(path).is_err() {
        return Err(ChanPackError::InvalidInput(format!(
            "cannot determine image format from path '{}'",
            path.display()
        )));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    image.save(path)?;
    debug!(path = %path.display(), "saved image");
    Ok(())
}

/// Reads an image's dimensions and color type.
pub fn image_info(path: impl AsRef<Path>) -> Result<(u32, u32, ColorType)> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ChanPackError::NotFound(path.to_path_buf()));
    }
    let image = ImageReader::open(path)?.decode()?;
    Ok((image.width(), image.height(), image.color()))
}

/// Converts a decoded image to a single-channel 8-bit buffer.
/// RGB/RGBA sources are luma-converted; grayscale sources pass through.
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    image.to_luma8()
}

/// Wraps a grayscale buffer back into a decoded-image value.
pub fn from_grayscale(buffer: GrayImage) -> DynamicImage {
    DynamicImage::ImageLuma8(buffer)
}

/// Converts a u8 buffer (0-255) to normalized f32 samples (0.0-1.0),
/// row-major.
pub fn buffer_to_f32(buffer: &GrayImage) -> Vec<f32> {
    buffer.as_raw().iter().map(|&v| v as f32 / 255.0).collect()
}

/// Builds a u8 buffer from normalized f32 samples, clipping to [0, 255].
///
/// Fails with `InvalidInput` when `samples` does not hold exactly
/// `width * height` values.
pub fn buffer_from_f32(width: u32, height: u32, samples: &[f32]) -> Result<GrayImage> {
    let expected = (width as usize) * (height as usize);
    if samples.len() != expected {
        return Err(ChanPackError::InvalidInput(format!(
            "expected {expected} samples for a {width}x{height} buffer, got {}",
            samples.len()
        )));
    }
    let pixels: Vec<u8> = samples
        .iter()
        .map(|&v| (v * 255.0).clamp(0.0, 255.0) as u8)
        .collect();
    GrayImage::from_raw(width, height, pixels).ok_or_else(|| {
        ChanPackError::InvalidInput(format!("cannot build a {width}x{height} buffer"))
    })
}
