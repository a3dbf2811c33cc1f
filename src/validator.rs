//! Structural checks run before packing/unpacking work proceeds.
//!
//! All functions are pure: they either return a value or a typed error, and
//! never log, mutate, or warn.

use image::{DynamicImage, GenericImageView, GrayImage};

use crate::error::{ChanPackError, Result};

/// Returns true iff every image shares the same (width, height).
///
/// Fails with `InvalidInput` on an empty slice.
pub fn check_resolution_match(images: &[DynamicImage]) -> Result<bool> {
    if images.is_empty() {
        return Err(ChanPackError::InvalidInput(
            "images list cannot be empty".into(),
        ));
    }
    let reference = images[0].dimensions();
    Ok(images.iter().all(|img| img.dimensions() == reference))
}

/// The componentwise maximum (width, height) over all images.
///
/// Width and height are maximized independently, so the result may not match
/// any single input's resolution.
pub fn get_max_resolution(images: &[DynamicImage]) -> Result<(u32, u32)> {
    if images.is_empty() {
        return Err(ChanPackError::InvalidInput(
            "images list cannot be empty".into(),
        ));
    }
    let max_width = images.iter().map(|img| img.width()).max().unwrap_or(0);
    let max_height = images.iter().map(|img| img.height()).max().unwrap_or(0);
    Ok((max_width, max_height))
}

/// Validates a channel buffer for packing.
///
/// Fails with `InvalidChannelData` when the buffer is zero-sized (unless
/// `allow_empty`) or when `expected` is given and the dimensions differ.
pub fn validate_channel_data(
    buffer: &GrayImage,
    expected: Option<(u32, u32)>,
    allow_empty: bool,
) -> Result<()> {
    let (w, h) = buffer.dimensions();
    if (w == 0 || h == 0) && !allow_empty {
        return Err(ChanPackError::InvalidChannelData(
            "channel data cannot be empty (zero-sized buffer)".into(),
        ));
    }
    if let Some((ew, eh)) = expected
        && (w, h) != (ew, eh)
    {
        return Err(ChanPackError::InvalidChannelData(format!(
            "channel data size {w}x{h} does not match expected size {ew}x{eh}"
        )));
    }
    Ok(())
}

/// Validates a slot-ordered list of optional images and returns the common
/// resolution of the present entries.
///
/// `None` entries stand for channels that will be default-filled. Fails with
/// `InvalidInput` when the list is empty, every entry is `None`, or
/// `require_all` is set and any entry is `None`; fails with
/// `ResolutionMismatch` when present entries disagree.
pub fn validate_images_for_packing(
    images: &[Option<DynamicImage>],
    require_all: bool,
) -> Result<(u32, u32)> {
    if images.is_empty() {
        return Err(ChanPackError::InvalidInput(
            "images list cannot be empty".into(),
        ));
    }
    let present: Vec<&DynamicImage> = images.iter().flatten().collect();
    if present.is_empty() {
        return Err(ChanPackError::InvalidInput(
            "at least one image must be provided".into(),
        ));
    }
    if require_all && present.len() != images.len() {
        let missing = images.len() - present.len();
        return Err(ChanPackError::InvalidInput(format!(
            "all images are required, but {missing} image(s) are missing"
        )));
    }
    let reference = present[0].dimensions();
    if present.iter().any(|img| img.dimensions() != reference) {
        let resolutions: Vec<(u32, u32)> = present.iter().map(|img| img.dimensions()).collect();
        return Err(ChanPackError::ResolutionMismatch(format!(
            "all images must have the same resolution, found: {resolutions:?}"
        )));
    }
    Ok(reference)
}

/// Buffer counterpart of [`validate_images_for_packing`].
///
/// Each present buffer is structurally validated; disagreeing shapes fail
/// with `ResolutionMismatch`.
pub fn validate_buffers_for_packing(
    buffers: &[Option<&GrayImage>],
    require_all: bool,
) -> Result<(u32, u32)> {
    if buffers.is_empty() {
        return Err(ChanPackError::InvalidInput(
            "buffers list cannot be empty".into(),
        ));
    }
    let present: Vec<&GrayImage> = buffers.iter().filter_map(|b| *b).collect();
    if present.is_empty() {
        return Err(ChanPackError::InvalidInput(
            "at least one buffer must be provided".into(),
        ));
    }
    if require_all && present.len() != buffers.len() {
        let missing = buffers.len() - present.len();
        return Err(ChanPackError::InvalidInput(format!(
            "all buffers are required, but {missing} buffer(s) are missing"
        )));
    }
    for (i, buffer) in buffers.iter().enumerate() {
        if let Some(buffer) = buffer {
            validate_channel_data(buffer, None, false).map_err(|e| {
                ChanPackError::InvalidChannelData(format!("buffer at index {i} is invalid: {e}"))
            })?;
        }
    }
    let reference = present[0].dimensions();
    if present.iter().any(|b| b.dimensions() != reference) {
        let shapes: Vec<(u32, u32)> = present.iter().map(|b| b.dimensions()).collect();
        return Err(ChanPackError::ResolutionMismatch(format!(
            "all buffers must have the same size, found: {shapes:?}"
        )));
    }
    Ok(reference)
}
