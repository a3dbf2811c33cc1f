//! Packing engine: combines up to four grayscale channel buffers into one
//! RGB or RGBA image, with resolution normalization and template-driven
//! default fills.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::PathBuf;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use tracing::{debug, instrument};

use crate::error::{ChanPackError, Result};
use crate::io::{load_image, to_grayscale};
use crate::template::{PackingTemplate, Slot};
use crate::validator::validate_channel_data;

/// Fallback output resolution when a template is packed with no source
/// textures at all (every used slot default-filled).
pub const DEFAULT_RESOLUTION: (u32, u32) = (1024, 1024);

/// One texture input for template-driven packing, resolved at the entry
/// boundary rather than by runtime type inspection.
#[derive(Debug, Clone)]
pub enum TextureSource {
    /// A file on disk; loaded and converted to grayscale.
    Path(PathBuf),
    /// A decoded image; converted to grayscale.
    Image(DynamicImage),
    /// A raw single-channel buffer; validated and used as-is, no implicit
    /// grayscale conversion.
    Buffer(GrayImage),
}

impl From<PathBuf> for TextureSource {
    fn from(path: PathBuf) -> Self {
        TextureSource::Path(path)
    }
}

impl From<&str> for TextureSource {
    fn from(path: &str) -> Self {
        TextureSource::Path(PathBuf::from(path))
    }
}

impl From<String> for TextureSource {
    fn from(path: String) -> Self {
        TextureSource::Path(PathBuf::from(path))
    }
}

impl From<DynamicImage> for TextureSource {
    fn from(image: DynamicImage) -> Self {
        TextureSource::Image(image)
    }
}

impl From<GrayImage> for TextureSource {
    fn from(buffer: GrayImage) -> Self {
        TextureSource::Buffer(buffer)
    }
}

/// Resizes every buffer to `target` (width, height) using bilinear
/// interpolation. Buffers already at the target size are borrowed through
/// unchanged; the same filter applies whether scaling up or down.
///
/// Fails with `InvalidInput` on an empty list or non-positive target.
pub fn normalize_resolution<'a>(
    buffers: &[&'a GrayImage],
    target: (u32, u32),
) -> Result<Vec<Cow<'a, GrayImage>>> {
    if buffers.is_empty() {
        return Err(ChanPackError::InvalidInput(
            "buffers list cannot be empty".into(),
        ));
    }
    let (tw, th) = target;
    if tw == 0 || th == 0 {
        return Err(ChanPackError::InvalidInput(format!(
            "invalid target size {tw}x{th}: dimensions must be positive"
        )));
    }
    let mut normalized = Vec::with_capacity(buffers.len());
    for buffer in buffers {
        validate_channel_data(buffer, None, false)?;
        if buffer.dimensions() == (tw, th) {
            normalized.push(Cow::Borrowed(*buffer));
        } else {
            normalized.push(Cow::Owned(imageops::resize(
                *buffer,
                tw,
                th,
                FilterType::Triangle,
            )));
        }
    }
    Ok(normalized)
}

/// Packs up to four grayscale buffers into one RGB/RGBA image.
///
/// At least one channel must be provided. Buffers of differing sizes are
/// normalized to the componentwise maximum (width, height) over all provided
/// buffers. Missing R/G/B planes are zero-filled; the output is RGBA iff an
/// alpha buffer was provided.
#[instrument(skip_all)]
pub fn pack_channels(
    r: Option<&GrayImage>,
    g: Option<&GrayImage>,
    b: Option<&GrayImage>,
    a: Option<&GrayImage>,
) -> Result<DynamicImage> {
    let slots = [r, g, b, a];
    let present: Vec<&GrayImage> = slots.iter().filter_map(|s| *s).collect();
    if present.is_empty() {
        return Err(ChanPackError::InvalidInput(
            "at least one channel must be provided".into(),
        ));
    }
    for buffer in &present {
        validate_channel_data(buffer, None, false)?;
    }

    // Componentwise max: width and height maximized independently.
    let tw = present.iter().map(|b| b.width()).max().unwrap_or(0);
    let th = present.iter().map(|b| b.height()).max().unwrap_or(0);

    let mut planes: [Option<Cow<'_, GrayImage>>; 4] = [None, None, None, None];
    for (i, slot) in slots.iter().enumerate() {
        if let Some(buffer) = *slot {
            let normalized = normalize_resolution(&[buffer], (tw, th))?;
            planes[i] = normalized.into_iter().next();
        }
    }

    let sample = |plane: &Option<Cow<'_, GrayImage>>, x: u32, y: u32| -> u8 {
        match plane {
            Some(buffer) => buffer.get_pixel(x, y)[0],
            None => 0,
        }
    };

    let packed = if planes[3].is_some() {
        let mut out = RgbaImage::new(tw, th);
        for (x, y, px) in out.enumerate_pixels_mut() {
            px.0 = [
                sample(&planes[0], x, y),
                sample(&planes[1], x, y),
                sample(&planes[2], x, y),
                sample(&planes[3], x, y),
            ];
        }
        DynamicImage::ImageRgba8(out)
    } else {
        let mut out = RgbImage::new(tw, th);
        for (x, y, px) in out.enumerate_pixels_mut() {
            px.0 = [
                sample(&planes[0], x, y),
                sample(&planes[1], x, y),
                sample(&planes[2], x, y),
            ];
        }
        DynamicImage::ImageRgb8(out)
    };
    debug!(
        width = tw,
        height = th,
        rgba = planes[3].is_some(),
        "packed channels"
    );
    Ok(packed)
}

/// Packs textures into a single image according to a template's channel
/// assignments.
///
/// `textures` maps texture types (e.g. `"roughness"`) to sources; types the
/// template does not reference are ignored. Used slots without a matching
/// texture are filled with the channel's default value at the target
/// resolution; unused slots produce no plane at all. When no texture is
/// supplied the output falls back to [`DEFAULT_RESOLUTION`].
#[instrument(skip_all, fields(template = %template.name))]
pub fn pack_texture_from_template(
    textures: &HashMap<String, TextureSource>,
    template: &PackingTemplate,
) -> Result<DynamicImage> {
    // Resolve each used slot to a buffer now, or mark it for a deferred
    // default fill once the target resolution is known.
    let mut resolved: [Option<GrayImage>; 4] = [None, None, None, None];
    for slot in Slot::ALL {
        let Some(map) = template.channel(slot) else {
            continue;
        };
        match textures.get(map.map_type()) {
            None => {}
            Some(TextureSource::Path(path)) => {
                let image = load_image(path)?;
                resolved[slot.index()] = Some(to_grayscale(&image));
            }
            Some(TextureSource::Image(image)) => {
                resolved[slot.index()] = Some(to_grayscale(image));
            }
            Some(TextureSource::Buffer(buffer)) => {
                validate_channel_data(buffer, None, false)?;
                resolved[slot.index()] = Some(buffer.clone());
            }
        }
    }

    let supplied: Vec<&GrayImage> = resolved.iter().flatten().collect();
    let (tw, th) = if supplied.is_empty() {
        DEFAULT_RESOLUTION
    } else {
        let tw = supplied.iter().map(|b| b.width()).max().unwrap_or(0);
        let th = supplied.iter().map(|b| b.height()).max().unwrap_or(0);
        (tw, th)
    };

    for slot in Slot::ALL {
        if resolved[slot.index()].is_none()
            && let Some(map) = template.channel(slot)
        {
            debug!(
                slot = %slot,
                map_type = map.map_type(),
                fill = map.default_fill_value(),
                "filling missing texture with default"
            );
            resolved[slot.index()] = Some(GrayImage::from_pixel(
                tw,
                th,
                image::Luma([map.default_fill_value()]),
            ));
        }
    }

    pack_channels(
        resolved[0].as_ref(),
        resolved[1].as_ref(),
        resolved[2].as_ref(),
        resolved[3].as_ref(),
    )
}

/// Builds a channel buffer filled with a constant default value.
///
/// The fill uses the same truncate-toward-zero scaling as template defaults
/// (0.5 -> 127).
pub fn create_default_channel(size: (u32, u32), default_value: f32) -> Result<GrayImage> {
    if !(0.0..=1.0).contains(&default_value) {
        return Err(ChanPackError::InvalidConfig(format!(
            "default_value must be between 0.0 and 1.0, got {default_value}"
        )));
    }
    let (w, h) = size;
    if w == 0 || h == 0 {
        return Err(ChanPackError::InvalidInput(format!(
            "invalid size {w}x{h}: dimensions must be positive"
        )));
    }
    let fill = crate::channel_map::scale_unit_truncating(default_value);
    Ok(GrayImage::from_pixel(w, h, image::Luma([fill])))
}
