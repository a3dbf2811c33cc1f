//! Unpacking engine: extracts grayscale channel planes back out of a packed
//! RGB/RGBA image according to a template.

use std::collections::HashMap;

use image::{DynamicImage, GrayImage};
use tracing::{debug, info, instrument, warn};

use crate::error::{ChanPackError, Result};
use crate::template::{PackingTemplate, Slot};

/// Key under which an unrequested alpha plane is auto-extracted by
/// [`unpack_texture`].
pub const AUTO_ALPHA_KEY: &str = "alpha";

/// Extracts a single channel plane from a packed image as a grayscale
/// buffer.
///
/// Grayscale sources behave as if replicated across R, G and B, so
/// extracting any of those slots returns the original values. Other color
/// modes are converted to RGB (or RGBA when extracting alpha) first.
///
/// Fails with `InvalidState` when `Slot::A` is requested from an image with
/// no alpha plane.
pub fn extract_channel(image: &DynamicImage, slot: Slot) -> Result<GrayImage> {
    if slot == Slot::A && !image.color().has_alpha() {
        return Err(ChanPackError::InvalidState(format!(
            "cannot extract alpha channel from {:?} image: image must have an alpha plane",
            image.color()
        )));
    }

    let index = slot.index();
    let (w, h) = (image.width(), image.height());
    let mut out = GrayImage::new(w, h);
    if slot == Slot::A {
        let rgba = image.to_rgba8();
        for (x, y, px) in out.enumerate_pixels_mut() {
            px.0 = [rgba.get_pixel(x, y)[index]];
        }
    } else {
        let rgb = image.to_rgb8();
        for (x, y, px) in out.enumerate_pixels_mut() {
            px.0 = [rgb.get_pixel(x, y)[index]];
        }
    }
    Ok(out)
}

/// Extracts every channel the template defines, keyed by map type.
///
/// A template-defined alpha slot is silently skipped when the image has no
/// alpha plane (unlike [`extract_channel`], which fails for the same
/// condition). Conversely, when the image carries an alpha plane the
/// template does not claim, it is extracted anyway under
/// [`AUTO_ALPHA_KEY`]; that post-step is best-effort and never fails the
/// operation.
#[instrument(skip_all, fields(template = %template.name))]
pub fn unpack_texture(
    image: &DynamicImage,
    template: &PackingTemplate,
) -> Result<HashMap<String, GrayImage>> {
    let has_alpha = image.color().has_alpha();
    let mut result = HashMap::new();

    for (slot, map) in template.used_channels() {
        if slot == Slot::A && !has_alpha {
            debug!(
                map_type = map.map_type(),
                "skipping template alpha slot: image has no alpha plane"
            );
            continue;
        }
        let extracted = extract_channel(image, slot)?;
        result.insert(map.map_type().to_string(), extracted);
    }

    if has_alpha && !template.is_channel_used(Slot::A) {
        match extract_channel(image, Slot::A) {
            Ok(alpha) => {
                debug!("auto-extracted alpha channel not defined by template");
                result.insert(AUTO_ALPHA_KEY.to_string(), alpha);
            }
            Err(e) => {
                warn!(error = %e, "failed to auto-extract alpha channel");
            }
        }
    }

    info!(channels = result.len(), "unpacked texture");
    Ok(result)
}
