use std::collections::HashMap;

use chanpack::{
    ChanPackError, ChannelMap, DEFAULT_RESOLUTION, PackingTemplate, Slot, TextureSource,
    create_default_channel, pack_texture_from_template,
};
use image::GrayImage;

fn orm_template() -> PackingTemplate {
    PackingTemplate::new("ORM", "Occlusion-Roughness-Metallic")
        .with_channel(Slot::R, ChannelMap::new("ambient_occlusion", 1.0).unwrap())
        .with_channel(Slot::G, ChannelMap::new("roughness", 0.5).unwrap())
        .with_channel(Slot::B, ChannelMap::new("metallic", 0.0).unwrap())
}

/// With no textures supplied every used slot gets its default fill at the
/// 1024x1024 fallback resolution. 0.5 scales to 127, not 128
/// (truncate-toward-zero).
#[test]
fn test_all_defaults_at_fallback_resolution() {
    let template = orm_template();
    let textures: HashMap<String, TextureSource> = HashMap::new();

    let packed = pack_texture_from_template(&textures, &template).unwrap();
    assert_eq!(
        (packed.width(), packed.height()),
        (DEFAULT_RESOLUTION.0, DEFAULT_RESOLUTION.1)
    );
    let px = packed.to_rgb8().get_pixel(0, 0).0;
    assert_eq!(px, [255, 127, 0]);
}

/// Defaults for missing textures are created at the resolution of the
/// supplied ones, not the fallback.
#[test]
fn test_partial_defaults_match_supplied_resolution() {
    let template = orm_template();
    let mut textures: HashMap<String, TextureSource> = HashMap::new();
    textures.insert(
        "roughness".into(),
        GrayImage::from_pixel(256, 128, image::Luma([60])).into(),
    );

    let packed = pack_texture_from_template(&textures, &template).unwrap();
    assert_eq!((packed.width(), packed.height()), (256, 128));
    let px = packed.to_rgb8().get_pixel(10, 10).0;
    assert_eq!(px, [255, 60, 0]);
}

/// Unused template slots are absent from the output entirely, never
/// default-filled.
#[test]
fn test_unused_slot_is_absent_not_defaulted() {
    let template = PackingTemplate::new("RG", "two channels")
        .with_channel(Slot::R, ChannelMap::new("ambient_occlusion", 1.0).unwrap())
        .with_channel(Slot::G, ChannelMap::new("roughness", 0.5).unwrap());
    let textures: HashMap<String, TextureSource> = HashMap::new();

    let packed = pack_texture_from_template(&textures, &template).unwrap();
    // no alpha slot in the template -> RGB output
    assert_eq!(packed.color(), image::ColorType::Rgb8);
    // unused B plane is the structural zero from pack_channels
    assert_eq!(packed.to_rgb8().get_pixel(0, 0).0, [255, 127, 0]);
}

#[test]
fn test_rgba_defaults() {
    let template = orm_template().with_channel(Slot::A, ChannelMap::new("opacity", 1.0).unwrap());
    let textures: HashMap<String, TextureSource> = HashMap::new();

    let packed = pack_texture_from_template(&textures, &template).unwrap();
    assert_eq!(packed.color(), image::ColorType::Rgba8);
    assert_eq!(packed.to_rgba8().get_pixel(0, 0).0, [255, 127, 0, 255]);
}

#[test]
fn test_channel_map_rejects_out_of_domain_defaults() {
    for value in [-0.1, 1.5, -1.0, 2.0, f32::NAN] {
        match ChannelMap::new("roughness", value) {
            Err(ChanPackError::InvalidConfig(_)) => {}
            other => panic!("expected InvalidConfig for {value}, got {other:?}"),
        }
    }
}

#[test]
fn test_create_default_channel_truncates() {
    let buffer = create_default_channel((512, 512), 0.5).unwrap();
    assert_eq!(buffer.dimensions(), (512, 512));
    assert_eq!(buffer.get_pixel(0, 0).0, [127]);
}

#[test]
fn test_create_default_channel_rejects_bad_inputs() {
    match create_default_channel((512, 512), 1.5) {
        Err(ChanPackError::InvalidConfig(_)) => {}
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
    match create_default_channel((0, 512), 0.5) {
        Err(ChanPackError::InvalidInput(_)) => {}
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}
