use std::collections::HashMap;

use chanpack::{
    ChanPackError, ChannelMap, PackingTemplate, Slot, TextureSource, buffer_from_f32,
    buffer_to_f32, from_grayscale, image_info, load_image, pack_texture_from_template, save_image,
    to_grayscale,
};
use image::{DynamicImage, GrayImage};

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("packed.png");

    let image = from_grayscale(GrayImage::from_pixel(32, 32, image::Luma([77])));
    save_image(&image, &path).unwrap();

    let loaded = load_image(&path).unwrap();
    assert_eq!((loaded.width(), loaded.height()), (32, 32));
    assert_eq!(to_grayscale(&loaded).get_pixel(0, 0).0, [77]);
}

#[test]
fn test_load_missing_file() {
    match load_image("/nonexistent/texture.png") {
        Err(ChanPackError::NotFound(_)) => {}
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_save_without_extension_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_extension");
    let image = from_grayscale(GrayImage::new(4, 4));
    match save_image(&image, &path) {
        Err(ChanPackError::InvalidInput(_)) => {}
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_image_info() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("info.png");
    save_image(&from_grayscale(GrayImage::new(48, 24)), &path).unwrap();

    let (w, h, color) = image_info(&path).unwrap();
    assert_eq!((w, h), (48, 24));
    assert_eq!(color, image::ColorType::L8);
}

/// A file-path texture source is loaded and grayscale-converted during
/// template packing.
#[test]
fn test_pack_from_file_path_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rough.png");
    save_image(
        &from_grayscale(GrayImage::from_pixel(64, 64, image::Luma([140]))),
        &path,
    )
    .unwrap();

    let template = PackingTemplate::new("R", "roughness only")
        .with_channel(Slot::G, ChannelMap::new("roughness", 0.5).unwrap());
    let mut textures: HashMap<String, TextureSource> = HashMap::new();
    textures.insert(
        "roughness".into(),
        TextureSource::Path(path),
    );

    let packed = pack_texture_from_template(&textures, &template).unwrap();
    assert_eq!(packed.to_rgb8().get_pixel(0, 0).0, [0, 140, 0]);
}

/// An RGB decoded-image source is luma-converted before packing.
#[test]
fn test_pack_from_decoded_image_source() {
    let rgb = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        16,
        16,
        image::Rgb([100, 100, 100]),
    ));
    let template = PackingTemplate::new("R", "roughness only")
        .with_channel(Slot::R, ChannelMap::new("roughness", 0.5).unwrap());
    let mut textures: HashMap<String, TextureSource> = HashMap::new();
    textures.insert("roughness".into(), rgb.into());

    let packed = pack_texture_from_template(&textures, &template).unwrap();
    // uniform gray converts to the same luma value
    assert_eq!(packed.to_rgb8().get_pixel(0, 0).0[0], 100);
}

#[test]
fn test_f32_conversion_clips() {
    let buffer = buffer_from_f32(3, 1, &[-0.5, 0.5, 2.0]).unwrap();
    assert_eq!(buffer.as_raw(), &vec![0, 127, 255]);

    let floats = buffer_to_f32(&buffer);
    assert_eq!(floats.len(), 3);
    assert!((floats[2] - 1.0).abs() < f32::EPSILON);
}

#[test]
fn test_f32_conversion_length_mismatch() {
    match buffer_from_f32(4, 4, &[0.0; 3]) {
        Err(ChanPackError::InvalidInput(_)) => {}
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}
