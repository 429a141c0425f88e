use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_reports_native_dimensions_and_center() {
    let img = decode_image(&png_bytes(800, 450, [10, 20, 30, 255])).unwrap();
    assert_eq!((img.width(), img.height()), (800, 450));
    assert_eq!(img.center(), crate::foundation::core::Point::new(400.0, 225.0));
}

#[test]
fn undecodable_bytes_are_an_asset_load_failure() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, ThumbError::AssetLoad(_)));
}

#[test]
fn premultiply_rounds_and_zeroes_transparent_pixels() {
    let mut px = vec![100u8, 50, 200, 128, 9, 9, 9, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(
        px,
        vec![
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128,
            0,
            0,
            0,
            0
        ]
    );
}

#[test]
fn oversized_surfaces_are_rejected() {
    assert!(surface_dims(70_000, 10).is_err());
    assert_eq!(surface_dims(800, 450).unwrap(), (800, 450));
}
