use std::io::Cursor;

use super::*;

#[test]
fn decode_image_png_dimensions_and_premul() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let prepared = decode_image(&buf).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_garbage_is_an_error() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn solid_placeholder_fills_every_pixel() {
    let img = PreparedImage::solid(3, 2, Rgba8::opaque(10, 20, 30)).unwrap();
    assert_eq!(img.rgba8_premul.len(), 3 * 2 * 4);
    assert!(
        img.rgba8_premul
            .chunks_exact(4)
            .all(|px| *px == [10, 20, 30, 255])
    );
    assert!(PreparedImage::solid(0, 2, Rgba8::opaque(0, 0, 0)).is_err());
}

#[test]
fn fingerprint_tracks_content() {
    let a = PreparedImage::solid(2, 2, Rgba8::opaque(1, 2, 3)).unwrap();
    let b = PreparedImage::solid(2, 2, Rgba8::opaque(1, 2, 3)).unwrap();
    let c = PreparedImage::solid(2, 2, Rgba8::opaque(3, 2, 1)).unwrap();
    assert_eq!(a.fingerprint, b.fingerprint);
    assert_ne!(a.fingerprint, c.fingerprint);
}
