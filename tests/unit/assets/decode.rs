use super::*;

fn png_bytes(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn mime_parsing_accepts_common_rasters() {
    assert_eq!(MediaType::from_mime("image/png").unwrap(), MediaType::Png);
    assert_eq!(MediaType::from_mime(" IMAGE/JPG ").unwrap(), MediaType::Jpeg);
    assert_eq!(
        MediaType::from_mime("image/webp; q=1").unwrap(),
        MediaType::Webp
    );
    assert_eq!("image/gif".parse::<MediaType>().unwrap(), MediaType::Gif);
    for m in MediaType::ALL {
        assert_eq!(MediaType::from_mime(m.mime()).unwrap(), m);
    }
}

#[test]
fn mime_parsing_rejects_non_rasters() {
    for bad in ["image/svg+xml", "application/pdf", "text/plain", ""] {
        let err = MediaType::from_mime(bad).unwrap_err();
        assert!(matches!(err, LayoutError::UnsupportedMedia(_)), "{bad}");
    }
}

#[test]
fn extension_guessing() {
    assert_eq!(MediaType::from_extension("JPEG").unwrap(), MediaType::Jpeg);
    assert_eq!(MediaType::from_extension(".png").unwrap(), MediaType::Png);
    assert!(MediaType::from_extension("tiff").is_err());
}

#[test]
fn decode_png_dimensions_and_premul() {
    let bytes = png_bytes(3, 2, [100, 50, 200, 128]);
    let img = decode_raster(&bytes, MediaType::Png).unwrap();
    assert_eq!((img.width, img.height), (3, 2));
    assert_eq!(
        img.pixel(2, 1).unwrap(),
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
}

#[test]
fn corrupt_bytes_are_unsupported_media() {
    let err = decode_raster(b"definitely not an image", MediaType::Png).unwrap_err();
    assert!(matches!(err, LayoutError::UnsupportedMedia(_)));
}

#[test]
fn declared_format_must_match_bytes() {
    let bytes = png_bytes(2, 2, [0, 0, 0, 255]);
    let err = decode_raster(&bytes, MediaType::Jpeg).unwrap_err();
    assert!(matches!(err, LayoutError::UnsupportedMedia(_)));
}

#[test]
fn encode_then_decode_keeps_format_and_dimensions() {
    let src = RasterImage::filled(5, 4, [10, 200, 30, 255]).unwrap();
    for m in [MediaType::Png, MediaType::Bmp, MediaType::Webp, MediaType::Gif] {
        let enc = encode_raster(&src, m).unwrap();
        assert_eq!(enc.media_type, m);
        let back = decode_raster(&enc.bytes, m).unwrap();
        assert_eq!((back.width, back.height), (5, 4), "{m}");
    }
    let png = encode_raster(&src, MediaType::Png).unwrap();
    assert_eq!(decode_raster(&png.bytes, MediaType::Png).unwrap(), src);
}

#[test]
fn jpeg_is_flattened_onto_white() {
    let transparent = RasterImage::filled(8, 8, [0, 0, 0, 0]).unwrap();
    let enc = encode_raster(&transparent, MediaType::Jpeg).unwrap();
    let back = decode_raster(&enc.bytes, MediaType::Jpeg).unwrap();
    assert_eq!((back.width, back.height), (8, 8));
    let px = back.pixel(4, 4).unwrap();
    assert!(px.iter().all(|&c| c > 240), "{px:?}");
}

#[test]
fn flattening_a_mismatched_buffer_is_a_render_error() {
    let broken = RasterImage {
        width: 4,
        height: 4,
        data: vec![255; 12],
    };
    let err = flatten_onto_white(&broken).unwrap_err();
    assert!(matches!(err, LayoutError::Render(_)));

    let err = encode_raster(&broken, MediaType::Jpeg).unwrap_err();
    assert!(matches!(err, LayoutError::Render(_)));
}
