use super::*;
use crate::foundation::core::Canvas;
use crate::foundation::error::LayoutError;
use crate::overlay::detect::ContentArea;
use crate::overlay::spec::OverlayAlgorithm;

fn paper(w: u32, h: u32) -> RasterImage {
    RasterImage::filled(w, h, [250, 248, 240, 255]).unwrap()
}

struct NoAreas;

impl ContentAreaDetector for NoAreas {
    fn detect(&self, _canvas: Canvas) -> Vec<ContentArea> {
        Vec::new()
    }
}

#[test]
fn every_algorithm_keeps_the_source_size() {
    let src = paper(97, 61);
    for algorithm in [
        OverlayAlgorithm::Ruled,
        OverlayAlgorithm::Grid,
        OverlayAlgorithm::Calendar,
        OverlayAlgorithm::SmartMargins,
    ] {
        let out = render_overlay(&src, &OverlaySpec::new(algorithm)).unwrap();
        assert_eq!((out.width, out.height), (97, 61), "{algorithm:?}");
    }
}

#[test]
fn source_is_left_untouched() {
    let src = paper(40, 40);
    let before = src.clone();
    let _ = render_overlay(&src, &OverlaySpec::new(OverlayAlgorithm::Grid)).unwrap();
    assert_eq!(src, before);
}

#[test]
fn custom_detector_drives_smart_margins() {
    let src = paper(300, 300);
    let out = render_overlay_with(
        &src,
        &OverlaySpec::new(OverlayAlgorithm::SmartMargins),
        &NoAreas,
    )
    .unwrap();
    let max_diff = out
        .data
        .iter()
        .zip(&src.data)
        .map(|(a, b)| a.abs_diff(*b))
        .max()
        .unwrap();
    assert!(max_diff <= 1, "max channel diff {max_diff}");
}

#[test]
fn bytes_round_trip_in_the_declared_format() {
    let src = paper(48, 32);
    let png = encode_raster(&src, MediaType::Png).unwrap();
    let out = render_overlay_bytes(&png.bytes, "image/png", &OverlaySpec::default()).unwrap();
    assert_eq!(out.media_type, MediaType::Png);
    let decoded = decode_raster(&out.bytes, MediaType::Png).unwrap();
    assert_eq!((decoded.width, decoded.height), (48, 32));
}

#[test]
fn undecodable_bytes_are_unsupported_media() {
    let err = render_overlay_bytes(b"not an image", "image/png", &OverlaySpec::default())
        .unwrap_err();
    assert!(matches!(err, LayoutError::UnsupportedMedia(_)));
}

#[test]
fn unaccepted_mime_is_unsupported_media() {
    let err = render_overlay_bytes(&[0u8; 8], "image/tiff", &OverlaySpec::default()).unwrap_err();
    assert!(matches!(err, LayoutError::UnsupportedMedia(_)));
}
