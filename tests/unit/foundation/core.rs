use serde_json::json;

use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(300, 200).unwrap();
    assert_eq!(c.center(), Point::new(150.0, 100.0));
    assert_eq!(c.rgba8_len(), 300 * 200 * 4);
}

#[test]
fn parses_short_long_and_alpha_hex() {
    assert_eq!("#f00".parse::<Rgba8>().unwrap(), Rgba8::opaque(255, 0, 0));
    assert_eq!(
        "#1a2B3c".parse::<Rgba8>().unwrap(),
        Rgba8::opaque(0x1a, 0x2b, 0x3c)
    );
    let c: Rgba8 = "0000ff80".parse().unwrap();
    assert_eq!(c.a, 0x80);
    assert_eq!(c.b, 0xff);
}

#[test]
fn rejects_malformed_hex() {
    assert!("#12".parse::<Rgba8>().is_err());
    assert!("#gggggg".parse::<Rgba8>().is_err());
    assert!("#ééé".parse::<Rgba8>().is_err());
}

#[test]
fn serde_uses_hex_strings() {
    let c: Rgba8 = serde_json::from_value(json!("#cccccc")).unwrap();
    assert_eq!(c, Rgba8::opaque(0xcc, 0xcc, 0xcc));
    assert_eq!(serde_json::to_value(c).unwrap(), json!("#cccccc"));
    assert_eq!(
        serde_json::to_value(Rgba8 { a: 0x40, ..c }).unwrap(),
        json!("#cccccc40")
    );
}

#[test]
fn with_opacity_scales_alpha_only() {
    let c = Rgba8::opaque(10, 20, 30).with_opacity(0.5);
    assert_eq!((c.r, c.g, c.b, c.a), (10, 20, 30, 128));
    assert_eq!(Rgba8::WHITE.with_opacity(2.0).a, 255);
    assert_eq!(Rgba8::WHITE.with_opacity(f64::NAN).a, 0);
}
