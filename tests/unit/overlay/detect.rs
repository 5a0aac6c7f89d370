use super::*;

#[test]
fn default_table_on_a_page_sized_canvas() {
    let areas = FixedContentAreas::default().detect(Canvas::new(600, 800).unwrap());
    assert_eq!(areas.len(), 3);
    assert_eq!(areas[0].kind, ContentAreaKind::Header);
    assert_eq!(areas[0].rect, Rect::new(50.0, 50.0, 550.0, 150.0));
    assert_eq!(areas[1].kind, ContentAreaKind::Body);
    assert_eq!(areas[1].rect, Rect::new(50.0, 200.0, 550.0, 700.0));
    assert_eq!(areas[2].kind, ContentAreaKind::CalendarCorner);
    assert_eq!(areas[2].rect, Rect::new(400.0, 650.0, 550.0, 750.0));
}

#[test]
fn corner_is_anchored_bottom_right() {
    let areas = FixedContentAreas::default().detect(Canvas::new(1000, 1200).unwrap());
    let corner = areas
        .iter()
        .find(|a| a.kind == ContentAreaKind::CalendarCorner)
        .unwrap();
    assert_eq!(corner.rect.x1, 950.0);
    assert_eq!(corner.rect.y1, 1150.0);
}

#[test]
fn degenerate_areas_are_dropped_on_small_canvases() {
    let areas = FixedContentAreas::default().detect(Canvas::new(120, 120).unwrap());
    assert!(areas.iter().all(|a| a.rect.width() > 0.0 && a.rect.height() > 0.0));
    assert!(areas.iter().all(|a| a.kind != ContentAreaKind::Body));
    for a in &areas {
        assert!(a.rect.x0 >= 0.0 && a.rect.y0 >= 0.0);
        assert!(a.rect.x1 <= 120.0 && a.rect.y1 <= 120.0);
    }
}

#[test]
fn custom_detectors_plug_in() {
    struct Whole;
    impl ContentAreaDetector for Whole {
        fn detect(&self, canvas: Canvas) -> Vec<ContentArea> {
            vec![ContentArea {
                kind: ContentAreaKind::Body,
                rect: Rect::new(0.0, 0.0, canvas.width_f64(), canvas.height_f64()),
            }]
        }
    }
    let d: &dyn ContentAreaDetector = &Whole;
    assert_eq!(d.detect(Canvas::new(10, 10).unwrap()).len(), 1);
}
