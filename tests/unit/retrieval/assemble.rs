use super::*;
use crate::catalog::pattern::{ElementKind, LayoutPattern};

fn pattern() -> LayoutPattern {
    LayoutPattern {
        id: "p".to_string(),
        name: "Cornell Notes".to_string(),
        description: "Cue column".to_string(),
        category: Category::Study,
        keywords: vec!["cornell".to_string()],
        tags: vec!["study".to_string(), "academic".to_string()],
        artwork: "<svg width='10' height='10'><rect fill='#fff'/></svg>".to_string(),
        editable_elements: vec![EditableElement {
            id: "topic".to_string(),
            kind: ElementKind::Text,
            x: 1.0,
            y: 2.0,
            width: 30.0,
            height: 10.0,
            placeholder: Some("Topic".to_string()),
            options: None,
            default_value: None,
            style: None,
        }],
        popularity: 85,
    }
}

fn full() -> AssemblyRequest<'static> {
    AssemblyRequest {
        include_editable: true,
        style: None,
    }
}

#[test]
fn confidence_is_clamped_and_saturates() {
    assert_eq!(confidence(0.0, 5.0), 0.0);
    assert_eq!(confidence(2.5, 5.0), 0.5);
    assert_eq!(confidence(5.0, 5.0), 1.0);
    assert_eq!(confidence(12.0, 5.0), 1.0);
    assert_eq!(confidence(-1.0, 5.0), 0.0);
    assert_eq!(confidence(f64::NAN, 5.0), 0.0);
    assert_eq!(confidence(1.0, 0.0), 0.0);
    for i in 0..200 {
        let c = confidence(f64::from(i) * 0.05, 5.0);
        assert!((0.0..=1.0).contains(&c));
    }
}

#[test]
fn data_uri_is_percent_encoded_svg() {
    let uri = svg_data_uri("<svg a='1'>#</svg>");
    assert!(uri.starts_with("data:image/svg+xml;charset=utf-8,"));
    let payload = uri.trim_start_matches("data:image/svg+xml;charset=utf-8,");
    assert!(!payload.contains('<'));
    assert!(!payload.contains('#'));
    assert!(!payload.contains(' '));
    assert!(payload.starts_with("%3Csvg"));
    assert_eq!(
        urlencoding::decode(payload).unwrap(),
        "<svg a='1'>#</svg>"
    );
}

#[test]
fn assemble_copies_pattern_fields() {
    let p = pattern();
    let candidates = vec![ScoredCandidate {
        pattern: &p,
        score: 2.85,
    }];
    let out = assemble(&candidates, &full(), &AssemblyOpts::default());
    assert_eq!(out.len(), 1);
    let l = &out[0];
    assert_eq!(l.pattern_id, "p");
    assert_eq!(l.name, "Cornell Notes");
    assert_eq!(l.category, Category::Study);
    assert!((l.confidence - 0.57).abs() < 1e-9);
    assert_eq!(l.editable_elements, p.editable_elements);
    assert_eq!(l.metadata.source, LEXICAL_SOURCE);
    assert_eq!(l.metadata.popularity, 85);
    assert_eq!(l.metadata.tags, p.tags);
    assert!(l.artwork.starts_with("data:image/svg+xml"));
}

#[test]
fn editable_elements_are_independent_copies() {
    let p = pattern();
    let candidates = vec![ScoredCandidate {
        pattern: &p,
        score: 1.0,
    }];
    let mut out = assemble(&candidates, &full(), &AssemblyOpts::default());
    out[0].editable_elements[0].x = 500.0;
    out[0].editable_elements.clear();
    assert_eq!(p.editable_elements.len(), 1);
    assert_eq!(p.editable_elements[0].x, 1.0);
}

#[test]
fn editable_elements_can_be_omitted_and_style_echoed() {
    let p = pattern();
    let candidates = vec![ScoredCandidate {
        pattern: &p,
        score: 1.0,
    }];
    let req = AssemblyRequest {
        include_editable: false,
        style: Some("minimal"),
    };
    let out = assemble(&candidates, &req, &AssemblyOpts::default());
    assert!(out[0].editable_elements.is_empty());
    assert_eq!(out[0].metadata.style.as_deref(), Some("minimal"));
}

#[test]
fn assemble_preserves_order_and_empty_input() {
    let a = pattern();
    let mut b = pattern();
    b.id = "q".to_string();
    let candidates = vec![
        ScoredCandidate {
            pattern: &b,
            score: 3.0,
        },
        ScoredCandidate {
            pattern: &a,
            score: 1.0,
        },
    ];
    let out = assemble(&candidates, &full(), &AssemblyOpts::default());
    assert_eq!(out[0].pattern_id, "q");
    assert_eq!(out[1].pattern_id, "p");
    assert!(assemble(&[], &full(), &AssemblyOpts::default()).is_empty());
}

#[test]
fn generated_layout_serializes_camel_case() {
    let p = pattern();
    let candidates = vec![ScoredCandidate {
        pattern: &p,
        score: 1.0,
    }];
    let out = assemble(&candidates, &full(), &AssemblyOpts::default());
    let v = serde_json::to_value(&out[0]).unwrap();
    assert!(v.get("editableElements").is_some());
    assert!(v.get("patternId").is_some());
    assert_eq!(v["metadata"]["source"], "lexical-catalog");
    assert!(v["metadata"].get("style").is_none());
}
