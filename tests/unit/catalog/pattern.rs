use serde_json::json;

use super::*;

fn element(id: &str, kind: ElementKind) -> EditableElement {
    EditableElement {
        id: id.to_string(),
        kind,
        x: 10.0,
        y: 20.0,
        width: 100.0,
        height: 24.0,
        placeholder: None,
        options: None,
        default_value: None,
        style: None,
    }
}

fn pattern() -> LayoutPattern {
    LayoutPattern {
        id: "p".to_string(),
        name: "Habit Tracker".to_string(),
        description: "Track daily habits".to_string(),
        category: Category::Personal,
        keywords: vec!["Habit".to_string(), "habit".to_string(), " streak ".to_string()],
        tags: vec!["Daily".to_string()],
        artwork: "<svg/>".to_string(),
        editable_elements: vec![element("title", ElementKind::Text)],
        popularity: 40,
    }
}

#[test]
fn category_parses_case_insensitively() {
    assert_eq!(" Study ".parse::<Category>().unwrap(), Category::Study);
    assert_eq!("FITNESS".parse::<Category>().unwrap(), Category::Fitness);
    let err = "cooking".parse::<Category>().unwrap_err();
    assert!(matches!(err, LayoutError::InvalidQuery(_)));
}

#[test]
fn category_serde_roundtrips_as_lowercase_string() {
    assert_eq!(
        serde_json::to_value(Category::Business).unwrap(),
        json!("business")
    );
    let c: Category = serde_json::from_value(json!("Creative")).unwrap();
    assert_eq!(c, Category::Creative);
    assert!(serde_json::from_value::<Category>(json!("nope")).is_err());
}

#[test]
fn element_kind_uses_kebab_case() {
    let k: ElementKind = serde_json::from_value(json!("multiline-text")).unwrap();
    assert_eq!(k, ElementKind::MultilineText);
    assert_eq!(
        serde_json::to_value(ElementKind::SingleSelect).unwrap(),
        json!("single-select")
    );
}

#[test]
fn single_select_requires_options() {
    let mut el = element("mood", ElementKind::SingleSelect);
    assert!(el.validate().is_err());
    el.options = Some(vec![]);
    assert!(el.validate().is_err());
    el.options = Some(vec!["good".to_string(), "bad".to_string()]);
    el.validate().unwrap();

    let mut text = element("t", ElementKind::Text);
    text.options = Some(vec!["x".to_string()]);
    assert!(text.validate().is_err());
}

#[test]
fn element_geometry_is_checked() {
    let mut el = element("a", ElementKind::Number);
    el.width = 0.0;
    assert!(el.validate().is_err());
    let mut el = element("a", ElementKind::Number);
    el.x = -1.0;
    assert!(el.validate().is_err());
    let mut el = element("a", ElementKind::Number);
    el.height = f64::NAN;
    assert!(el.validate().is_err());
}

#[test]
fn pattern_invariants() {
    pattern().validate().unwrap();

    let mut p = pattern();
    p.tags.clear();
    assert!(p.validate().is_err());

    let mut p = pattern();
    p.keywords = vec!["  ".to_string()];
    assert!(p.validate().is_err());

    let mut p = pattern();
    p.popularity = 101;
    assert!(p.validate().is_err());

    let mut p = pattern();
    p.editable_elements.push(element("title", ElementKind::Date));
    assert!(p.validate().is_err());
}

#[test]
fn keywords_are_normalized_and_deduplicated() {
    let mut p = pattern();
    p.normalize_keywords();
    assert_eq!(p.keywords, vec!["habit".to_string(), "streak".to_string()]);
}

#[test]
fn haystack_is_lowercase_concatenation() {
    let mut p = pattern();
    p.normalize_keywords();
    assert_eq!(p.haystack(), "habit tracker track daily habits habit streak daily");
}

#[test]
fn pattern_json_uses_camel_case() {
    let v = json!({
        "id": "x",
        "name": "X",
        "description": "d",
        "category": "study",
        "keywords": ["k"],
        "tags": ["t"],
        "artwork": "<svg/>",
        "editableElements": [{
            "id": "e", "kind": "checkbox", "x": 0, "y": 0, "width": 10, "height": 10,
            "defaultValue": false,
            "style": {"fontSize": 12, "backgroundColor": "#fff"}
        }],
        "popularity": 5
    });
    let p: LayoutPattern = serde_json::from_value(v).unwrap();
    assert_eq!(p.editable_elements[0].default_value, Some(json!(false)));
    let style = p.editable_elements[0].style.as_ref().unwrap();
    assert_eq!(style.background_color, Some(Rgba8::WHITE));
    p.validate().unwrap();
}
