use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{LayoutError, LayoutResult};

/// Upper bound of [`LayoutPattern::popularity`].
pub const MAX_POPULARITY: u8 = 100;

/// Fixed pattern category enumeration.
///
/// Names are matched case-insensitively when parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Productivity,
    Study,
    Creative,
    Business,
    Fitness,
    Personal,
    Planning,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Productivity,
        Category::Study,
        Category::Creative,
        Category::Business,
        Category::Fitness,
        Category::Personal,
        Category::Planning,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Productivity => "productivity",
            Category::Study => "study",
            Category::Creative => "creative",
            Category::Business => "business",
            Category::Fitness => "fitness",
            Category::Personal => "personal",
            Category::Planning => "planning",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| LayoutError::invalid_query(format!("unknown category '{}'", s.trim())))
    }
}

impl TryFrom<String> for Category {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_owned()
    }
}

/// Interactive field kinds an [`EditableElement`] can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Text,
    MultilineText,
    Checkbox,
    Date,
    Number,
    SingleSelect,
}

/// Optional visual styling of an editable field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Rgba8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
}

/// A field positioned over a pattern's artwork, in artwork pixel space (origin top-left).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditableElement {
    pub id: String,
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ElementStyle>,
}

impl EditableElement {
    pub fn validate(&self) -> LayoutResult<()> {
        if self.id.trim().is_empty() {
            return Err(LayoutError::invalid_catalog("element id must be non-empty"));
        }

        for (name, v) in [("x", self.x), ("y", self.y)] {
            if !v.is_finite() || v < 0.0 {
                return Err(LayoutError::invalid_catalog(format!(
                    "element '{}' {name} must be finite and >= 0",
                    self.id
                )));
            }
        }
        for (name, v) in [("width", self.width), ("height", self.height)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(LayoutError::invalid_catalog(format!(
                    "element '{}' {name} must be finite and > 0",
                    self.id
                )));
            }
        }

        let has_options = self.options.as_ref().is_some_and(|o| !o.is_empty());
        match (self.kind, has_options) {
            (ElementKind::SingleSelect, false) => Err(LayoutError::invalid_catalog(format!(
                "single-select element '{}' requires non-empty options",
                self.id
            ))),
            (kind, true) if kind != ElementKind::SingleSelect => {
                Err(LayoutError::invalid_catalog(format!(
                    "element '{}' carries options but is not single-select",
                    self.id
                )))
            }
            _ => Ok(()),
        }
    }
}

/// A catalog-resident page template: artwork plus positioned editable fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPattern {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub keywords: Vec<String>,
    pub tags: Vec<String>,
    /// SVG document; opaque to ranking.
    pub artwork: String,
    #[serde(default)]
    pub editable_elements: Vec<EditableElement>,
    pub popularity: u8,
}

impl LayoutPattern {
    /// Check the per-pattern invariants. Cross-pattern checks (id uniqueness) belong to the
    /// catalog.
    pub fn validate(&self) -> LayoutResult<()> {
        if self.id.trim().is_empty() {
            return Err(LayoutError::invalid_catalog("pattern id must be non-empty"));
        }
        if self.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(LayoutError::invalid_catalog(format!(
                "pattern '{}' must have at least one keyword",
                self.id
            )));
        }
        if self.tags.iter().all(|t| t.trim().is_empty()) {
            return Err(LayoutError::invalid_catalog(format!(
                "pattern '{}' must have at least one tag",
                self.id
            )));
        }
        if self.popularity > MAX_POPULARITY {
            return Err(LayoutError::invalid_catalog(format!(
                "pattern '{}' popularity {} exceeds {MAX_POPULARITY}",
                self.id, self.popularity
            )));
        }

        let mut seen = BTreeSet::new();
        for el in &self.editable_elements {
            el.validate()?;
            if !seen.insert(el.id.as_str()) {
                return Err(LayoutError::invalid_catalog(format!(
                    "pattern '{}' has duplicate element id '{}'",
                    self.id, el.id
                )));
            }
        }
        Ok(())
    }

    /// Lowercase the keyword set and drop blanks/duplicates, keeping first-seen order.
    pub(crate) fn normalize_keywords(&mut self) {
        let mut seen = BTreeSet::new();
        self.keywords = self
            .keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty() && seen.insert(k.clone()))
            .collect();
    }

    /// Lowercase text the ranking engine matches query tokens against.
    pub fn haystack(&self) -> String {
        let mut out = String::with_capacity(
            self.name.len() + self.description.len() + 16 * (self.keywords.len() + self.tags.len()),
        );
        out.push_str(&self.name);
        out.push(' ');
        out.push_str(&self.description);
        out.push(' ');
        out.push_str(&self.keywords.join(" "));
        out.push(' ');
        out.push_str(&self.tags.join(" "));
        out.to_lowercase()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/pattern.rs"]
mod tests;
