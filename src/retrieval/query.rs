use serde::{Deserialize, Serialize};

use crate::catalog::pattern::Category;
use crate::foundation::error::{LayoutError, LayoutResult};

/// A caller's free-text request plus optional structured hints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editable_requested: Option<bool>,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_editable_requested(mut self, requested: bool) -> Self {
        self.editable_requested = Some(requested);
        self
    }

    /// Parse the category hint from a loose string (case-insensitive).
    pub fn with_category_name(self, name: &str) -> LayoutResult<Self> {
        Ok(self.with_category(name.parse()?))
    }

    /// Reject queries a caller has to fix before retrieval makes sense.
    ///
    /// Category hints are typed, so unknown names never reach this point.
    pub fn validate(&self) -> LayoutResult<()> {
        if self.text.trim().is_empty() {
            return Err(LayoutError::invalid_query("query text must be non-empty"));
        }
        Ok(())
    }

    /// Whether assembled layouts should carry editable fields.
    pub fn wants_editable(&self) -> bool {
        self.editable_requested.unwrap_or(true)
    }
}

/// Lowercase whitespace tokens with more than `min_chars - 1` characters, in query order.
///
/// Repeated tokens are kept; each occurrence scores on its own.
pub fn tokenize(text: &str, min_chars: usize) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|t| t.chars().count() >= min_chars)
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/retrieval/query.rs"]
mod tests;
