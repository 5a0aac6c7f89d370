use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;

use crate::catalog::pattern::LayoutPattern;
use crate::foundation::error::{LayoutError, LayoutResult};

const BUILTIN_CATALOG_JSON: &str = include_str!("builtin.json");

/// Read-only provider of layout patterns.
///
/// The engine reads the full pattern list on every ranking call; caching and invalidation are the
/// provider's business.
pub trait PatternSource {
    fn patterns(&self) -> &[LayoutPattern];
}

impl PatternSource for [LayoutPattern] {
    fn patterns(&self) -> &[LayoutPattern] {
        self
    }
}

impl PatternSource for Vec<LayoutPattern> {
    fn patterns(&self) -> &[LayoutPattern] {
        self
    }
}

impl<S: PatternSource + ?Sized> PatternSource for &S {
    fn patterns(&self) -> &[LayoutPattern] {
        (**self).patterns()
    }
}

/// Validated, immutable in-memory catalog.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    patterns: Vec<LayoutPattern>,
    by_id: BTreeMap<String, usize>,
}

impl InMemoryCatalog {
    /// Build a catalog, normalizing keywords and checking every pattern invariant.
    pub fn new(patterns: Vec<LayoutPattern>) -> LayoutResult<Self> {
        let mut by_id = BTreeMap::new();
        let mut out = Vec::with_capacity(patterns.len());

        for (idx, mut p) in patterns.into_iter().enumerate() {
            p.normalize_keywords();
            p.validate()?;
            if by_id.insert(p.id.clone(), idx).is_some() {
                return Err(LayoutError::invalid_catalog(format!(
                    "duplicate pattern id '{}'",
                    p.id
                )));
            }
            out.push(p);
        }

        tracing::debug!(patterns = out.len(), "catalog loaded");
        Ok(Self {
            patterns: out,
            by_id,
        })
    }

    /// Parse a JSON array of patterns.
    ///
    /// Malformed JSON is a `Serde` error; well-formed JSON with bad values (unknown category,
    /// out-of-range numbers) is an `InvalidCatalog` error.
    pub fn from_json_str(s: &str) -> LayoutResult<Self> {
        let patterns: Vec<LayoutPattern> = serde_json::from_str(s).map_err(|e| match e.classify() {
            serde_json::error::Category::Data => LayoutError::invalid_catalog(e.to_string()),
            _ => LayoutError::serde(e.to_string()),
        })?;
        Self::new(patterns)
    }

    pub fn from_path(path: impl AsRef<Path>) -> LayoutResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read catalog '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// The catalog bundled with the crate.
    pub fn builtin() -> LayoutResult<Self> {
        Self::from_json_str(BUILTIN_CATALOG_JSON)
    }

    pub fn get(&self, id: &str) -> Option<&LayoutPattern> {
        self.by_id.get(id).map(|&idx| &self.patterns[idx])
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl PatternSource for InMemoryCatalog {
    fn patterns(&self) -> &[LayoutPattern] {
        &self.patterns
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/store.rs"]
mod tests;
