use serde::{Deserialize, Serialize};

use crate::catalog::pattern::{Category, EditableElement};
use crate::retrieval::rank::ScoredCandidate;

/// Label of the lexical catalog retrieval path in [`LayoutMetadata::source`].
pub const LEXICAL_SOURCE: &str = "lexical-catalog";

const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;charset=utf-8,";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssemblyOpts {
    /// Score at which confidence saturates at 1.0.
    pub confidence_divisor: f64,
    pub source_label: String,
}

impl Default for AssemblyOpts {
    fn default() -> Self {
        Self {
            confidence_divisor: 5.0,
            source_label: LEXICAL_SOURCE.to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutMetadata {
    pub source: String,
    pub popularity: u8,
    pub tags: Vec<String>,
    /// Echo of the query's style hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

/// A ranked pattern packaged for callers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLayout {
    pub pattern_id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub confidence: f64,
    /// `data:image/svg+xml` URI with the percent-encoded artwork.
    pub artwork: String,
    pub editable_elements: Vec<EditableElement>,
    pub metadata: LayoutMetadata,
}

/// Per-call assembly choices derived from the query.
#[derive(Clone, Debug, Default)]
pub struct AssemblyRequest<'q> {
    pub include_editable: bool,
    pub style: Option<&'q str>,
}

/// Package ranked candidates, preserving their order.
pub fn assemble(
    candidates: &[ScoredCandidate<'_>],
    request: &AssemblyRequest<'_>,
    opts: &AssemblyOpts,
) -> Vec<GeneratedLayout> {
    candidates
        .iter()
        .map(|c| {
            let p = c.pattern;
            GeneratedLayout {
                pattern_id: p.id.clone(),
                name: p.name.clone(),
                description: p.description.clone(),
                category: p.category,
                confidence: confidence(c.score, opts.confidence_divisor),
                artwork: svg_data_uri(&p.artwork),
                editable_elements: if request.include_editable {
                    p.editable_elements.clone()
                } else {
                    Vec::new()
                },
                metadata: LayoutMetadata {
                    source: opts.source_label.clone(),
                    popularity: p.popularity,
                    tags: p.tags.clone(),
                    style: request.style.map(str::to_owned),
                },
            }
        })
        .collect()
}

/// Normalize a raw score into `[0, 1]`.
pub fn confidence(score: f64, divisor: f64) -> f64 {
    if !score.is_finite() || !divisor.is_finite() || divisor <= 0.0 {
        return 0.0;
    }
    (score / divisor).clamp(0.0, 1.0)
}

/// Wrap an SVG document as a directly embeddable data URI.
pub fn svg_data_uri(svg: &str) -> String {
    let encoded = urlencoding::encode(svg);
    let mut out = String::with_capacity(SVG_DATA_URI_PREFIX.len() + encoded.len());
    out.push_str(SVG_DATA_URI_PREFIX);
    out.push_str(&encoded);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/retrieval/assemble.rs"]
mod tests;
