use serde::{Deserialize, Serialize};

use crate::catalog::store::PatternSource;
use crate::foundation::error::LayoutResult;
use crate::retrieval::assemble::{AssemblyOpts, AssemblyRequest, GeneratedLayout, assemble};
use crate::retrieval::query::Query;
use crate::retrieval::rank::{RankingOpts, rank};
use crate::retrieval::suggest::suggest;

/// Result of one retrieval call. An empty `layouts` list is a valid outcome.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResponse {
    pub layouts: Vec<GeneratedLayout>,
    pub suggestions: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineOpts {
    pub ranking: RankingOpts,
    pub assembly: AssemblyOpts,
}

/// Query-to-layouts facade over an injected pattern source.
pub struct LayoutEngine<S> {
    source: S,
    opts: EngineOpts,
}

impl<S: PatternSource> LayoutEngine<S> {
    pub fn new(source: S) -> Self {
        Self::with_opts(source, EngineOpts::default())
    }

    pub fn with_opts(source: S, opts: EngineOpts) -> Self {
        Self { source, opts }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn opts(&self) -> &EngineOpts {
        &self.opts
    }

    /// Validate `query`, rank the catalog, package the shortlist and attach suggestions.
    #[tracing::instrument(skip(self, query), fields(text = %query.text))]
    pub fn generate(&self, query: &Query) -> LayoutResult<LayoutResponse> {
        query.validate()?;

        let candidates = rank(query, &self.source, &self.opts.ranking);
        let request = AssemblyRequest {
            include_editable: query.wants_editable(),
            style: query.style.as_deref(),
        };
        let layouts = assemble(&candidates, &request, &self.opts.assembly);
        let suggestions = suggest(&query.text);

        tracing::debug!(
            layouts = layouts.len(),
            suggestions = suggestions.len(),
            "generated layouts"
        );
        Ok(LayoutResponse {
            layouts,
            suggestions,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/retrieval/engine.rs"]
mod tests;
