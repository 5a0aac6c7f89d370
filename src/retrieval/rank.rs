use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::pattern::{LayoutPattern, MAX_POPULARITY};
use crate::catalog::store::PatternSource;
use crate::retrieval::query::{Query, tokenize};

/// Knobs of the lexical ranking pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RankingOpts {
    /// Shortlist length.
    pub max_results: usize,
    /// Added when the query's category hint equals the pattern's category.
    pub category_bonus: f64,
    /// Tokens shorter than this (in characters) are ignored.
    pub min_token_chars: usize,
}

impl Default for RankingOpts {
    fn default() -> Self {
        Self {
            max_results: 3,
            category_bonus: 2.0,
            min_token_chars: 3,
        }
    }
}

/// A catalog pattern paired with its relevance score.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub pattern: &'a LayoutPattern,
    pub score: f64,
}

/// Score every pattern against `query` and return the best `max_results` with a positive score.
///
/// Equal scores are ordered by ascending pattern id, so the result does not depend on catalog
/// order.
#[tracing::instrument(skip(query, catalog, opts), fields(text = %query.text))]
pub fn rank<'a, S>(query: &Query, catalog: &'a S, opts: &RankingOpts) -> Vec<ScoredCandidate<'a>>
where
    S: PatternSource + ?Sized,
{
    let tokens = tokenize(&query.text, opts.min_token_chars);

    let mut scored: Vec<ScoredCandidate<'a>> = catalog
        .patterns()
        .iter()
        .map(|pattern| ScoredCandidate {
            pattern,
            score: score_pattern(&tokens, query, pattern, opts),
        })
        .filter(|c| c.score > 0.0)
        .collect();

    scored.sort_by(compare_candidates);
    scored.truncate(opts.max_results);

    tracing::debug!(
        tokens = tokens.len(),
        candidates = scored.len(),
        "ranked catalog"
    );
    scored
}

/// Raw relevance score of one pattern.
pub fn score_pattern(
    tokens: &[String],
    query: &Query,
    pattern: &LayoutPattern,
    opts: &RankingOpts,
) -> f64 {
    let haystack = pattern.haystack();
    let hits = tokens
        .iter()
        .filter(|t| haystack.contains(t.as_str()))
        .count();

    let mut score = hits as f64;
    if query.category == Some(pattern.category) {
        score += opts.category_bonus;
    }
    score + popularity_prior(pattern.popularity)
}

/// Query-independent prior in `[0, 1]`.
pub fn popularity_prior(popularity: u8) -> f64 {
    f64::from(popularity.min(MAX_POPULARITY)) / f64::from(MAX_POPULARITY)
}

fn compare_candidates(a: &ScoredCandidate<'_>, b: &ScoredCandidate<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.pattern.id.cmp(&b.pattern.id))
}

#[cfg(test)]
#[path = "../../tests/unit/retrieval/rank.rs"]
mod tests;
