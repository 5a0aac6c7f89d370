/// Maximum number of suggestions returned by [`suggest`].
pub const MAX_SUGGESTIONS: usize = 3;

struct SuggestionRow {
    triggers: &'static [&'static str],
    suggestions: [&'static str; 2],
}

const SUGGESTION_TABLE: &[SuggestionRow] = &[
    SuggestionRow {
        triggers: &["weekly", "week"],
        suggestions: [
            "Add a habit tracker to your weekly spread",
            "Include a weekly reflection section",
        ],
    },
    SuggestionRow {
        triggers: &["study", "notes"],
        suggestions: [
            "Try the Cornell note-taking layout",
            "Add a vocabulary or formula sidebar",
        ],
    },
    SuggestionRow {
        triggers: &["mood", "journal"],
        suggestions: [
            "Pair your journal with a mood tracker",
            "Add a daily gratitude log",
        ],
    },
    SuggestionRow {
        triggers: &["meeting", "business"],
        suggestions: [
            "Add an action items table with owners",
            "Include an attendees checklist",
        ],
    },
    SuggestionRow {
        triggers: &["fitness", "workout"],
        suggestions: [
            "Add a weekly workout schedule",
            "Track water intake and sleep alongside workouts",
        ],
    },
];

/// Follow-up prompts derived from trigger words in the query text.
///
/// Independent of the catalog and of ranking success.
pub fn suggest(text: &str) -> Vec<String> {
    let text = text.to_lowercase();
    SUGGESTION_TABLE
        .iter()
        .filter(|row| row.triggers.iter().any(|t| text.contains(t)))
        .flat_map(|row| row.suggestions)
        .take(MAX_SUGGESTIONS)
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/retrieval/suggest.rs"]
mod tests;
