//! Answer matching for typed quiz responses.

use std::collections::HashSet;

use crate::types::VocabItem;

/// Punctuation stripped before comparison.
const STRIPPED_PUNCTUATION: &str = ".,/#!$%^&*;:{}=-_`~()\"";

/// Canonicalize text for comparison: trim, lower-case, strip punctuation,
/// collapse whitespace runs to a single space. Idempotent.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(*c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The item's meanings, deduplicated by normalized form.
///
/// First-seen order is preserved and the original casing of the first
/// occurrence is kept. Meanings that normalize to the empty string are
/// skipped, so every returned entry is actually answerable.
pub fn acceptable_answers(item: &VocabItem) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for meaning in &item.meanings {
        let key = normalize(meaning);
        if key.is_empty() || !seen.insert(key) {
            continue;
        }
        out.push(meaning.as_str());
    }
    out
}

/// Whether a typed answer matches any acceptable meaning.
///
/// Exact normalized equality only; no edit-distance or partial matching.
pub fn is_match(item: &VocabItem, raw_answer: &str) -> bool {
    let typed = normalize(raw_answer);
    acceptable_answers(item)
        .iter()
        .any(|answer| normalize(answer) == typed)
}

/// The canonical correct answer shown on a miss.
pub fn primary_answer(item: &VocabItem) -> &str {
    acceptable_answers(item).first().copied().unwrap_or("")
}

/// The primary reading used as a hint, or empty if the item has none.
pub fn primary_hint(item: &VocabItem) -> &str {
    item.readings.first().map(String::as_str).unwrap_or("")
}
