//! Core types for the quiz engine.

use serde::{Deserialize, Serialize};

/// A vocabulary entry ready for drilling.
///
/// Supplied by the vocabulary provider, which guarantees that `meanings` and
/// `audio_urls` are non-empty; the engine does not re-validate them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabItem {
    pub id: i64,
    /// Proficiency tier the item belongs to (informational only).
    pub level: u32,
    /// Native-script surface form.
    pub characters: String,
    /// Phonetic readings; the first one is shown as the hint.
    pub readings: Vec<String>,
    /// Acceptable English meanings; the first one is shown on a miss.
    pub meanings: Vec<String>,
    pub audio_urls: Vec<String>,
}

/// A vocabulary item plus its in-session miss count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueEntry {
    pub item: VocabItem,
    /// Times this item has been answered incorrectly this session.
    pub attempts: u32,
}

/// One graded answer, recorded in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub item_id: i64,
    pub correct: bool,
}

/// Aggregate numbers for the summary screen.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub correct: u32,
    pub wrong: u32,
    /// Total answers submitted (equals correct + wrong).
    pub total: usize,
    /// Wall time since the session started.
    pub elapsed_seconds: i64,
}
