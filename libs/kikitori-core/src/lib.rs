//! Core quiz library shared by the kikitori applications.
//!
//! Provides:
//! - Answer normalization and matching for typed responses
//! - The quiz session engine (shuffled queue, grading, requeue-on-miss)
//! - Shared types (VocabItem, QueueEntry, HistoryRecord)

pub mod matching;
pub mod session;
pub mod types;

pub use matching::{acceptable_answers, is_match, normalize, primary_answer, primary_hint};
pub use session::{QuizSession, SubmitOutcome};
pub use types::{HistoryRecord, QueueEntry, SessionSummary, VocabItem};
