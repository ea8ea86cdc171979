//! Quiz session engine: shuffled queue, grading, and the requeue-on-miss
//! policy.
//!
//! One `QuizSession` covers one run from `start` to queue exhaustion. All
//! operations are synchronous and the session is a single mutable aggregate;
//! callers that share it across threads must serialize access themselves.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::matching;
use crate::types::{HistoryRecord, QueueEntry, SessionSummary, VocabItem};

/// How many other items a missed entry sits behind before resurfacing.
const REQUEUE_OFFSET: usize = 3;

/// Outcome of grading one typed answer.
///
/// `correct_answer` and `hint` are filled in regardless of `ok` so the caller
/// can render feedback either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub ok: bool,
    pub correct_answer: String,
    pub hint: String,
}

impl SubmitOutcome {
    /// Neutral result returned when there is nothing to grade.
    fn absent() -> Self {
        Self {
            ok: false,
            correct_answer: String::new(),
            hint: String::new(),
        }
    }
}

/// One quiz session over a shuffled queue of vocabulary items.
///
/// Generic over the random source so tests can inject a seeded generator and
/// assert exact orderings; `QuizSession::new` seeds from the OS.
pub struct QuizSession<R = StdRng> {
    queue: Vec<QueueEntry>,
    position: usize,
    finished: bool,
    correct: u32,
    wrong: u32,
    history: Vec<HistoryRecord>,
    started_at: DateTime<Utc>,
    rng: R,
}

impl QuizSession<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl Default for QuizSession<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> QuizSession<R> {
    /// Create a session with an injected random source. The session starts
    /// finished; call [`start`](Self::start) to begin a run.
    pub fn with_rng(rng: R) -> Self {
        Self {
            queue: Vec::new(),
            position: 0,
            finished: true,
            correct: 0,
            wrong: 0,
            history: Vec::new(),
            started_at: Utc::now(),
            rng,
        }
    }

    /// Begin a run over `items`, unconditionally discarding any prior state.
    ///
    /// The items are drawn in a uniformly random order. Duplicate ids in the
    /// input are kept as independent queue entries. An empty input starts the
    /// session already finished.
    pub fn start(&mut self, items: Vec<VocabItem>) {
        let mut queue: Vec<QueueEntry> = items
            .into_iter()
            .map(|item| QueueEntry { item, attempts: 0 })
            .collect();
        queue.shuffle(&mut self.rng);

        self.finished = queue.is_empty();
        self.queue = queue;
        self.position = 0;
        self.correct = 0;
        self.wrong = 0;
        self.history.clear();
        self.started_at = Utc::now();
    }

    /// The entry up for answering, or `None` once the session is finished.
    pub fn current(&self) -> Option<&QueueEntry> {
        if self.finished {
            return None;
        }
        self.queue.get(self.position)
    }

    /// Grade a typed answer against the current item and record the result.
    ///
    /// A correct answer removes the entry from the queue; a miss bumps its
    /// `attempts` and reinserts it behind up to three other items, clamped to
    /// the end of the queue, with no retry cap. Either way
    /// the queue pointer ends up on the next entry to present (or the session
    /// finishes). With no current item this is a neutral no-op.
    pub fn submit(&mut self, raw_answer: &str) -> SubmitOutcome {
        if self.current().is_none() {
            return SubmitOutcome::absent();
        }

        let entry = &self.queue[self.position];
        let ok = matching::is_match(&entry.item, raw_answer);
        let outcome = SubmitOutcome {
            ok,
            correct_answer: matching::primary_answer(&entry.item).to_string(),
            hint: matching::primary_hint(&entry.item).to_string(),
        };
        self.history.push(HistoryRecord {
            item_id: entry.item.id,
            correct: ok,
        });

        let mut entry = self.queue.remove(self.position);
        if ok {
            self.correct += 1;
        } else {
            self.wrong += 1;
            entry.attempts += 1;
            let slot = (self.position + REQUEUE_OFFSET).min(self.queue.len());
            self.queue.insert(slot, entry);
        }

        if self.queue.is_empty() {
            self.finished = true;
            self.position = 0;
        } else {
            // Removal shifted everything after the slot down by one, so the
            // next item already occupies `position` unless that was the tail.
            self.position = self.position.min(self.queue.len() - 1);
        }
        outcome
    }

    /// Explicit "done with this card" command for the presentation layer.
    ///
    /// Grading already leaves the queue pointer on the next entry, so this
    /// only guards the finished case and moves nothing.
    pub fn advance(&mut self) {
        if self.finished || self.queue.is_empty() {
            return;
        }
        debug_assert!(self.position < self.queue.len());
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn correct_count(&self) -> u32 {
        self.correct
    }

    pub fn wrong_count(&self) -> u32 {
        self.wrong
    }

    /// Graded answers in submission order.
    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    /// Items still waiting to be answered correctly.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            correct: self.correct,
            wrong: self.wrong,
            total: self.history.len(),
            elapsed_seconds: (Utc::now() - self.started_at).num_seconds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(id: i64, meaning: &str) -> VocabItem {
        VocabItem {
            id,
            level: 1,
            characters: format!("字{id}"),
            readings: vec![format!("よみ{id}")],
            meanings: vec![meaning.to_string()],
            audio_urls: vec![format!("https://example.com/{id}.mp3")],
        }
    }

    fn items(n: i64) -> Vec<VocabItem> {
        (0..n).map(|id| item(id, &format!("meaning{id}"))).collect()
    }

    fn seeded(seed: u64) -> QuizSession<StdRng> {
        QuizSession::with_rng(StdRng::seed_from_u64(seed))
    }

    fn queue_ids(session: &QuizSession<StdRng>) -> Vec<i64> {
        session.queue.iter().map(|e| e.item.id).collect()
    }

    /// Answer the current item correctly using its primary meaning.
    fn answer_correctly(session: &mut QuizSession<StdRng>) {
        let meaning = session.current().unwrap().item.meanings[0].clone();
        let outcome = session.submit(&meaning);
        assert!(outcome.ok);
        session.advance();
    }

    #[test]
    fn test_empty_start_is_immediately_finished() {
        let mut session = seeded(1);
        session.start(Vec::new());

        assert!(session.finished());
        assert!(session.current().is_none());
        assert_eq!(session.correct_count(), 0);
        assert_eq!(session.wrong_count(), 0);
        assert_eq!(session.history(), &[]);
    }

    #[test]
    fn test_submit_without_current_item_is_neutral() {
        let mut session = seeded(1);
        session.start(Vec::new());

        let outcome = session.submit("anything");
        assert_eq!(outcome, SubmitOutcome::absent());
        assert_eq!(session.history(), &[]);

        // Same once a real session has drained.
        session.start(vec![item(7, "cat")]);
        answer_correctly(&mut session);
        let outcome = session.submit("cat");
        assert!(!outcome.ok);
        assert_eq!(outcome.correct_answer, "");
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_start_produces_a_permutation() {
        let mut session = seeded(42);
        session.start(items(25));

        let mut ids = queue_ids(&session);
        ids.sort_unstable();
        assert_eq!(ids, (0..25).collect::<Vec<_>>());
    }

    #[test]
    fn test_seeded_shuffles_are_deterministic() {
        let mut a = seeded(9);
        let mut b = seeded(9);
        a.start(items(20));
        b.start(items(20));
        assert_eq!(queue_ids(&a), queue_ids(&b));
    }

    #[test]
    fn test_duplicate_ids_are_independent_entries() {
        let mut session = seeded(3);
        session.start(vec![item(1, "dog"), item(1, "dog")]);
        assert_eq!(session.remaining(), 2);

        answer_correctly(&mut session);
        assert_eq!(session.remaining(), 1);
        assert!(!session.finished());
    }

    #[test]
    fn test_single_item_correct_with_formatting_noise() {
        let mut session = seeded(5);
        session.start(vec![item(1, "cat")]);

        let outcome = session.submit("Cat.");
        assert!(outcome.ok);
        assert_eq!(outcome.correct_answer, "cat");
        assert_eq!(outcome.hint, "よみ1");

        assert!(session.finished());
        assert!(session.current().is_none());
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.wrong_count(), 0);
        assert_eq!(
            session.history(),
            &[HistoryRecord {
                item_id: 1,
                correct: true
            }]
        );
    }

    #[test]
    fn test_miss_requeues_three_slots_back() {
        let mut session = seeded(11);
        session.start(items(6));
        let before = queue_ids(&session);

        let outcome = session.submit("not a meaning");
        assert!(!outcome.ok);

        // [a,b,c,d,e,f] with a missed becomes [b,c,d,a,e,f].
        let expected = vec![
            before[1], before[2], before[3], before[0], before[4], before[5],
        ];
        assert_eq!(queue_ids(&session), expected);
        assert_eq!(session.current().unwrap().item.id, before[1]);
        assert_eq!(session.queue[3].attempts, 1);
        assert_eq!(session.wrong_count(), 1);
        assert!(!session.finished());
    }

    #[test]
    fn test_miss_near_tail_clamps_to_queue_end() {
        let mut session = seeded(13);
        session.start(items(4));
        let before = queue_ids(&session);

        // Miss at position 0 in a 4-item queue: insert at min(3, 3) = end.
        session.submit("wrong");
        let expected = vec![before[1], before[2], before[3], before[0]];
        assert_eq!(queue_ids(&session), expected);
    }

    #[test]
    fn test_miss_on_sole_item_resurfaces_immediately() {
        let mut session = seeded(17);
        session.start(vec![item(1, "dog")]);

        let outcome = session.submit("wrong");
        assert!(!outcome.ok);
        assert_eq!(outcome.correct_answer, "dog");
        assert!(!session.finished());
        assert_eq!(session.current().unwrap().item.id, 1);
        assert_eq!(session.current().unwrap().attempts, 1);
    }

    #[test]
    fn test_unlimited_retries_until_correct() {
        let mut session = seeded(19);
        session.start(vec![item(1, "dog")]);

        for _ in 0..5 {
            assert!(!session.submit("wrong").ok);
        }
        assert_eq!(session.current().unwrap().attempts, 5);

        assert!(session.submit("dog").ok);
        assert!(session.finished());
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.wrong_count(), 5);
        assert_eq!(session.history().len(), 6);
    }

    #[test]
    fn test_counters_and_history_stay_conserved() {
        let mut session = seeded(23);
        session.start(items(8));

        let mut submissions = 0;
        while !session.finished() {
            // Alternate a miss with the right answer to exercise requeueing.
            if submissions % 2 == 0 {
                session.submit("definitely wrong");
            } else {
                let meaning = session.current().unwrap().item.meanings[0].clone();
                session.submit(&meaning);
            }
            submissions += 1;
            assert_eq!(
                session.correct_count() as usize + session.wrong_count() as usize,
                session.history().len()
            );
            assert!(submissions < 1000, "session failed to terminate");
        }
        assert_eq!(session.history().len(), submissions);
    }

    #[test]
    fn test_all_correct_terminates_in_n_submissions() {
        let n = 12;
        let mut session = seeded(29);
        session.start(items(n));

        for _ in 0..n {
            assert!(!session.finished());
            answer_correctly(&mut session);
        }
        assert!(session.finished());
        assert_eq!(session.correct_count(), n as u32);
        assert_eq!(session.wrong_count(), 0);
    }

    #[test]
    fn test_restart_discards_previous_run() {
        let mut session = seeded(31);
        session.start(items(3));
        session.submit("wrong");
        answer_correctly(&mut session);

        session.start(items(5));
        assert!(!session.finished());
        assert_eq!(session.remaining(), 5);
        assert_eq!(session.correct_count(), 0);
        assert_eq!(session.wrong_count(), 0);
        assert_eq!(session.history(), &[]);
    }

    #[test]
    fn test_advance_is_safe_anytime() {
        let mut session = seeded(37);
        session.advance();

        session.start(items(2));
        session.advance();
        assert_eq!(session.remaining(), 2);
        assert!(session.current().is_some());

        answer_correctly(&mut session);
        answer_correctly(&mut session);
        session.advance();
        assert!(session.finished());
    }

    #[test]
    fn test_summary_totals() {
        let mut session = seeded(41);
        session.start(items(2));
        session.submit("wrong");
        answer_correctly(&mut session);
        answer_correctly(&mut session);

        let summary = session.summary();
        assert_eq!(summary.correct, 2);
        assert_eq!(summary.wrong, 1);
        assert_eq!(summary.total, 3);
        assert!(summary.elapsed_seconds >= 0);
    }
}
