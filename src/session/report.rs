//! Final session summary.

// ---------------------------------------------------------------------------
// SessionReport
// ---------------------------------------------------------------------------

/// Immutable snapshot taken when a session completes.
///
/// `wrong_words` holds the original-cased words that were revealed after the
/// error allowance ran out, in traversal order.  Words answered correctly —
/// on the first try or after retries — never appear here.
///
/// The report is pure data: [`DrillSession::report`] returns an equal value
/// every time it is called after completion.
///
/// [`DrillSession::report`]: super::DrillSession::report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    total: usize,
    wrong_words: Vec<String>,
}

impl SessionReport {
    /// Assemble a report from the session's final counters.
    pub(crate) fn new(total: usize, wrong_words: Vec<String>) -> Self {
        debug_assert!(wrong_words.len() <= total);
        Self { total, wrong_words }
    }

    /// Number of items the session traversed.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Words revealed after exhausting the error allowance, in drill order.
    pub fn wrong_words(&self) -> &[String] {
        &self.wrong_words
    }

    /// Number of items answered correctly.
    pub fn correct_count(&self) -> usize {
        self.total - self.wrong_words.len()
    }

    /// `true` when no word had to be revealed.
    pub fn is_perfect(&self) -> bool {
        self.wrong_words.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
