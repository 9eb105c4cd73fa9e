//! The drill state machine — listen, type, retry, reveal.
//!
//! [`DrillSession`] owns a [`WordBank`] and an [`AudioPort`] and is driven by
//! discrete calls from whatever front end hosts it (the bundled console loop,
//! or an event-driven UI).
//!
//! # State machine
//!
//! ```text
//! Idle ──start()──▶ Awaiting-Guess ──submit_guess()──▶ (Evaluating)
//!                        ▲                                 │
//!                        │   Mismatch (attempts left)      │
//!                        ◀─────────────────────────────────┤
//!                        │   Match / Reveal, items left    │
//!                        ◀─────────────────────────────────┤
//!                                                          │ Match / Reveal,
//!                                                          ▼ bank exhausted
//!                                                      Completed
//! ```
//!
//! `Evaluating` is internal to [`submit_guess`](DrillSession::submit_guess):
//! every call resolves to an observable [`GuessOutcome`] before returning.
//!
//! Playback is fire-and-forget and its failures are non-fatal: each operation
//! that triggers a clip reports a [`PlaybackStatus`] alongside its result,
//! and the machine stays in Awaiting-Guess so a broken audio device degrades
//! the drill to text-only.

use thiserror::Error;

use crate::audio::{AudioPort, PlaybackError};
use crate::bank::{DrillItem, WordBank};

use super::report::SessionReport;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Externally observable states of a [`DrillSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed but not started.
    Idle,
    /// A clip has been requested; the next guess targets the current item.
    AwaitingGuess,
    /// Every item has been resolved.  Terminal — no further guesses.
    Completed,
}

impl Phase {
    /// A short human-readable label for prompts and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::AwaitingGuess => "awaiting-guess",
            Phase::Completed => "completed",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// DrillError
// ---------------------------------------------------------------------------

/// Usage errors of the session API.
///
/// These indicate a caller driving the machine in the wrong order; they are
/// always surfaced, never swallowed.
#[derive(Debug, Clone, Error)]
pub enum DrillError {
    /// `start()` was called on a session whose bank holds no items.
    #[error("the word bank is empty — nothing to drill")]
    EmptyBank,

    /// An operation was invoked in a state that does not accept it.
    #[error("`{operation}` is not valid in the {phase} state")]
    InvalidState {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Phase the session was in at the time.
        phase: Phase,
    },
}

// ---------------------------------------------------------------------------
// PlaybackStatus / GuessOutcome / GuessResult
// ---------------------------------------------------------------------------

/// What happened to the clip an operation tried to start.
#[derive(Debug, Clone)]
pub enum PlaybackStatus {
    /// The clip was handed to the audio port.
    Started,
    /// The audio port refused the clip; the drill continues text-only.
    Failed(PlaybackError),
    /// Nothing was played (blank guess, or the session just completed).
    Skipped,
}

/// Resolution of one `submit_guess` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Normalized guess equals the normalized target; the session advanced.
    Match {
        /// The matched word, original casing.
        word: String,
    },
    /// Wrong guess with attempts still left; the same item replays.
    Mismatch {
        /// Errors consumed on the current item so far.
        errors: u32,
        /// Wrong guesses remaining before the word is revealed.
        attempts_left: u32,
    },
    /// The error allowance ran out; the word is disclosed and the session
    /// advanced.  Added to the wrong-word list exactly once.
    Reveal {
        /// The correct word, original casing.
        word: String,
    },
    /// Blank or whitespace-only input — rejected without consuming an
    /// attempt; nothing changed.
    Blank,
}

/// Outcome of a guess plus the status of any playback it triggered.
#[derive(Debug, Clone)]
pub struct GuessResult {
    /// How the guess resolved.
    pub outcome: GuessOutcome,
    /// Playback triggered by the resolution (replay on mismatch, next item
    /// on advance).
    pub playback: PlaybackStatus,
}

// ---------------------------------------------------------------------------
// DrillSession
// ---------------------------------------------------------------------------

/// Default error allowance per word, matching the classic "reveal after
/// three failures" drill rule.
pub const DEFAULT_MAX_ERRORS: u32 = 3;

/// One traversal of a [`WordBank`], first item to last.
///
/// Owned by exactly one run; operations take `&mut self` and must not be
/// interleaved.  Abandoning a session early just means dropping it — the
/// port is asked to stop and no other cleanup happens.
pub struct DrillSession {
    bank: WordBank,
    port: Box<dyn AudioPort>,
    phase: Phase,
    cursor: usize,
    error_count: u32,
    max_errors: u32,
    wrong_words: Vec<String>,
}

impl std::fmt::Debug for DrillSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrillSession")
            .field("phase", &self.phase)
            .field("cursor", &self.cursor)
            .field("total", &self.bank.len())
            .field("error_count", &self.error_count)
            .field("max_errors", &self.max_errors)
            .field("wrong_words", &self.wrong_words)
            .finish_non_exhaustive()
    }
}

impl DrillSession {
    /// Create a session over `bank` with the default error allowance.
    pub fn new(bank: WordBank, port: Box<dyn AudioPort>) -> Self {
        Self::with_max_errors(bank, port, DEFAULT_MAX_ERRORS)
    }

    /// Create a session with a custom error allowance.
    ///
    /// `max_errors` must be positive; `0` is treated as `1` (the smallest
    /// allowance that still gives one attempt per word).
    pub fn with_max_errors(bank: WordBank, port: Box<dyn AudioPort>, max_errors: u32) -> Self {
        Self {
            bank,
            port,
            phase: Phase::Idle,
            cursor: 0,
            error_count: 0,
            max_errors: max_errors.max(1),
            wrong_words: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Zero-based index of the current item (equals [`total`](Self::total)
    /// once completed).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of items in the bank.
    pub fn total(&self) -> usize {
        self.bank.len()
    }

    /// Errors consumed on the current item.
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    /// Error allowance per word.
    pub fn max_errors(&self) -> u32 {
        self.max_errors
    }

    /// The item the next guess targets, or `None` once completed.
    pub fn current_item(&self) -> Option<&DrillItem> {
        if self.phase == Phase::Completed {
            return None;
        }
        self.bank.get(self.cursor)
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Begin the traversal: `Idle → Awaiting-Guess` at the first item, and
    /// request its clip.
    ///
    /// # Errors
    ///
    /// * [`DrillError::EmptyBank`] — the bank holds no items; the session
    ///   stays `Idle`.
    /// * [`DrillError::InvalidState`] — the session was already started.
    pub fn start(&mut self) -> Result<PlaybackStatus, DrillError> {
        if self.phase != Phase::Idle {
            return Err(DrillError::InvalidState {
                operation: "start",
                phase: self.phase,
            });
        }
        if self.bank.is_empty() {
            return Err(DrillError::EmptyBank);
        }

        self.phase = Phase::AwaitingGuess;
        self.cursor = 0;
        self.error_count = 0;
        log::info!("session: started with {} item(s)", self.bank.len());

        Ok(self.play_current())
    }

    /// Re-request the current item's clip without touching any counters.
    ///
    /// # Errors
    ///
    /// [`DrillError::InvalidState`] outside `Awaiting-Guess`.
    pub fn replay(&mut self) -> Result<PlaybackStatus, DrillError> {
        if self.phase != Phase::AwaitingGuess {
            return Err(DrillError::InvalidState {
                operation: "replay",
                phase: self.phase,
            });
        }

        self.port.stop();
        Ok(self.play_current())
    }

    /// Evaluate one guess against the current item.
    ///
    /// Both sides are trimmed and case-folded before comparison; internal
    /// whitespace stays significant.  See [`GuessOutcome`] for the three
    /// resolutions plus the blank-input case.
    ///
    /// # Errors
    ///
    /// [`DrillError::InvalidState`] outside `Awaiting-Guess`.
    pub fn submit_guess(&mut self, text: &str) -> Result<GuessResult, DrillError> {
        if self.phase != Phase::AwaitingGuess {
            return Err(DrillError::InvalidState {
                operation: "submit_guess",
                phase: self.phase,
            });
        }

        let guess = text.trim();
        if guess.is_empty() {
            // No attempt consumed; the caller must resubmit.
            return Ok(GuessResult {
                outcome: GuessOutcome::Blank,
                playback: PlaybackStatus::Skipped,
            });
        }

        // Awaiting-Guess guarantees the cursor is in range.
        let Some(item) = self.bank.get(self.cursor) else {
            return Err(DrillError::InvalidState {
                operation: "submit_guess",
                phase: self.phase,
            });
        };
        let word = item.word().to_string();

        if guess.to_lowercase() == word.to_lowercase() {
            log::debug!("session: correct guess for {word:?}");
            self.error_count = 0;
            let playback = self.advance();
            return Ok(GuessResult {
                outcome: GuessOutcome::Match { word },
                playback,
            });
        }

        // Increment, then compare against the allowance.
        self.error_count += 1;
        if self.error_count >= self.max_errors {
            log::debug!(
                "session: {word:?} revealed after {} error(s)",
                self.error_count
            );
            self.wrong_words.push(word.clone());
            self.error_count = 0;
            let playback = self.advance();
            Ok(GuessResult {
                outcome: GuessOutcome::Reveal { word },
                playback,
            })
        } else {
            let errors = self.error_count;
            let attempts_left = self.max_errors - errors;
            log::debug!("session: wrong guess for {word:?} ({attempts_left} attempt(s) left)");

            // Force a replay so the word is heard again before the retry.
            self.port.stop();
            let playback = self.play_current();
            Ok(GuessResult {
                outcome: GuessOutcome::Mismatch {
                    errors,
                    attempts_left,
                },
                playback,
            })
        }
    }

    /// The final summary.  Valid only once `Completed`; idempotent — equal
    /// values on repeated calls.
    ///
    /// # Errors
    ///
    /// [`DrillError::InvalidState`] before completion.
    pub fn report(&self) -> Result<SessionReport, DrillError> {
        if self.phase != Phase::Completed {
            return Err(DrillError::InvalidState {
                operation: "report",
                phase: self.phase,
            });
        }
        Ok(SessionReport::new(self.bank.len(), self.wrong_words.clone()))
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Move to the next item, completing the session at the end of the bank.
    fn advance(&mut self) -> PlaybackStatus {
        self.cursor += 1;
        if self.cursor == self.bank.len() {
            self.phase = Phase::Completed;
            log::info!(
                "session: completed — {}/{} correct",
                self.bank.len() - self.wrong_words.len(),
                self.bank.len()
            );
            return PlaybackStatus::Skipped;
        }
        self.play_current()
    }

    /// Request the current item's clip; failures are demoted to a status.
    fn play_current(&mut self) -> PlaybackStatus {
        let Some(item) = self.bank.get(self.cursor) else {
            return PlaybackStatus::Skipped;
        };
        match self.port.play(item.audio()) {
            Ok(()) => PlaybackStatus::Started,
            Err(e) => {
                log::warn!("session: playback failed for {}: {e}", item.audio());
                PlaybackStatus::Failed(e)
            }
        }
    }
}

impl Drop for DrillSession {
    fn drop(&mut self) {
        // Abandoning a session mid-drill must silence the port.
        self.port.stop();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
