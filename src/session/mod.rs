//! Drill session — the state machine and its terminal report.
//!
//! ```text
//! WordBank ──▶ DrillSession ──play/stop──▶ AudioPort
//!                  │
//!                  └─▶ GuessResult per guess … SessionReport at the end
//! ```

pub mod drill;
pub mod report;

pub use drill::{
    DrillError, DrillSession, GuessOutcome, GuessResult, Phase, PlaybackStatus,
    DEFAULT_MAX_ERRORS,
};
pub use report::SessionReport;
