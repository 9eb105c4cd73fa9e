//! Spelling drill — a listen-and-type practice engine.
//!
//! Given a bank of (word, audio clip) pairs, the drill plays each clip,
//! accepts typed guesses, retries up to a per-word error allowance, reveals
//! the word when the allowance runs out, and ends with a report of the
//! missed words.
//!
//! # Architecture
//!
//! ```text
//! WordSource ──▶ WordBank ──▶ DrillSession ──play──▶ AudioPort
//!                                  │
//!                                  └──▶ GuessResult … SessionReport
//! ```
//!
//! * [`bank`] — item loading: directory scan or JSON manifest, filtering and
//!   deterministic ordering.
//! * [`audio`] — the [`AudioPort`](audio::AudioPort) playback capability and
//!   its rodio-backed implementation.
//! * [`session`] — the drill state machine, retry/reveal policy, and the
//!   final [`SessionReport`](session::SessionReport).
//! * [`config`] — TOML settings and platform paths.
//! * [`console`] — the line-based front end used by the binary.
//!
//! The session is presentation-agnostic: any front end that can call
//! `start` / `replay` / `submit_guess` / `report` can host a drill.

pub mod audio;
pub mod bank;
pub mod config;
pub mod console;
pub mod session;

pub use audio::{AudioPort, PlaybackError, RodioPort};
pub use bank::{AudioRef, DirSource, DrillItem, ManifestSource, SourceError, WordBank, WordSource};
pub use config::AppConfig;
pub use session::{
    DrillError, DrillSession, GuessOutcome, GuessResult, Phase, PlaybackStatus, SessionReport,
};
