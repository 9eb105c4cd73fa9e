//! Audio playback — the drill's only side-effect channel.
//!
//! # Pipeline
//!
//! ```text
//! DrillSession ── play(AudioRef) ──▶ AudioPort ──▶ RodioPort (default device)
//! ```
//!
//! The session depends only on the [`AudioPort`] trait; [`RodioPort`] is the
//! production implementation.  A playback failure is surfaced to the caller
//! and never interrupts the drill.

pub mod player;
pub mod port;

pub use player::RodioPort;
pub use port::{AudioPort, PlaybackError};
