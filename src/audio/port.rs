//! The playback capability consumed by the drill session.
//!
//! # Overview
//!
//! [`AudioPort`] is the narrow interface the session needs: start a clip,
//! stop whatever is sounding, and ask whether something is still playing.
//! It is object-safe so the session can own a `Box<dyn AudioPort>` and be
//! driven by either the production [`RodioPort`](super::RodioPort) or a test
//! double.
//!
//! Playback failures are non-fatal by contract — the session reports them
//! and keeps accepting guesses, so a broken audio device degrades the drill
//! to text-only instead of aborting it.

use thiserror::Error;

use crate::bank::AudioRef;

// ---------------------------------------------------------------------------
// PlaybackError
// ---------------------------------------------------------------------------

/// All errors the playback subsystem can surface.
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    /// No usable audio output device.
    #[error("audio device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The clip file could not be opened.
    #[error("clip unreadable: {0}")]
    Unreadable(String),

    /// The clip file could not be decoded as audio.
    #[error("clip decode failed: {0}")]
    Decode(String),

    /// The output sink could not be created.
    #[error("audio output failed: {0}")]
    Output(String),
}

// ---------------------------------------------------------------------------
// AudioPort trait
// ---------------------------------------------------------------------------

/// Play / stop / query interface for one audio output.
///
/// # Contract
///
/// * `play` is fire-and-forget: it starts the clip and returns immediately,
///   never blocking until playback finishes.
/// * `play` on a port that is already sounding replaces the current clip.
/// * `stop` is idempotent; stopping an idle port does nothing.
pub trait AudioPort {
    /// Start playing `clip`, replacing any clip currently sounding.
    fn play(&mut self, clip: &AudioRef) -> Result<(), PlaybackError>;

    /// Stop playback immediately.
    fn stop(&mut self);

    /// `true` while a clip is still sounding.
    fn is_playing(&self) -> bool;
}

// Compile-time assertion: Box<dyn AudioPort> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn AudioPort>) {}
};

// ---------------------------------------------------------------------------
// MockPort  (test-only)
// ---------------------------------------------------------------------------

/// Test double that records every play request instead of making sound.
///
/// The play log is shared via `Rc` so tests can keep a handle after moving
/// the port into a session.
#[cfg(test)]
pub(crate) struct MockPort {
    played: std::rc::Rc<std::cell::RefCell<Vec<AudioRef>>>,
    stops: std::rc::Rc<std::cell::Cell<u32>>,
    playing: bool,
    fail_with: Option<PlaybackError>,
}

#[cfg(test)]
impl MockPort {
    /// A port whose plays always succeed.
    pub(crate) fn new() -> Self {
        Self {
            played: Default::default(),
            stops: Default::default(),
            playing: false,
            fail_with: None,
        }
    }

    /// A port whose plays always fail with `error`.
    pub(crate) fn failing(error: PlaybackError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::new()
        }
    }

    /// Handle to the play log, valid after the port is moved away.
    pub(crate) fn play_log(&self) -> std::rc::Rc<std::cell::RefCell<Vec<AudioRef>>> {
        std::rc::Rc::clone(&self.played)
    }

    /// Handle to the stop counter.
    pub(crate) fn stop_count(&self) -> std::rc::Rc<std::cell::Cell<u32>> {
        std::rc::Rc::clone(&self.stops)
    }
}

#[cfg(test)]
impl AudioPort for MockPort {
    fn play(&mut self, clip: &AudioRef) -> Result<(), PlaybackError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        self.played.borrow_mut().push(clip.clone());
        self.playing = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.stops.set(self.stops.get() + 1);
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_dyn_audio_port_compiles() {
        // If this test compiles, the trait is object-safe.
        let mut port: Box<dyn AudioPort> = Box::new(MockPort::new());
        let _ = port.play(&AudioRef::new("/clips/cat.mp3"));
    }

    #[test]
    fn mock_records_plays_in_order() {
        let mut port = MockPort::new();
        let log = port.play_log();

        port.play(&AudioRef::new("/a.mp3")).unwrap();
        port.play(&AudioRef::new("/b.mp3")).unwrap();

        let played = log.borrow();
        assert_eq!(played.len(), 2);
        assert_eq!(played[0], AudioRef::new("/a.mp3"));
        assert_eq!(played[1], AudioRef::new("/b.mp3"));
    }

    #[test]
    fn mock_play_then_stop_toggles_is_playing() {
        let mut port = MockPort::new();
        assert!(!port.is_playing());

        port.play(&AudioRef::new("/a.mp3")).unwrap();
        assert!(port.is_playing());

        port.stop();
        assert!(!port.is_playing());
    }

    #[test]
    fn mock_failing_port_returns_configured_error() {
        let mut port = MockPort::failing(PlaybackError::DeviceUnavailable("gone".into()));
        let log = port.play_log();

        let err = port.play(&AudioRef::new("/a.mp3")).unwrap_err();
        assert!(matches!(err, PlaybackError::DeviceUnavailable(_)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn playback_error_display_names_the_clip() {
        let e = PlaybackError::Unreadable("/clips/cat.mp3: gone".into());
        assert!(e.to_string().contains("/clips/cat.mp3"));
    }
}
