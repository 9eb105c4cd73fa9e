//! Production [`AudioPort`] backed by rodio.
//!
//! [`RodioPort`] opens the default output device once, in
//! [`RodioPort::new`], and releases it when dropped — the device is a scoped
//! resource, not ambient process state.  Each `play` decodes the clip file
//! and hands it to a fresh [`rodio::Sink`]; the sink plays on rodio's own
//! thread, so `play` returns as soon as the clip is queued.

use std::fs::File;
use std::io::BufReader;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::bank::AudioRef;

use super::port::{AudioPort, PlaybackError};

// ---------------------------------------------------------------------------
// RodioPort
// ---------------------------------------------------------------------------

/// Plays clips through the default system output device.
pub struct RodioPort {
    // Dropping the stream closes the device and silences any playing sink.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
}

impl std::fmt::Debug for RodioPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioPort")
            .field("playing", &self.is_playing())
            .finish_non_exhaustive()
    }
}

impl RodioPort {
    /// Open the default output device.
    ///
    /// # Errors
    ///
    /// [`PlaybackError::DeviceUnavailable`] when no output device can be
    /// opened (headless machine, exclusive-mode conflict, …).
    pub fn new() -> Result<Self, PlaybackError> {
        let (_stream, handle) = OutputStream::try_default()
            .map_err(|e| PlaybackError::DeviceUnavailable(e.to_string()))?;

        log::info!("audio: output device opened");
        Ok(Self {
            _stream,
            handle,
            sink: None,
        })
    }
}

impl AudioPort for RodioPort {
    fn play(&mut self, clip: &AudioRef) -> Result<(), PlaybackError> {
        // Replace whatever is currently sounding.
        self.stop();

        let file = File::open(clip.path())
            .map_err(|e| PlaybackError::Unreadable(format!("{clip}: {e}")))?;

        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| PlaybackError::Decode(format!("{clip}: {e}")))?;

        let sink = Sink::try_new(&self.handle)
            .map_err(|e| PlaybackError::Output(e.to_string()))?;

        sink.append(source);
        log::debug!("audio: playing {clip}");
        self.sink = Some(sink);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
            log::debug!("audio: playback stopped");
        }
    }

    fn is_playing(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| !s.empty())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// CI machines often have no output device, so only the error shape is
    /// asserted when construction fails.
    #[test]
    fn new_opens_device_or_reports_unavailable() {
        match RodioPort::new() {
            Ok(port) => assert!(!port.is_playing()),
            Err(e) => assert!(matches!(e, PlaybackError::DeviceUnavailable(_))),
        }
    }

    #[test]
    fn play_missing_clip_is_unreadable() {
        let Ok(mut port) = RodioPort::new() else {
            return; // no device on this machine
        };
        let err = port
            .play(&AudioRef::new("/nonexistent/clip.mp3"))
            .unwrap_err();
        assert!(matches!(err, PlaybackError::Unreadable(_)));
    }

    #[test]
    fn stop_on_idle_port_is_a_no_op() {
        let Ok(mut port) = RodioPort::new() else {
            return;
        };
        port.stop();
        port.stop();
        assert!(!port.is_playing());
    }
}
