//! Drill items and the opaque audio-clip handle.
//!
//! A [`DrillItem`] is one (word, clip) pair to be practised.  Items are
//! immutable once constructed; the word is stored trimmed and is guaranteed
//! non-empty by [`DrillItem::new`].

use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// AudioRef
// ---------------------------------------------------------------------------

/// Opaque reference to one audio clip.
///
/// The drill session never looks inside — it only hands the reference back
/// to the [`AudioPort`](crate::audio::AudioPort) when the clip should be
/// played.  Internally it names a file on disk, but nothing outside the
/// `audio` module depends on that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioRef(PathBuf);

impl AudioRef {
    /// Wrap a clip location in an opaque handle.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// The underlying clip location, for `AudioPort` implementations.
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl std::fmt::Display for AudioRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

// ---------------------------------------------------------------------------
// DrillItem
// ---------------------------------------------------------------------------

/// One (word, audio clip) pair.
///
/// The word keeps its original casing — reveals show it exactly as the
/// source spelled it.  Guess comparison case-folds separately; see
/// [`DrillSession::submit_guess`](crate::session::DrillSession::submit_guess).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillItem {
    word: String,
    audio: AudioRef,
}

impl DrillItem {
    /// Build an item from a raw word and its clip handle.
    ///
    /// The word is trimmed first; returns `None` when nothing remains, so
    /// sources can `filter_map` malformed entries away.
    pub fn new(word: impl AsRef<str>, audio: AudioRef) -> Option<Self> {
        let word = word.as_ref().trim();
        if word.is_empty() {
            return None;
        }
        Some(Self {
            word: word.to_string(),
            audio,
        })
    }

    /// The target word, original casing, no surrounding whitespace.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Handle of the clip that pronounces this word.
    pub fn audio(&self) -> &AudioRef {
        &self.audio
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
