//! Pluggable word-bank sources.
//!
//! # Overview
//!
//! [`WordSource`] is the input boundary of the drill: anything that can
//! enumerate `(word, clip)` pairs.  [`WordBank::load`](super::WordBank::load)
//! consumes a source, so the core never depends on a particular storage
//! layout.
//!
//! Two adapters ship with the crate:
//!
//! * [`DirSource`] — the classic layout: a directory of `<word>.mp3` files,
//!   the word being the file stem.
//! * [`ManifestSource`] — a JSON manifest listing explicit word / file
//!   pairs, for banks whose file names cannot carry the word.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::item::AudioRef;

// ---------------------------------------------------------------------------
// SourceError
// ---------------------------------------------------------------------------

/// Failures while building a word bank.
///
/// Both variants are fatal to *starting* a session; the core never retries a
/// source.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The source could not be read at all (missing directory, unreadable
    /// manifest, malformed JSON, …).
    #[error("word source unavailable: {0}")]
    Unavailable(String),

    /// The source was readable but yielded no usable items after filtering.
    #[error("word source contains no usable items")]
    Empty,
}

// ---------------------------------------------------------------------------
// WordSource trait
// ---------------------------------------------------------------------------

/// Object-safe enumeration of `(word, clip)` pairs.
///
/// # Contract
///
/// * Returns every entry the source knows about, in any order — the bank
///   sorts deterministically afterwards.
/// * Words may be empty or untrimmed here; the bank filters and trims.
/// * Returns [`SourceError::Unavailable`] when the backing store cannot be
///   read; never returns [`SourceError::Empty`] itself.
pub trait WordSource {
    /// Enumerate all `(word, clip)` pairs.
    fn entries(&self) -> Result<Vec<(String, AudioRef)>, SourceError>;
}

// Compile-time assertion: Box<dyn WordSource> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn WordSource>) {}
};

// ---------------------------------------------------------------------------
// DirSource
// ---------------------------------------------------------------------------

/// Scans a directory for audio files named `<word>.<extension>`.
///
/// Extension matching is case-insensitive (`CAT.MP3` and `cat.mp3` both
/// count).  Files with other extensions, subdirectories, and files whose
/// stem is not valid UTF-8 are skipped.
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
    extensions: Vec<String>,
}

impl DirSource {
    /// Scan `dir` for the default `mp3` extension.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_extensions(dir, ["mp3"])
    }

    /// Scan `dir` for a custom extension set (stored lowercase).
    pub fn with_extensions<I, S>(dir: impl Into<PathBuf>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            dir: dir.into(),
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().to_lowercase())
                .collect(),
        }
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .is_some_and(|e| self.extensions.iter().any(|want| *want == e))
    }
}

impl WordSource for DirSource {
    fn entries(&self) -> Result<Vec<(String, AudioRef)>, SourceError> {
        let read_dir = fs::read_dir(&self.dir).map_err(|e| {
            SourceError::Unavailable(format!("{}: {e}", self.dir.display()))
        })?;

        let mut out = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| {
                SourceError::Unavailable(format!("{}: {e}", self.dir.display()))
            })?;
            let path = entry.path();

            if !path.is_file() || !self.matches_extension(&path) {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                log::debug!("bank: skipping non-UTF-8 file name {}", path.display());
                continue;
            };

            out.push((stem.to_string(), AudioRef::new(path)));
        }

        log::debug!(
            "bank: {} candidate file(s) in {}",
            out.len(),
            self.dir.display()
        );
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// ManifestSource
// ---------------------------------------------------------------------------

/// One entry of a JSON bank manifest.
#[derive(Debug, Deserialize)]
struct ManifestEntry {
    word: String,
    file: PathBuf,
}

/// Reads a JSON manifest of the form
/// `[{ "word": "apple", "file": "clips/apple.mp3" }, …]`.
///
/// Relative `file` paths are resolved against the manifest's own directory.
#[derive(Debug, Clone)]
pub struct ManifestSource {
    path: PathBuf,
}

impl ManifestSource {
    /// Use the manifest at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WordSource for ManifestSource {
    fn entries(&self) -> Result<Vec<(String, AudioRef)>, SourceError> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            SourceError::Unavailable(format!("{}: {e}", self.path.display()))
        })?;

        let entries: Vec<ManifestEntry> = serde_json::from_str(&text).map_err(|e| {
            SourceError::Unavailable(format!("{}: invalid manifest: {e}", self.path.display()))
        })?;

        let base = self.path.parent().unwrap_or_else(|| Path::new("."));

        Ok(entries
            .into_iter()
            .map(|entry| {
                let file = if entry.file.is_absolute() {
                    entry.file
                } else {
                    base.join(entry.file)
                };
                (entry.word, AudioRef::new(file))
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// VecSource  (test-only)
// ---------------------------------------------------------------------------

/// In-memory source for unit tests — returns a pre-configured entry list or
/// a pre-configured error.
#[cfg(test)]
pub(crate) struct VecSource {
    response: Result<Vec<(String, AudioRef)>, SourceError>,
}

#[cfg(test)]
impl VecSource {
    /// Source yielding the given raw words, each with a synthetic clip ref.
    pub(crate) fn of_words<S: AsRef<str>>(words: impl IntoIterator<Item = S>) -> Self {
        Self {
            response: Ok(words
                .into_iter()
                .map(|w| {
                    let w = w.as_ref().to_string();
                    let clip = AudioRef::new(format!("/clips/{w}.mp3"));
                    (w, clip)
                })
                .collect()),
        }
    }

    /// Source that always fails with `error`.
    pub(crate) fn err(error: SourceError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[cfg(test)]
impl WordSource for VecSource {
    fn entries(&self) -> Result<Vec<(String, AudioRef)>, SourceError> {
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
