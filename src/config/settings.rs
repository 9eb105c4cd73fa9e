//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::session::DEFAULT_MAX_ERRORS;

use super::AppPaths;

// ---------------------------------------------------------------------------
// BankConfig
// ---------------------------------------------------------------------------

/// Where the word bank comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankConfig {
    /// Directory scanned for `<word>.<extension>` clips when no directory is
    /// given on the command line.
    pub words_dir: std::path::PathBuf,
    /// Clip file extensions accepted by the directory scan (matched
    /// case-insensitively).
    pub extensions: Vec<String>,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            words_dir: "words".into(),
            extensions: vec!["mp3".into()],
        }
    }
}

// ---------------------------------------------------------------------------
// DrillConfig
// ---------------------------------------------------------------------------

/// Drill policy knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillConfig {
    /// Wrong guesses allowed per word before the answer is revealed.
    pub max_errors: u32,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            max_errors: DEFAULT_MAX_ERRORS,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use spelling_drill::config::AppConfig;
///
/// // Load (returns Default when the file is missing)
/// let config = AppConfig::load().unwrap();
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Word-bank source settings.
    pub bank: BankConfig,
    /// Drill policy settings.
    pub drill: DrillConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
