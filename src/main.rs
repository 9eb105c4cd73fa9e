//! Application entry point — spelling drill.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Pick the word source: the command-line argument (a clip directory, or
//!    a `.json` bank manifest), falling back to the configured words dir.
//! 4. Open the audio output (degrade to a silent port when no device).
//! 5. Run console drill sessions until the user declines a restart.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use spelling_drill::{
    audio::{AudioPort, PlaybackError, RodioPort},
    bank::{AudioRef, DirSource, ManifestSource, WordBank, WordSource},
    config::AppConfig,
    console,
    session::DrillSession,
};

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("spelling drill starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Word source
    let arg = std::env::args().nth(1).map(PathBuf::from);
    let source = make_source(&config, arg);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    // 5. Drill loop — a fresh bank and session per run.
    loop {
        let bank = WordBank::load(source.as_ref())
            .context("could not build the word bank — check the clip directory")?;
        let mut session = DrillSession::with_max_errors(bank, make_port(), config.drill.max_errors);

        let Some(report) = console::run_session(&mut session, &mut input, &mut output)? else {
            break; // user quit mid-session
        };

        if !report.is_perfect()
            && ask_yes_no("copy missed words to the clipboard?", &mut input, &mut output)?
        {
            if let Err(e) = console::copy_missed_words(&report) {
                log::warn!("clipboard copy failed: {e:#}");
                writeln!(output, "(could not copy: {e})")?;
            } else {
                writeln!(output, "missed words copied")?;
            }
        }

        if !ask_yes_no("practice again?", &mut input, &mut output)? {
            break;
        }
        writeln!(output, "\nrestarting with a fresh bank…\n")?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Wiring helpers
// ---------------------------------------------------------------------------

/// A `.json` argument selects the manifest adapter; anything else is treated
/// as a clip directory.  Without an argument the configured dir is scanned.
fn make_source(config: &AppConfig, arg: Option<PathBuf>) -> Box<dyn WordSource> {
    match arg {
        Some(path) if path.extension().is_some_and(|e| e == "json") => {
            log::info!("bank: using manifest {}", path.display());
            Box::new(ManifestSource::new(path))
        }
        Some(path) => {
            log::info!("bank: scanning {}", path.display());
            Box::new(DirSource::with_extensions(path, &config.bank.extensions))
        }
        None => {
            log::info!("bank: scanning {}", config.bank.words_dir.display());
            Box::new(DirSource::with_extensions(
                &config.bank.words_dir,
                &config.bank.extensions,
            ))
        }
    }
}

/// Open the default output device, degrading to a silent port so the drill
/// still runs text-only on machines without audio.
fn make_port() -> Box<dyn AudioPort> {
    match RodioPort::new() {
        Ok(port) => Box::new(port),
        Err(e) => {
            log::warn!("audio unavailable ({e}); continuing text-only");
            Box::new(NoDevicePort {
                reason: e.to_string(),
            })
        }
    }
}

fn ask_yes_no(question: &str, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    write!(output, "{question} [y/N] ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    Ok(matches!(line.trim(), "y" | "Y" | "yes" | "Yes"))
}

// ---------------------------------------------------------------------------
// NoDevicePort — fallback AudioPort when no output device is present
// ---------------------------------------------------------------------------

struct NoDevicePort {
    reason: String,
}

impl AudioPort for NoDevicePort {
    fn play(&mut self, _clip: &AudioRef) -> Result<(), PlaybackError> {
        Err(PlaybackError::DeviceUnavailable(self.reason.clone()))
    }

    fn stop(&mut self) {}

    fn is_playing(&self) -> bool {
        false
    }
}
