//! Interactive console drill loop.
//!
//! Drives a [`DrillSession`] over line-based input: each round plays the
//! clip, shows the word-length hint, and reads one line.  Two commands are
//! recognised alongside guesses:
//!
//! * `/replay` — hear the current word again.
//! * `/quit`   — abandon the session.
//!
//! The loop is generic over its reader/writer so tests can script it; the
//! binary wires it to stdin/stdout.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::session::{DrillSession, GuessOutcome, Phase, PlaybackStatus, SessionReport};

// ---------------------------------------------------------------------------
// Hints
// ---------------------------------------------------------------------------

/// One underscore per character of the target word, e.g. `_ _ _ _ _` for
/// "apple".
pub fn dash_hint(word: &str) -> String {
    let mut hint = String::new();
    for (i, _) in word.chars().enumerate() {
        if i > 0 {
            hint.push(' ');
        }
        hint.push('_');
    }
    hint
}

// ---------------------------------------------------------------------------
// Session loop
// ---------------------------------------------------------------------------

/// Run `session` to completion (or `/quit`) over the given streams.
///
/// The session must be freshly constructed — `start()` is called here.
/// Returns `Ok(Some(report))` when the bank was traversed, `Ok(None)` when
/// the user quit or the input ended early.
pub fn run_session(
    session: &mut DrillSession,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Option<SessionReport>> {
    let status = session.start().context("could not start the session")?;
    note_playback(&status, output)?;

    let mut line = String::new();
    while session.phase() == Phase::AwaitingGuess {
        prompt(session, output)?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            // EOF — abandon like /quit.
            writeln!(output)?;
            return Ok(None);
        }

        match line.trim() {
            "/quit" => {
                writeln!(output, "session abandoned")?;
                return Ok(None);
            }
            "/replay" => {
                let status = session.replay()?;
                note_playback(&status, output)?;
                continue;
            }
            guess => {
                let result = session.submit_guess(guess)?;
                match result.outcome {
                    GuessOutcome::Match { .. } => {
                        writeln!(output, "correct!")?;
                    }
                    GuessOutcome::Mismatch { errors, .. } => {
                        writeln!(
                            output,
                            "wrong ({errors}/{}) — listen again",
                            session.max_errors()
                        )?;
                    }
                    GuessOutcome::Reveal { word } => {
                        writeln!(output, "out of attempts — the word was \"{word}\"")?;
                    }
                    GuessOutcome::Blank => {
                        writeln!(
                            output,
                            "(type what you hear, /replay to repeat, /quit to stop)"
                        )?;
                    }
                }
                note_playback(&result.playback, output)?;
            }
        }
    }

    let report = session.report()?;
    print_report(&report, output)?;
    Ok(Some(report))
}

fn prompt(session: &DrillSession, output: &mut impl Write) -> Result<()> {
    if let Some(item) = session.current_item() {
        writeln!(
            output,
            "word {}/{}: {}",
            session.cursor() + 1,
            session.total(),
            dash_hint(item.word())
        )?;
    }
    write!(output, "> ")?;
    output.flush()?;
    Ok(())
}

fn note_playback(status: &PlaybackStatus, output: &mut impl Write) -> Result<()> {
    if let PlaybackStatus::Failed(e) = status {
        writeln!(output, "(audio unavailable: {e})")?;
    }
    Ok(())
}

/// Print the final summary, missed words numbered in drill order.
pub fn print_report(report: &SessionReport, output: &mut impl Write) -> Result<()> {
    writeln!(
        output,
        "\nsession over: {}/{} correct",
        report.correct_count(),
        report.total()
    )?;

    if report.is_perfect() {
        writeln!(output, "no missed words — well done!")?;
    } else {
        writeln!(output, "missed words:")?;
        for (i, word) in report.wrong_words().iter().enumerate() {
            writeln!(output, "  {}. {word}", i + 1)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Clipboard
// ---------------------------------------------------------------------------

/// Copy the missed words, one per line, to the system clipboard.
pub fn copy_missed_words(report: &SessionReport) -> Result<()> {
    let text = report.wrong_words().join("\n");
    let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
    clipboard
        .set_text(text)
        .context("could not write to the clipboard")?;
    log::info!("console: {} missed word(s) copied", report.wrong_words().len());
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::audio::port::MockPort;
    use crate::bank::{AudioRef, DrillItem, WordBank};

    fn session(words: &[&str]) -> DrillSession {
        let items = words
            .iter()
            .map(|w| DrillItem::new(*w, AudioRef::new(format!("/clips/{w}.mp3"))).unwrap())
            .collect();
        DrillSession::new(WordBank::from_items(items), Box::new(MockPort::new()))
    }

    fn run_scripted(words: &[&str], script: &str) -> (Option<SessionReport>, String) {
        let mut s = session(words);
        let mut input = Cursor::new(script.to_string());
        let mut output = Vec::new();
        let report = run_session(&mut s, &mut input, &mut output).expect("loop");
        (report, String::from_utf8(output).expect("utf-8 output"))
    }

    // --- dash_hint ---

    #[test]
    fn dash_hint_one_underscore_per_char() {
        assert_eq!(dash_hint("apple"), "_ _ _ _ _");
        assert_eq!(dash_hint("a"), "_");
    }

    #[test]
    fn dash_hint_counts_chars_not_bytes() {
        assert_eq!(dash_hint("é"), "_");
    }

    // --- run_session ---

    #[test]
    fn clean_run_completes_and_reports() {
        let (report, out) = run_scripted(&["cat", "dog"], "cat\ndog\n");
        let report = report.expect("completed");
        assert!(report.is_perfect());
        assert!(out.contains("word 1/2"));
        assert!(out.contains("correct!"));
        assert!(out.contains("2/2 correct"));
    }

    #[test]
    fn quit_abandons_the_session() {
        let (report, out) = run_scripted(&["cat"], "/quit\n");
        assert!(report.is_none());
        assert!(out.contains("abandoned"));
    }

    #[test]
    fn eof_abandons_the_session() {
        let (report, _out) = run_scripted(&["cat"], "");
        assert!(report.is_none());
    }

    #[test]
    fn replay_keeps_prompting_the_same_word() {
        let (report, out) = run_scripted(&["cat"], "/replay\n/replay\ncat\n");
        assert!(report.expect("completed").is_perfect());
        // The word-1 prompt is repeated after each replay.
        assert!(out.matches("word 1/1").count() >= 3);
    }

    #[test]
    fn blank_line_reprompts_without_consuming_an_attempt() {
        let (report, out) = run_scripted(&["cat"], "\n\ncat\n");
        assert!(report.expect("completed").is_perfect());
        assert!(out.contains("type what you hear"));
    }

    #[test]
    fn exhausted_word_is_revealed_and_listed() {
        let (report, out) = run_scripted(&["dog"], "dig\ndig\ndig\n");
        let report = report.expect("completed");
        assert_eq!(report.wrong_words(), ["dog"]);
        assert!(out.contains("the word was \"dog\""));
        assert!(out.contains("missed words:"));
        assert!(out.contains("1. dog"));
    }

    #[test]
    fn mismatch_shows_the_attempt_counter() {
        let (_report, out) = run_scripted(&["cat"], "cot\ncat\n");
        assert!(out.contains("wrong (1/3)"));
    }

    #[test]
    fn hint_matches_word_length() {
        let (_report, out) = run_scripted(&["bee"], "bee\n");
        assert!(out.contains("_ _ _"));
    }
}
