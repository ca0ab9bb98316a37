//! DisplaySink: everything the core tells the outside world
//!
//! The core never reads anything back from a sink.

use std::io::Write;
use colored::{ColoredString, Colorize};
use tracing::warn;
use crate::{SLOT_COUNT, TEXT_PENDING, TEXT_ANALYZING, TEXT_ANALYZING_SLOT, TEXT_UNLOCKED};
use crate::types::SinkEvent;

/// Output capability consumed by the core
pub trait DisplaySink {
    /// All four slots show the neutral "pending" state
    fn set_placeholder(&mut self);
    /// Show the analyzing state; requests are disabled for its duration
    fn set_analyzing(&mut self);
    /// Populate slot `index` (0..4)
    fn set_entry(&mut self, index: usize, value_text: &str, time_text: &str);
    /// "Unlocked" or "Locked • next set MM:SS"
    fn set_lock_text(&mut self, text: &str);
    fn set_request_enabled(&mut self, enabled: bool);
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn set_placeholder(&mut self) {
        (**self).set_placeholder()
    }
    fn set_analyzing(&mut self) {
        (**self).set_analyzing()
    }
    fn set_entry(&mut self, index: usize, value_text: &str, time_text: &str) {
        (**self).set_entry(index, value_text, time_text)
    }
    fn set_lock_text(&mut self, text: &str) {
        (**self).set_lock_text(text)
    }
    fn set_request_enabled(&mut self, enabled: bool) {
        (**self).set_request_enabled(enabled)
    }
}

// =============================================================================
// RECORDING
// =============================================================================

/// Keeps every call in order
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Drain recorded events
    pub fn take(&mut self) -> Vec<SinkEvent> {
        std::mem::take(&mut self.events)
    }

    /// (index, value, time) of every Entry event
    pub fn entries(&self) -> Vec<(usize, String, String)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Entry { index, value, time } => Some((*index, value.clone(), time.clone())),
                _ => None,
            })
            .collect()
    }

    /// Most recent lock text, if any
    pub fn last_lock_text(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            SinkEvent::LockText { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Most recent enable/disable, if any
    pub fn request_enabled(&self) -> Option<bool> {
        self.events.iter().rev().find_map(|e| match e {
            SinkEvent::RequestEnabled { enabled } => Some(*enabled),
            _ => None,
        })
    }
}

impl DisplaySink for RecordingSink {
    fn set_placeholder(&mut self) {
        self.events.push(SinkEvent::Placeholder);
    }

    fn set_analyzing(&mut self) {
        self.events.push(SinkEvent::Analyzing);
    }

    fn set_entry(&mut self, index: usize, value_text: &str, time_text: &str) {
        self.events.push(SinkEvent::Entry {
            index,
            value: value_text.to_string(),
            time: time_text.to_string(),
        });
    }

    fn set_lock_text(&mut self, text: &str) {
        self.events.push(SinkEvent::LockText { text: text.to_string() });
    }

    fn set_request_enabled(&mut self, enabled: bool) {
        self.events.push(SinkEvent::RequestEnabled { enabled });
    }
}

// =============================================================================
// JSON LINES
// =============================================================================

/// Writes each call as one JSON object per line
#[derive(Debug)]
pub struct JsonSink<W: Write> {
    out: W,
}

impl JsonSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: SinkEvent) {
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "failed to encode sink event");
                return;
            }
        };
        if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            warn!(error = %e, "failed to write sink event");
        }
    }
}

impl<W: Write> DisplaySink for JsonSink<W> {
    fn set_placeholder(&mut self) {
        self.emit(SinkEvent::Placeholder);
    }

    fn set_analyzing(&mut self) {
        self.emit(SinkEvent::Analyzing);
    }

    fn set_entry(&mut self, index: usize, value_text: &str, time_text: &str) {
        self.emit(SinkEvent::Entry {
            index,
            value: value_text.to_string(),
            time: time_text.to_string(),
        });
    }

    fn set_lock_text(&mut self, text: &str) {
        self.emit(SinkEvent::LockText { text: text.to_string() });
    }

    fn set_request_enabled(&mut self, enabled: bool) {
        self.emit(SinkEvent::RequestEnabled { enabled });
    }
}

// =============================================================================
// TERMINAL
// =============================================================================

/// Renders the four slots and the lock line for a human
///
/// Countdown updates rewrite the current line in place.
#[derive(Debug)]
pub struct TerminalSink<W: Write> {
    out: W,
    color: bool,
    /// A countdown line is on screen without a trailing newline
    line_open: bool,
}

impl TerminalSink<std::io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(std::io::stdout(), color)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            line_open: false,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn slot_line(&self, index: usize, value: &str, time: &str, style: fn(&str) -> ColoredString) -> String {
        format!(
            "  [{}] {:>8}  @ {}",
            index + 1,
            self.paint(value, style),
            self.paint(time, style)
        )
    }

    fn line(&mut self, text: &str) {
        let result = if self.line_open {
            self.line_open = false;
            writeln!(self.out, "\r\x1b[2K{}", text)
        } else {
            writeln!(self.out, "{}", text)
        };
        if let Err(e) = result {
            warn!(error = %e, "terminal write failed");
        }
    }

    fn rewrite(&mut self, text: &str) {
        self.line_open = true;
        if let Err(e) = write!(self.out, "\r\x1b[2K{}", text).and_then(|_| self.out.flush()) {
            warn!(error = %e, "terminal write failed");
        }
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn set_placeholder(&mut self) {
        for i in 0..SLOT_COUNT {
            let line = self.slot_line(i, TEXT_PENDING, TEXT_PENDING, |s| s.green());
            self.line(&line);
        }
    }

    fn set_analyzing(&mut self) {
        let text = self.paint(&format!("⏳ {}", TEXT_ANALYZING), |s| s.yellow());
        self.line(&text);
        for i in 0..SLOT_COUNT {
            let line = self.slot_line(i, TEXT_ANALYZING_SLOT, TEXT_ANALYZING_SLOT, |s| s.dimmed());
            self.line(&line);
        }
    }

    fn set_entry(&mut self, index: usize, value_text: &str, time_text: &str) {
        let line = self.slot_line(index, value_text, time_text, |s| s.bold());
        self.line(&line);
    }

    fn set_lock_text(&mut self, text: &str) {
        if text == TEXT_UNLOCKED {
            let text = self.paint(&format!("🔓 {}", text), |s| s.green());
            self.line(&text);
        } else {
            let text = self.paint(&format!("🔒 {}", text), |s| s.red());
            self.rewrite(&text);
        }
    }

    fn set_request_enabled(&mut self, enabled: bool) {
        if enabled {
            let text = self.paint("▶ GENERATE ready (press Enter)", |s| s.cyan());
            self.line(&text);
        }
    }
}
