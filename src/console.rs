//! Console mirroring.
//!
//! [`ConsoleMirror`] wraps a [`Console`] so that every logged line is both
//! forwarded and appended to a [`ConsoleBuffer`]. The buffer is owned by
//! whoever creates it (normally a [`crate::session::PageSession`]) and is
//! only emptied by an explicit [`ConsoleBuffer::clear`].
//!
//! The same behavior is installed into live pages with
//! [`INSTALL_CONSOLE_MIRROR`], which buffers into `window.console.logs`.

use std::sync::{Arc, Mutex};

use tracing::info;

/// Installs the in-page mirror. Running it twice wraps `console.log` twice.
pub const INSTALL_CONSOLE_MIRROR: &str = r#"
    window.console.logs = [];
    const originalLog = console.log;
    console.log = (...args) => {
        try {
            window.console.logs.push(args.join(" "));
        } catch (e) {}
        originalLog.apply(console, args);
    };
"#;

pub const READ_CONSOLE_LOGS: &str = "return window.console.logs || [];";

/// Something that accepts log calls
pub trait Console {
    fn log(&self, args: &[&str]);
}

/// Forwards page output to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConsole;

impl Console for TracingConsole {
    fn log(&self, args: &[&str]) {
        info!(target: "pagelens::page_console", "{}", args.join(" "));
    }
}

/// Append-only list of mirrored lines, shared between clones
#[derive(Debug, Clone, Default)]
pub struct ConsoleBuffer {
    entries: Arc<Mutex<Vec<String>>>,
}

impl ConsoleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the line could not be stored
    pub fn push(&self, line: String) -> bool {
        match self.entries.lock() {
            Ok(mut entries) => {
                entries.push(line);
                true
            }
            Err(_) => false,
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// The last `max_lines` entries, or all of them for `None` or zero
    pub fn tail(&self, max_lines: Option<usize>) -> Vec<String> {
        tail(self.entries(), max_lines)
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

/// Keep only the last `max_lines` lines. `None` and `Some(0)` keep all.
pub fn tail(mut lines: Vec<String>, max_lines: Option<usize>) -> Vec<String> {
    if let Some(max) = max_lines
        && max > 0
        && lines.len() > max
    {
        lines.drain(..lines.len() - max);
    }
    lines
}

/// A console that records every call before forwarding it
pub struct ConsoleMirror<C> {
    inner: C,
    buffer: ConsoleBuffer,
}

impl<C: Console> ConsoleMirror<C> {
    /// Wrap `inner`. Wrapping a mirror again records each call twice.
    pub fn install(inner: C, buffer: ConsoleBuffer) -> Self {
        ConsoleMirror { inner, buffer }
    }

    pub fn buffer(&self) -> &ConsoleBuffer {
        &self.buffer
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: Console> Console for ConsoleMirror<C> {
    fn log(&self, args: &[&str]) {
        // A failed push never stops the original output
        self.buffer.push(args.join(" "));
        self.inner.log(args);
    }
}

#[cfg(test)]
#[path = "console_test.rs"]
mod console_test;
