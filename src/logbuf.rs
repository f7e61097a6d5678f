//! Event log ring buffer for the status strip.
//!
//! Short lines recording mode toggles, gear changes, and resets. Fixed
//! capacity with oldest-first eviction; `heapless` keeps it allocation-free
//! so the same code can move to an embedded target unchanged.

use heapless::{Deque, String};

/// Maximum number of log lines kept.
pub const LOG_BUFFER_SIZE: usize = 6;

/// Maximum characters per log line; longer messages are truncated.
pub const LOG_LINE_LENGTH: usize = 48;

/// Ring buffer of recent event lines.
#[derive(Default)]
pub struct EventLog {
    lines: Deque<String<LOG_LINE_LENGTH>, LOG_BUFFER_SIZE>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line, evicting the oldest when full.
    pub fn push(&mut self, message: &str) {
        if self.lines.is_full() {
            self.lines.pop_front();
        }
        let mut line = String::new();
        for ch in message.chars() {
            if line.push(ch).is_err() {
                break;
            }
        }
        // Capacity was freed above, push cannot fail
        let _ = self.lines.push_back(line);
    }

    /// Most recent line, if any.
    pub fn latest(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    /// Lines oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
