//! Quote Board — the interaction state the presentation layer renders.
//!
//! One board per process, held in `AppState` behind a `tokio::sync::Mutex`.
//! An attempt's outcome is exactly one of a quote list or a notice: arming an
//! attempt clears both, publication sets one.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handle to the single board instance.
pub type SharedBoard = Arc<Mutex<QuoteBoard>>;

/// Interaction state: topic, generated quotes, busy flag, modal notice.
///
/// `notice` carries notice text and visibility as one field — `Some` means a
/// notice is showing, `None` means none is; the two are never set separately.
#[derive(Debug, Default)]
pub struct QuoteBoard {
    topic: String,
    quotes: Vec<String>,
    busy: bool,
    notice: Option<String>,
}

/// Serialized view of the board, returned by every board endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub topic: String,
    pub quotes: Vec<String>,
    pub busy: bool,
    pub notice: Option<String>,
}

impl QuoteBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn quotes(&self) -> &[String] {
        &self.quotes
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Replaces the topic unconditionally. No validation here — the rules
    /// apply when an attempt is submitted, not on input.
    pub fn set_topic(&mut self, topic: String) {
        self.topic = topic;
    }

    /// Clears the quote list and topic. Available at any time, including
    /// while a request is in flight; the busy flag and any showing notice are
    /// untouched.
    pub fn reset(&mut self) {
        self.quotes.clear();
        self.topic.clear();
    }

    /// Acknowledges the current notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Marks the start of a generation attempt: busy on, previous quotes and
    /// notice cleared. Callers must have checked `is_busy` first, under the
    /// same lock acquisition.
    pub fn begin_attempt(&mut self) {
        self.quotes.clear();
        self.notice = None;
        self.busy = true;
    }

    /// Publishes a successful outcome. Clears any notice; drops busy last.
    pub fn publish_quotes(&mut self, quotes: Vec<String>) {
        self.quotes = quotes;
        self.notice = None;
        self.busy = false;
    }

    /// Publishes a notice. Existing quotes stay — a validation notice shows
    /// over the previous list; an attempt outcome already cleared it at arm
    /// time. Drops busy last.
    pub fn publish_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
        self.busy = false;
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            topic: self.topic.clone(),
            quotes: self.quotes.clone(),
            busy: self.busy,
            notice: self.notice.clone(),
        }
    }
}
