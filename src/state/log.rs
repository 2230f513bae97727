//! Player-visible log feed
//!
//! Newest entries sit at the front; the feed is ring-buffered to the most
//! recent entries on every append.

use serde::{Deserialize, Serialize};

use crate::core::config::config;
use crate::core::types::Day;

/// Severity tags for the log feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogKind {
    Info,
    Combat,
    Discovery,
    Alert,
    Success,
    Magic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub day: Day,
    pub message: String,
    pub kind: LogKind,
}

/// Append-only feed capped to the most recent entries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogFeed {
    entries: Vec<LogEntry>,
    next_id: u64,
}

impl LogFeed {
    pub fn push(&mut self, day: Day, kind: LogKind, message: impl Into<String>) {
        let entry = LogEntry {
            id: self.next_id,
            day,
            message: message.into(),
            kind,
        };
        self.next_id += 1;
        self.entries.insert(0, entry);
        self.entries.truncate(config().log_capacity);
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|e| e.id != id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
