//! Persistent append-only journal of custody events
//!
//! Operations return their events; this journal is how a caller layer
//! persists them for external auditors. Entries are sequenced and
//! timestamped, and nothing is ever rewritten or removed.

use crate::events::CustodyEvent;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors from journal operations
#[derive(Error, Debug)]
pub enum JournalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One journaled event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JournalEntry {
    /// Position in the log, starting at 0
    pub seq: u64,
    /// Unix timestamp when the entry was recorded
    pub timestamp: u64,
    /// The event itself
    pub event: CustodyEvent,
}

/// The full event log
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EventJournal {
    entries: Vec<JournalEntry>,
}

impl EventJournal {
    /// Create an empty journal
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a journal from file, or create empty if not exists
    pub fn load(path: &Path) -> Result<Self, JournalError> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let journal: EventJournal = serde_json::from_str(&contents)?;
            Ok(journal)
        } else {
            Ok(Self::new())
        }
    }

    /// Save the journal to file
    pub fn save(&self, path: &Path) -> Result<(), JournalError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Append events in order, assigning sequence numbers
    pub fn append_all(&mut self, events: &[CustodyEvent], timestamp: u64) {
        for event in events {
            self.entries.push(JournalEntry {
                seq: self.entries.len() as u64,
                timestamp,
                event: *event,
            });
        }
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
