//! Best-known status per keyboard letter

use crate::core::Status;
use rustc_hash::FxHashMap;

/// Per-key status map for one session
///
/// Regular updates only move a key up (gray → yellow → green). A ledger
/// correction may force any value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyStatusMap {
    statuses: FxHashMap<u8, Status>,
}

impl KeyStatusMap {
    #[must_use]
    pub fn get(&self, letter: u8) -> Option<Status> {
        self.statuses.get(&letter).copied()
    }

    /// Record new information; returns whether the key changed
    pub fn upgrade(&mut self, letter: u8, status: Status) -> bool {
        match self.statuses.get(&letter) {
            Some(&current) if current >= status => false,
            _ => {
                self.statuses.insert(letter, status);
                true
            }
        }
    }

    /// Overwrite a key regardless of its current status
    pub fn force(&mut self, letter: u8, status: Status) {
        self.statuses.insert(letter, status);
    }

    pub fn clear(&mut self) {
        self.statuses.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}
