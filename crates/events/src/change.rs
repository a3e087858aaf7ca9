//! Change entries: what a write did to each affected entity.
//!
//! Write-path events carry one `ChangedEntry` per entity, pairing the state
//! transition with the before/after snapshots so consumers can diff without a
//! read-back.

use serde::{Deserialize, Serialize};

/// State transition an entity went through in a write batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryState {
    Added,
    Modified,
    Deleted,
}

/// A single entity change: transition state plus before/after snapshots.
///
/// `old` is `None` for `Added` entries. For `Deleted` entries `new` holds the
/// last persisted snapshot (there is no after-image to report).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangedEntry<T> {
    pub state: EntryState,
    pub old: Option<T>,
    pub new: T,
}

impl<T> ChangedEntry<T> {
    pub fn added(new: T) -> Self {
        Self {
            state: EntryState::Added,
            old: None,
            new,
        }
    }

    pub fn modified(old: T, new: T) -> Self {
        Self {
            state: EntryState::Modified,
            old: Some(old),
            new,
        }
    }

    pub fn deleted(last: T) -> Self {
        Self {
            state: EntryState::Deleted,
            old: None,
            new: last,
        }
    }
}
