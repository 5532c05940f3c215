//! Audit trail of applied transitions.
//!
//! Every successful `apply` is recorded with a timestamp. The log is an
//! immutable value: `record` returns a new log with the entry appended.

use super::state::StateId;
use super::transition::TransitionId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Record of one applied transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The transition that was applied
    pub transition: TransitionId,
    /// The state the subject was in before
    pub from: StateId,
    /// The state the subject moved to
    pub to: StateId,
    /// When the transition was applied
    pub timestamp: DateTime<Utc>,
}

/// Ordered log of applied transitions.
///
/// # Example
///
/// ```rust
/// use stateward::{StateId, TransitionId, TransitionLog, TransitionRecord};
/// use chrono::Utc;
///
/// let log = TransitionLog::new().record(TransitionRecord {
///     transition: TransitionId::new("activate"),
///     from: StateId::new("pending"),
///     to: StateId::new("active"),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(log.len(), 1);
/// let path: Vec<&str> = log.path().iter().map(|s| s.name()).collect();
/// assert_eq!(path, vec!["pending", "active"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionLog {
    records: Vec<TransitionRecord>,
}

impl TransitionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        TransitionLog {
            records: Vec::new(),
        }
    }

    /// Append a record, returning the extended log. The original is unchanged.
    pub fn record(mut self, record: TransitionRecord) -> Self {
        self.records.push(record);
        self
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// The most recent record, if any.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.last()
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The sequence of states visited: the first record's origin followed by
    /// every destination, in order. Empty for an empty log.
    pub fn path(&self) -> Vec<&StateId> {
        let Some(first) = self.records.first() else {
            return Vec::new();
        };

        let mut path = Vec::with_capacity(self.records.len() + 1);
        path.push(&first.from);
        path.extend(self.records.iter().map(|r| &r.to));
        path
    }

    /// Time between the first and last recorded transition.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some(last.timestamp - first.timestamp)
    }
}
