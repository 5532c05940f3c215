//! State identities and state values.
//!
//! A `StateId` is a lightweight, immutable name used as a key into a graph.
//! A `State` is the resolved graph member; it carries nothing beyond its id
//! in the core, plus an optional attribute map for display metadata.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Unique, immutable name of a state.
///
/// Equality, hashing, and ordering are by name. Two ids with the same name
/// are the same state as far as any graph is concerned.
///
/// # Example
///
/// ```rust
/// use stateward::StateId;
///
/// let pending = StateId::new("pending");
/// assert_eq!(pending.name(), "pending");
/// assert_eq!(pending, StateId::from("pending"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    /// Create a state id from a name.
    pub fn new(name: impl Into<String>) -> Self {
        StateId(name.into())
    }

    /// The state's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateId {
    fn from(name: &str) -> Self {
        StateId::new(name)
    }
}

impl From<String> for StateId {
    fn from(name: String) -> Self {
        StateId::new(name)
    }
}

impl AsRef<str> for StateId {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

/// One named position in a graph.
///
/// Identity-only in the core: equality considers the id alone. The attribute
/// map is a decoration point for display metadata (labels, descriptions) and
/// never participates in transition logic.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct State {
    id: StateId,
    attributes: BTreeMap<String, String>,
}

impl State {
    /// Create a state with the given id and no attributes.
    pub fn new(id: impl Into<StateId>) -> Self {
        State {
            id: id.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Attach a display attribute, returning the decorated state.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stateward::State;
    ///
    /// let state = State::new("pending").with_attribute("label", "Pending Review");
    /// assert_eq!(state.attribute("label"), Some("Pending Review"));
    /// ```
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The state's id.
    pub fn id(&self) -> &StateId {
        &self.id
    }

    /// The state's name, shorthand for `id().name()`.
    pub fn name(&self) -> &str {
        self.id.name()
    }

    /// Look up a display attribute.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// All display attributes, in key order.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for State {}
