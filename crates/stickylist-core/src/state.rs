//! Saved instance state of the sticky list.

use crate::host::HostSavedState;

/// Snapshot contributed by the container around the list.
///
/// The sticky list container never stores anything of its own, so a saved
/// state is only restorable while this snapshot is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParentState {
    entries: Vec<(String, String)>,
}

impl ParentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SavedState {
    pub parent: ParentState,
    pub list: HostSavedState,
}
