use std::fmt;

/// Errors surfaced by the sticky list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StickyListError {
    /// A saved state carried a parent snapshot the container cannot restore.
    UnexpectedParentState { entries: usize },
    /// A selection targeted a position past the end of the list.
    PositionOutOfRange { position: usize, count: usize },
}

impl fmt::Display for StickyListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StickyListError::UnexpectedParentState { entries } => write!(
                f,
                "saved state carries a parent snapshot with {entries} entries; the sticky list container has no state of its own to restore"
            ),
            StickyListError::PositionOutOfRange { position, count } => {
                write!(f, "position {position} out of range for list of {count} items")
            }
        }
    }
}

impl std::error::Error for StickyListError {}
