//! Expandable sections for sticky header lists.
//!
//! [`ExpandableAdapter`] decorates any adapter and remembers which row views
//! belong to which section, so that [`ExpandableStickyList`] can hide or show
//! a whole section's bound rows when its header is collapsed or expanded.

mod adapter;
mod list;
mod transition;

pub use adapter::ExpandableAdapter;
pub use list::ExpandableStickyList;
pub use transition::{ImmediateTransition, TransitionKind, VisibilityTransition};
