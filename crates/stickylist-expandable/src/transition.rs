use stickylist_core::{View, Visibility};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    Expand,
    Collapse,
}

impl TransitionKind {
    /// Visibility a row ends up with once the transition completes.
    pub fn target_visibility(self) -> Visibility {
        match self {
            TransitionKind::Expand => Visibility::Visible,
            TransitionKind::Collapse => Visibility::Gone,
        }
    }
}

/// Applies the visibility change of a row whose section is expanded or
/// collapsed. Only invoked for rows whose visibility actually has to change.
///
/// Animated implementations may block list layout for their duration through
/// [`ExpandableStickyList::set_block_layout_children`](crate::ExpandableStickyList::set_block_layout_children)
/// and set the final visibility when done.
pub trait VisibilityTransition {
    fn run(&mut self, target: &View, kind: TransitionKind);
}

/// Switches visibility right away.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateTransition;

impl VisibilityTransition for ImmediateTransition {
    fn run(&mut self, target: &View, kind: TransitionKind) {
        target.set_visibility(kind.target_visibility());
    }
}

impl<F: FnMut(&View, TransitionKind)> VisibilityTransition for F {
    fn run(&mut self, target: &View, kind: TransitionKind) {
        self(target, kind)
    }
}
