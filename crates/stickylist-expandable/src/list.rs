use std::rc::Rc;

use stickylist_core::{
    HeaderId, StickyHeaderController, StickyListConfig, StickyListHeadersAdapter, View,
};

use crate::adapter::ExpandableAdapter;
use crate::transition::{ImmediateTransition, TransitionKind, VisibilityTransition};

/// Sticky header list whose sections can be collapsed to their header.
pub struct ExpandableStickyList<A: ?Sized + 'static = dyn StickyListHeadersAdapter> {
    controller: StickyHeaderController,
    adapter: Option<Rc<ExpandableAdapter<A>>>,
    transition: Box<dyn VisibilityTransition>,
}

impl<A: StickyListHeadersAdapter + ?Sized + 'static> Default for ExpandableStickyList<A> {
    fn default() -> Self {
        Self::new(StickyListConfig::default())
    }
}

impl<A: StickyListHeadersAdapter + ?Sized + 'static> ExpandableStickyList<A> {
    pub fn new(config: StickyListConfig) -> Self {
        Self {
            controller: StickyHeaderController::new(config),
            adapter: None,
            transition: Box::new(ImmediateTransition),
        }
    }

    pub fn controller(&self) -> &StickyHeaderController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut StickyHeaderController {
        &mut self.controller
    }

    /// Wraps `adapter` in an [`ExpandableAdapter`] and installs it.
    pub fn set_adapter(&mut self, adapter: Option<Rc<A>>) {
        self.adapter = adapter.map(|inner| Rc::new(ExpandableAdapter::new(inner)));
        let installed = self
            .adapter
            .clone()
            .map(|adapter| adapter as Rc<dyn StickyListHeadersAdapter>);
        self.controller.set_adapter(installed);
    }

    pub fn adapter(&self) -> Option<&Rc<ExpandableAdapter<A>>> {
        self.adapter.as_ref()
    }

    pub fn set_transition(&mut self, transition: Box<dyn VisibilityTransition>) {
        self.transition = transition;
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.controller.set_size(width, height);
    }

    pub fn layout(&mut self) {
        self.controller.layout();
    }

    pub fn scroll_by(&mut self, dy: f32) -> bool {
        self.controller.scroll_by(dy)
    }

    /// Suppresses list layout, for transitions that animate row visibility.
    pub fn set_block_layout_children(&mut self, block: bool) {
        self.controller.set_block_layout_children(block);
    }

    pub fn is_header_collapsed(&self, header_id: HeaderId) -> bool {
        self.adapter
            .as_ref()
            .is_some_and(|adapter| adapter.is_header_collapsed(header_id))
    }

    /// Shows the rows of a collapsed section.
    pub fn expand(&mut self, header_id: HeaderId) {
        let Some(adapter) = self.adapter.clone() else {
            return;
        };
        if !adapter.expand(header_id) {
            return;
        }
        self.transition_section(&adapter, header_id, TransitionKind::Expand);
    }

    /// Hides the rows of a section, leaving its header in place.
    pub fn collapse(&mut self, header_id: HeaderId) {
        let Some(adapter) = self.adapter.clone() else {
            return;
        };
        if !adapter.collapse(header_id) {
            return;
        }
        self.transition_section(&adapter, header_id, TransitionKind::Collapse);
    }

    /// Collapses an expanded section or expands a collapsed one.
    pub fn toggle(&mut self, header_id: HeaderId) {
        if self.is_header_collapsed(header_id) {
            self.expand(header_id);
        } else {
            self.collapse(header_id);
        }
    }

    fn transition_section(
        &mut self,
        adapter: &ExpandableAdapter<A>,
        header_id: HeaderId,
        kind: TransitionKind,
    ) {
        let views = adapter.item_views_by_header_id(header_id);
        let mut changed = 0;
        for view in &views {
            let visible = view.is_visible();
            let needed = match kind {
                TransitionKind::Expand => !visible,
                TransitionKind::Collapse => visible,
            };
            if needed {
                self.transition.run(view, kind);
                changed += 1;
            }
        }
        log::debug!(
            "{kind:?} section {header_id}: {changed} of {} bound rows changed",
            views.len()
        );
        self.controller.layout();
    }

    pub fn find_view_by_item_id(&self, item_id: u64) -> Option<View> {
        self.adapter
            .as_ref()
            .and_then(|adapter| adapter.find_view_by_item_id(item_id))
    }

    pub fn find_item_id_by_view(&self, view: &View) -> Option<u64> {
        self.adapter
            .as_ref()
            .and_then(|adapter| adapter.find_item_id_by_view(view))
    }
}

impl<A: ?Sized + 'static> std::fmt::Debug for ExpandableStickyList<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpandableStickyList")
            .field("controller", &self.controller)
            .field("adapter", &self.adapter)
            .finish()
    }
}
