//! Sticky section headers for virtualized lists.
//!
//! Rows are grouped into sections by the id an adapter reports for each
//! position. The first row of every section is wrapped together with its
//! section header into a compound row; the header of the section at the top
//! of the viewport floats above the list until the next section pushes it out.

pub mod adapter;
pub mod bridge;
pub mod compound_row;
pub mod config;
pub mod controller;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod gesture_constants;
pub mod header_pool;
pub mod host;
pub mod input;
pub mod state;
pub mod view;

#[cfg(test)]
mod tests;

pub use adapter::{
    DataSetChange, DataSetObservable, DataSetObserver, HeaderId, SectionIndexer,
    StickyListHeadersAdapter,
};
pub use bridge::{AdapterBridge, HeaderClickCallback};
pub use compound_row::{CompoundRowView, Divider, RowKind};
pub use config::{AttributeSet, ConfigError, StickyListConfig};
pub use controller::{
    HeaderClick, HeaderClickListener, ScrollListener, StickyHeaderChangedListener,
    StickyHeaderController, StickyHeaderOffsetListener, TouchOwner, TouchRoute, TouchRouter,
};
pub use draw::Canvas;
pub use error::StickyListError;
pub use geometry::{Color, EdgeInsets, Point, Rect};
pub use header_pool::HeaderPool;
pub use host::{
    ChoiceMode, FixedRole, HostChild, HostSavedState, ItemClickListener, ListSelector,
    RecyclingScrollHost, ScrollBarStyle, ScrollDecorations, ScrollEvent, SelectorCapability,
};
pub use input::{MotionAction, MotionEvent};
pub use state::{ParentState, SavedState};
pub use view::{ClickHandler, View, ViewId, Visibility};

pub mod prelude {
    pub use crate::adapter::{
        DataSetChange, DataSetObservable, HeaderId, SectionIndexer, StickyListHeadersAdapter,
    };
    pub use crate::compound_row::Divider;
    pub use crate::config::{AttributeSet, StickyListConfig};
    pub use crate::controller::{HeaderClick, StickyHeaderController};
    pub use crate::draw::Canvas;
    pub use crate::geometry::{Color, EdgeInsets, Point, Rect};
    pub use crate::host::{ChoiceMode, HostChild, ScrollEvent};
    pub use crate::input::{MotionAction, MotionEvent};
    pub use crate::view::{View, Visibility};
}
