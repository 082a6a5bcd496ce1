//! Testing utilities and harness for stickylist

pub mod adapter;
pub mod assertions;
pub mod canvas;
pub mod robot;

pub use adapter::{TestAdapter, TestAdapterBuilder};
pub use canvas::{DrawOp, RecordingCanvas};
pub use robot::ListRobot;

pub mod prelude {
    pub use crate::adapter::{TestAdapter, TestAdapterBuilder};
    pub use crate::assertions;
    pub use crate::canvas::{DrawOp, RecordingCanvas};
    pub use crate::robot::ListRobot;
}
