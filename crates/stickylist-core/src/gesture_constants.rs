//! Shared gesture constants for header taps and list drags.
//!
//! The header router and the list's own drag detection use the same slop so a
//! gesture cannot be a tap for one and a drag for the other.

/// Touch slop in logical pixels.
///
/// Movement beyond this distance from the initial press turns a tap into a
/// drag: a header tap is cancelled and the gesture is handed to the list.
pub const TOUCH_SLOP: f32 = 8.0;
