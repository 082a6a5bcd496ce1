//! Assertion helpers for sticky list tests.

use stickylist_core::{FixedRole, HostChild, Rect, StickyHeaderController};

/// Assert that a value is within `tolerance` of the expected one.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that a rectangle is approximately equal to another.
pub fn assert_rect_approx_eq(actual: Rect, expected: Rect, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
    assert_approx_eq(
        actual.width,
        expected.width,
        tolerance,
        &format!("{} - width", msg),
    );
    assert_approx_eq(
        actual.height,
        expected.height,
        tolerance,
        &format!("{} - height", msg),
    );
}

/// Assert that laid out children are contiguous and ordered by position.
pub fn assert_children_contiguous(children: &[HostChild], msg: &str) {
    for pair in children.windows(2) {
        assert_eq!(
            pair[1].position(),
            pair[0].position() + 1,
            "{}: positions not consecutive",
            msg
        );
        assert_approx_eq(
            pair[1].top(),
            pair[0].bottom(),
            0.01,
            &format!("{} - top of position {}", msg, pair[1].position()),
        );
    }
}

/// Assert that the floating header sits no lower than the header-owning rows
/// and footers below the sticky line allow.
pub fn assert_floating_header_not_overlapping(controller: &StickyHeaderController, msg: &str) {
    let Some(header) = controller.sticky_header() else {
        return;
    };
    let floating_top = header.visual_bounds().top();
    let height = header.measured_height();
    let sticky_top = controller.sticky_header_top();
    for child in controller.host().children() {
        let pushes = child.has_header() || child.role() == Some(FixedRole::Footer);
        if pushes && child.top() >= sticky_top {
            assert!(
                floating_top <= child.top() - height + 0.01,
                "{}: floating header at {} overlaps position {} at {}",
                msg,
                floating_top,
                child.position(),
                child.top()
            );
        }
    }
}
