//! Touch event primitives delivered to the sticky list.

use crate::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionAction {
    Down,
    Move,
    Up,
    Cancel,
}

impl MotionAction {
    /// Whether this action ends the current gesture.
    pub fn is_terminal(self) -> bool {
        matches!(self, MotionAction::Up | MotionAction::Cancel)
    }
}

/// A single touch event in sticky list container coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionEvent {
    pub action: MotionAction,
    pub position: Point,
}

impl MotionEvent {
    pub fn new(action: MotionAction, x: f32, y: f32) -> Self {
        Self {
            action,
            position: Point::new(x, y),
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(MotionAction::Down, x, y)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(MotionAction::Move, x, y)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(MotionAction::Up, x, y)
    }

    pub fn cancel(x: f32, y: f32) -> Self {
        Self::new(MotionAction::Cancel, x, y)
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Copy of this event with a different action, same coordinates.
    pub fn with_action(&self, action: MotionAction) -> Self {
        Self {
            action,
            position: self.position,
        }
    }
}
