//! Routing of touch events between the floating header and the list.
//!
//! A gesture that starts on the floating header belongs to the header while
//! it stays within the touch slop of the down event. Once it leaves the slop
//! the header is cancelled and the list receives a synthetic down at the
//! original down height, after which the list owns the gesture.

use crate::input::{MotionAction, MotionEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TouchOwner {
    #[default]
    Idle,
    Header,
    List,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchRoute {
    Header(MotionEvent),
    /// Ownership moves to the list. `header_cancel` is `None` when the header
    /// disappeared mid-gesture.
    Transfer {
        header_cancel: Option<MotionEvent>,
        list_down: MotionEvent,
    },
    List(MotionEvent),
}

#[derive(Debug, Clone)]
pub struct TouchRouter {
    owner: TouchOwner,
    down_y: f32,
    touch_slop: f32,
}

impl TouchRouter {
    pub fn new(touch_slop: f32) -> Self {
        Self {
            owner: TouchOwner::Idle,
            down_y: 0.0,
            touch_slop,
        }
    }

    pub fn owner(&self) -> TouchOwner {
        self.owner
    }

    pub fn set_touch_slop(&mut self, touch_slop: f32) {
        self.touch_slop = touch_slop;
    }

    /// Routes `event`. `header_bottom` is the bottom edge of the floating
    /// header (height plus offset), `None` when there is no floating header.
    pub fn route(&mut self, event: &MotionEvent, header_bottom: Option<f32>) -> TouchRoute {
        if event.action == MotionAction::Down {
            self.down_y = event.y();
            self.owner = match header_bottom {
                Some(bottom) if event.y() <= bottom => TouchOwner::Header,
                _ => TouchOwner::List,
            };
        }

        let route = match self.owner {
            TouchOwner::Header
                if header_bottom.is_some() && (self.down_y - event.y()).abs() <= self.touch_slop =>
            {
                TouchRoute::Header(*event)
            }
            TouchOwner::Header => {
                self.owner = TouchOwner::List;
                TouchRoute::Transfer {
                    header_cancel: header_bottom.map(|_| event.with_action(MotionAction::Cancel)),
                    list_down: MotionEvent::down(event.x(), self.down_y),
                }
            }
            TouchOwner::List | TouchOwner::Idle => TouchRoute::List(*event),
        };

        if event.action.is_terminal() {
            self.owner = TouchOwner::Idle;
        }
        route
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLOP: f32 = 8.0;

    #[test]
    fn down_over_header_goes_to_header() {
        let mut router = TouchRouter::new(SLOP);
        let route = router.route(&MotionEvent::down(5.0, 10.0), Some(40.0));
        assert_eq!(route, TouchRoute::Header(MotionEvent::down(5.0, 10.0)));
        assert_eq!(router.owner(), TouchOwner::Header);
    }

    #[test]
    fn down_below_header_goes_to_list() {
        let mut router = TouchRouter::new(SLOP);
        let route = router.route(&MotionEvent::down(5.0, 41.0), Some(40.0));
        assert!(matches!(route, TouchRoute::List(_)));
        assert_eq!(router.owner(), TouchOwner::List);
    }

    #[test]
    fn leaving_slop_transfers_once_with_down_height() {
        let mut router = TouchRouter::new(SLOP);
        router.route(&MotionEvent::down(5.0, 10.0), Some(40.0));

        let within = router.route(&MotionEvent::moved(6.0, 10.0 + SLOP), Some(40.0));
        assert!(matches!(within, TouchRoute::Header(_)));

        let beyond = MotionEvent::moved(7.0, 10.0 + SLOP + 1.0);
        match router.route(&beyond, Some(40.0)) {
            TouchRoute::Transfer {
                header_cancel,
                list_down,
            } => {
                assert_eq!(header_cancel.map(|ev| ev.action), Some(MotionAction::Cancel));
                assert_eq!(list_down, MotionEvent::down(7.0, 10.0));
            }
            other => panic!("expected transfer, got {other:?}"),
        }

        let after = router.route(&MotionEvent::moved(7.0, 30.0), Some(40.0));
        assert!(matches!(after, TouchRoute::List(_)));
        let up = router.route(&MotionEvent::up(7.0, 30.0), Some(40.0));
        assert!(matches!(up, TouchRoute::List(_)));
        assert_eq!(router.owner(), TouchOwner::Idle);
    }

    #[test]
    fn header_disappearing_mid_gesture_transfers_without_cancel() {
        let mut router = TouchRouter::new(SLOP);
        router.route(&MotionEvent::down(5.0, 10.0), Some(40.0));
        match router.route(&MotionEvent::moved(5.0, 11.0), None) {
            TouchRoute::Transfer { header_cancel, .. } => assert!(header_cancel.is_none()),
            other => panic!("expected transfer, got {other:?}"),
        }
    }
}
