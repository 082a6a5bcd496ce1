//! FIFO pool of detached header views.
//!
//! Headers are visually generic and rebound on every reuse, so the pool keeps
//! no section affinity.

use std::collections::VecDeque;

use crate::view::{View, Visibility};

#[derive(Debug, Default)]
pub struct HeaderPool {
    headers: VecDeque<View>,
}

impl HeaderPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a header detached from its compound row to the pool.
    ///
    /// The header is reset to visible since it may have been hidden under
    /// the floating copy.
    pub fn recycle(&mut self, header: View) {
        debug_assert!(header.parent().is_none(), "pooled header still attached");
        if self.contains(&header) {
            return;
        }
        header.set_visibility(Visibility::Visible);
        self.headers.push_back(header);
    }

    /// Takes the oldest pooled header.
    pub fn pop(&mut self) -> Option<View> {
        self.headers.pop_front()
    }

    pub fn contains(&self, header: &View) -> bool {
        self.headers.iter().any(|pooled| pooled == header)
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn clear(&mut self) {
        self.headers.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &View> {
        self.headers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_fifo_order() {
        let mut pool = HeaderPool::new();
        let first = View::new(20.0);
        let second = View::new(20.0);
        pool.recycle(first.clone());
        pool.recycle(second.clone());

        assert_eq!(pool.pop(), Some(first));
        assert_eq!(pool.pop(), Some(second));
        assert_eq!(pool.pop(), None);
    }

    #[test]
    fn recycle_resets_visibility_and_ignores_duplicates() {
        let mut pool = HeaderPool::new();
        let header = View::new(20.0);
        header.set_visibility(Visibility::Invisible);
        pool.recycle(header.clone());
        pool.recycle(header.clone());

        assert_eq!(pool.len(), 1);
        assert!(header.is_visible());
    }
}
