//! Page stack controller: per-page state from the global reading position.
//!
//! Everything here is a pure function of `(current_page, page.index,
//! page_count)`. The current page is owned by the caller and passed in on
//! every query.

use serde::{Deserialize, Serialize};

use crate::constants::PAGE_DEPTH;

/// Derived state of one page for a given reading position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageState {
    /// Position of the page in the stack (0 = front cover)
    pub index: usize,
    /// The page has been flipped past the reading position
    pub opened: bool,
    /// The whole book is shut on its front or back cover.
    ///
    /// Pages then lie flat in their stack instead of fanning out and curling.
    pub book_closed: bool,
    /// Depth offset along the page normal that keeps coincident pages apart
    pub stack_offset: f32,
}

impl PageState {
    /// State of a page while the book is shut on its front cover.
    pub fn closed(index: usize) -> Self {
        Self {
            index,
            opened: false,
            book_closed: true,
            stack_offset: 0.0,
        }
    }
}

/// Ordered stack of `page_count` pages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageStack {
    page_count: usize,
    page_depth: f32,
}

impl Default for PageStack {
    fn default() -> Self {
        Self::new(0, PAGE_DEPTH)
    }
}

impl PageStack {
    pub fn new(page_count: usize, page_depth: f32) -> Self {
        Self {
            page_count,
            page_depth,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn page_depth(&self) -> f32 {
        self.page_depth
    }

    /// Clamp a requested reading position into `[0, page_count]`.
    pub fn clamp_index(&self, current: usize) -> usize {
        current.min(self.page_count)
    }

    /// Move the reading position by `steps` pages, staying inside the book.
    pub fn step(&self, current: usize, steps: isize) -> usize {
        let current = self.clamp_index(current);
        let moved = if steps.is_negative() {
            current.saturating_sub(steps.unsigned_abs())
        } else {
            current.saturating_add(steps as usize)
        };
        self.clamp_index(moved)
    }

    /// Whether the book is shut on either cover at this reading position.
    pub fn book_closed(&self, current: usize) -> bool {
        let current = self.clamp_index(current);
        current == 0 || current == self.page_count
    }

    /// State of page `index` while reading at `current`.
    pub fn page_state(&self, current: usize, index: usize) -> PageState {
        let current = self.clamp_index(current);
        PageState {
            index,
            opened: current > index,
            book_closed: self.book_closed(current),
            stack_offset: (current as f32 - index as f32) * self.page_depth,
        }
    }

    /// States of every page, in stack order.
    pub fn states(&self, current: usize) -> impl Iterator<Item = PageState> + '_ {
        (0..self.page_count).map(move |index| self.page_state(current, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_in_the_middle() {
        let stack = PageStack::new(10, PAGE_DEPTH);
        let states: Vec<_> = stack.states(3).collect();
        assert_eq!(states.len(), 10);

        for state in &states {
            assert_eq!(state.opened, state.index < 3, "page {}", state.index);
            assert!(!state.book_closed);
            let expected = (3.0 - state.index as f32) * PAGE_DEPTH;
            assert!((state.stack_offset - expected).abs() < 1e-7);
        }
    }

    #[test]
    fn test_front_cover_closed() {
        let stack = PageStack::new(10, PAGE_DEPTH);
        for state in stack.states(0) {
            assert!(!state.opened);
            assert!(state.book_closed);
        }
    }

    #[test]
    fn test_back_cover_closed() {
        let stack = PageStack::new(10, PAGE_DEPTH);
        for state in stack.states(10) {
            assert!(state.opened);
            assert!(state.book_closed);
        }
    }

    #[test]
    fn test_out_of_range_index_is_clamped() {
        let stack = PageStack::new(10, PAGE_DEPTH);
        assert_eq!(stack.clamp_index(42), 10);
        assert_eq!(stack.page_state(42, 4), stack.page_state(10, 4));
        assert!(stack.book_closed(usize::MAX));
    }

    #[test]
    fn test_step_stays_inside_book() {
        let stack = PageStack::new(10, PAGE_DEPTH);
        assert_eq!(stack.step(0, -1), 0);
        assert_eq!(stack.step(0, 1), 1);
        assert_eq!(stack.step(9, 3), 10);
        assert_eq!(stack.step(5, -2), 3);
        assert_eq!(stack.step(usize::MAX, isize::MAX), 10);
    }

    #[test]
    fn test_stack_offset_sign() {
        let stack = PageStack::new(4, 0.01);
        // Turned pages sit in front of the reading position, unturned behind
        assert!(stack.page_state(2, 0).stack_offset > 0.0);
        assert_eq!(stack.page_state(2, 2).stack_offset, 0.0);
        assert!(stack.page_state(2, 3).stack_offset < 0.0);
    }

    #[test]
    fn test_empty_stack() {
        let stack = PageStack::default();
        assert_eq!(stack.states(0).count(), 0);
        assert!(stack.book_closed(0));
    }
}
