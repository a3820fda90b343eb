//! crates/healing_journey_core/src/pager.rs
//!
//! Page state for the results book: fixed step pages followed by one
//! recommendation page, with auto-advance that the first manual interaction
//! switches off for good.
//!
//! The pager never sleeps or plays sound itself. Every successful move returns
//! a [`PageTurn`]; the caller fires the audio cues and re-arms the
//! auto-advance timer when [`ResultsPager::should_auto_advance`] says so.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Direction;

/// A successful page change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageTurn {
    pub index: usize,
    pub direction: Direction,
}

/// A navigation action taken by the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualAction {
    Next,
    Prev,
    /// A dot click.
    Goto(usize),
    Key(PagerKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PagerKey {
    ArrowLeft,
    ArrowRight,
    Space,
}

/// A read-only snapshot of the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub current_index: usize,
    pub total_pages: usize,
    pub direction: Direction,
    pub auto_advance_paused: bool,
    pub user_has_interacted: bool,
}

#[derive(Debug, Clone)]
pub struct ResultsPager {
    total_pages: usize,
    current_index: usize,
    direction: Direction,
    auto_advance_paused: bool,
    user_has_interacted: bool,
}

impl ResultsPager {
    /// A pager over `step_count` step pages plus the recommendation page.
    pub fn new(step_count: usize) -> Self {
        Self {
            total_pages: step_count + 1,
            current_index: 0,
            direction: Direction::Forward,
            auto_advance_paused: false,
            user_has_interacted: false,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_last_page(&self) -> bool {
        self.current_index + 1 == self.total_pages
    }

    pub fn user_has_interacted(&self) -> bool {
        self.user_has_interacted
    }

    pub fn auto_advance_paused(&self) -> bool {
        self.auto_advance_paused
    }

    pub fn state(&self) -> PageState {
        PageState {
            current_index: self.current_index,
            total_pages: self.total_pages,
            direction: self.direction,
            auto_advance_paused: self.auto_advance_paused,
            user_has_interacted: self.user_has_interacted,
        }
    }

    /// Moves to `index`. Out-of-range indices are a no-op.
    pub fn goto(&mut self, index: usize, direction: Direction) -> Option<PageTurn> {
        if index >= self.total_pages {
            return None;
        }
        self.current_index = index;
        self.direction = direction;
        debug!(page = index, direction = ?direction, "Page turned.");
        Some(PageTurn { index, direction })
    }

    pub fn next(&mut self) -> Option<PageTurn> {
        if self.is_last_page() {
            return None;
        }
        self.goto(self.current_index + 1, Direction::Forward)
    }

    pub fn prev(&mut self) -> Option<PageTurn> {
        if self.current_index == 0 {
            return None;
        }
        self.goto(self.current_index - 1, Direction::Backward)
    }

    /// Handles a visitor action. Any action, even one that cannot move,
    /// disables auto-advance for the rest of the session.
    pub fn interact(&mut self, action: ManualAction) -> Option<PageTurn> {
        if !self.user_has_interacted {
            debug!("Visitor took over page navigation; auto-advance disabled.");
        }
        self.user_has_interacted = true;
        match action {
            ManualAction::Next | ManualAction::Key(PagerKey::ArrowRight | PagerKey::Space) => {
                self.next()
            }
            ManualAction::Prev | ManualAction::Key(PagerKey::ArrowLeft) => self.prev(),
            ManualAction::Goto(index) => {
                let direction = if index < self.current_index {
                    Direction::Backward
                } else {
                    Direction::Forward
                };
                self.goto(index, direction)
            }
        }
    }

    /// Whether an auto-advance timer should be armed right now.
    pub fn should_auto_advance(&self) -> bool {
        !self.user_has_interacted && !self.auto_advance_paused && !self.is_last_page()
    }

    /// Called when the auto-advance timer fires. Stale fires (after an
    /// interaction or a pause) change nothing. Landing on the last page
    /// pauses auto-advance instead of wrapping.
    pub fn auto_advance(&mut self) -> Option<PageTurn> {
        if !self.should_auto_advance() {
            return None;
        }
        let turn = self.next();
        if self.is_last_page() {
            self.auto_advance_paused = true;
        }
        turn
    }

    /// Holds auto-advance, e.g. while the pointer rests on the book.
    pub fn pause(&mut self) {
        self.auto_advance_paused = true;
    }

    /// Lifts a hold. Has no effect once the visitor interacted or the last
    /// page was reached.
    pub fn resume(&mut self) {
        if !self.user_has_interacted && !self.is_last_page() {
            self.auto_advance_paused = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_stops_at_the_last_page() {
        let mut pager = ResultsPager::new(5);
        assert_eq!(pager.total_pages(), 6);
        for expected in 1..=5 {
            assert_eq!(pager.next().map(|t| t.index), Some(expected));
        }
        assert_eq!(pager.next(), None);
        assert_eq!(pager.current_index(), 5);
    }

    #[test]
    fn prev_stops_at_the_first_page() {
        let mut pager = ResultsPager::new(5);
        assert_eq!(pager.prev(), None);
        assert_eq!(pager.current_index(), 0);
    }

    #[test]
    fn goto_ignores_out_of_range() {
        let mut pager = ResultsPager::new(5);
        assert_eq!(pager.goto(6, Direction::Forward), None);
        assert_eq!(pager.current_index(), 0);
        assert_eq!(
            pager.goto(3, Direction::Forward),
            Some(PageTurn {
                index: 3,
                direction: Direction::Forward
            })
        );
    }

    #[test]
    fn auto_advance_pauses_on_the_last_page() {
        let mut pager = ResultsPager::new(2);
        assert!(pager.auto_advance().is_some());
        assert!(!pager.auto_advance_paused());
        assert!(pager.auto_advance().is_some());
        assert!(pager.is_last_page());
        assert!(pager.auto_advance_paused());
        assert!(!pager.should_auto_advance());
        assert_eq!(pager.auto_advance(), None);
        assert_eq!(pager.current_index(), 2);
    }

    #[test]
    fn interaction_disables_auto_advance_permanently() {
        let mut pager = ResultsPager::new(5);
        pager.auto_advance();
        pager.interact(ManualAction::Prev);
        assert!(pager.user_has_interacted());

        for _ in 0..10 {
            assert_eq!(pager.auto_advance(), None);
        }
        pager.resume();
        assert!(!pager.should_auto_advance());
        assert_eq!(pager.current_index(), 0);
    }

    #[test]
    fn blocked_interaction_still_counts() {
        let mut pager = ResultsPager::new(5);
        assert_eq!(pager.interact(ManualAction::Key(PagerKey::ArrowLeft)), None);
        assert!(pager.user_has_interacted());
        assert_eq!(pager.auto_advance(), None);
    }

    #[test]
    fn keys_and_dots_navigate() {
        let mut pager = ResultsPager::new(5);
        pager.interact(ManualAction::Key(PagerKey::Space));
        pager.interact(ManualAction::Key(PagerKey::ArrowRight));
        assert_eq!(pager.current_index(), 2);

        let turn = pager.interact(ManualAction::Goto(0)).unwrap();
        assert_eq!(turn.direction, Direction::Backward);
        assert_eq!(pager.direction(), Direction::Backward);

        assert_eq!(pager.interact(ManualAction::Goto(42)), None);
        assert_eq!(pager.current_index(), 0);
    }

    #[test]
    fn pause_and_resume_hold_auto_advance() {
        let mut pager = ResultsPager::new(5);
        pager.pause();
        assert_eq!(pager.auto_advance(), None);
        pager.resume();
        assert_eq!(pager.auto_advance().map(|t| t.index), Some(1));
        assert!(!pager.state().user_has_interacted);
    }
}
