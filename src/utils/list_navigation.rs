//! Cursor movement helpers for `ListState`.

use crate::keymap::Action;
use ratatui::widgets::ListState;

/// Rows skipped by PageUp / PageDown.
pub const PAGE_SIZE: usize = 5;

pub trait ListStateExt {
    /// Move the selection by `delta` rows, stopping at either end.
    fn move_by(&mut self, delta: isize, total_items: usize);

    /// Keep the selection inside `0..total_items`, selecting the first row
    /// when nothing is selected. Clears it for an empty list.
    fn clamp_to(&mut self, total_items: usize);

    /// Apply a navigation action. Returns false for non-navigation actions.
    fn navigate(&mut self, action: Action, total_items: usize) -> bool;
}

impl ListStateExt for ListState {
    fn move_by(&mut self, delta: isize, total_items: usize) {
        if total_items == 0 {
            self.select(None);
            return;
        }
        let current = self.selected().unwrap_or(0) as isize;
        let last = total_items as isize - 1;
        self.select(Some((current + delta).clamp(0, last) as usize));
    }

    fn clamp_to(&mut self, total_items: usize) {
        if total_items == 0 {
            self.select(None);
        } else {
            let current = self.selected().unwrap_or(0);
            self.select(Some(current.min(total_items - 1)));
        }
    }

    fn navigate(&mut self, action: Action, total_items: usize) -> bool {
        let page = PAGE_SIZE as isize;
        match action {
            Action::MoveUp => self.move_by(-1, total_items),
            Action::MoveDown => self.move_by(1, total_items),
            Action::PageUp => self.move_by(-page, total_items),
            Action::PageDown => self.move_by(page, total_items),
            Action::GoToTop => self.move_by(isize::MIN / 2, total_items),
            Action::GoToEnd => self.move_by(isize::MAX / 2, total_items),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_stops_at_ends() {
        let mut state = ListState::default();
        state.move_by(-1, 3);
        assert_eq!(state.selected(), Some(0));
        state.move_by(10, 3);
        assert_eq!(state.selected(), Some(2));
    }

    #[test]
    fn test_navigate_actions() {
        let mut state = ListState::default();
        assert!(state.navigate(Action::GoToEnd, 12));
        assert_eq!(state.selected(), Some(11));
        assert!(state.navigate(Action::PageUp, 12));
        assert_eq!(state.selected(), Some(6));
        assert!(state.navigate(Action::GoToTop, 12));
        assert_eq!(state.selected(), Some(0));
        assert!(!state.navigate(Action::Confirm, 12));
    }

    #[test]
    fn test_clamp_to() {
        let mut state = ListState::default();
        state.select(Some(7));
        state.clamp_to(3);
        assert_eq!(state.selected(), Some(2));
        state.clamp_to(0);
        assert_eq!(state.selected(), None);

        let mut fresh = ListState::default();
        fresh.clamp_to(4);
        assert_eq!(fresh.selected(), Some(0));
    }
}
