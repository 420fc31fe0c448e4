//! Keyboard navigation through the suggestion list.

use crate::input::{Key, KeyCombo};

/// Navigation state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavState {
    /// Nothing highlighted.
    #[default]
    Idle,
    /// The suggestion at this index is highlighted.
    Browsing(usize),
}

/// What a key press did to the suggestion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// The key is not for the suggestion list.
    Ignored,
    /// The highlight moved to this index.
    Moved(usize),
    /// The suggestion at this index was committed.
    Commit(usize),
    /// The list was dismissed.
    Dismiss,
}

/// Arrow/Enter/Tab/Escape state machine over a suggestion list.
///
/// Arrows wrap in both directions. Enter and Tab commit only while an entry
/// is highlighted, so they keep their normal meaning otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuggestionNav {
    state: NavState,
}

impl SuggestionNav {
    /// Creates an idle navigator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> NavState {
        self.state
    }

    /// Highlighted index, if browsing.
    pub fn highlighted(&self) -> Option<usize> {
        match self.state {
            NavState::Idle => None,
            NavState::Browsing(index) => Some(index),
        }
    }

    /// Back to idle.
    pub fn reset(&mut self) {
        self.state = NavState::Idle;
    }

    /// Apply a key press against a list of `len` suggestions.
    pub fn on_key(&mut self, key: &KeyCombo, len: usize) -> NavAction {
        if key.modifiers.ctrl || key.modifiers.alt || key.modifiers.meta {
            return NavAction::Ignored;
        }

        match key.key {
            Key::Down if len > 0 => {
                let next = match self.state {
                    NavState::Browsing(index) => (index + 1) % len,
                    NavState::Idle => 0,
                };
                self.state = NavState::Browsing(next);
                NavAction::Moved(next)
            }
            Key::Up if len > 0 => {
                let next = match self.state {
                    NavState::Browsing(index) => (index + len - 1) % len,
                    NavState::Idle => len - 1,
                };
                self.state = NavState::Browsing(next);
                NavAction::Moved(next)
            }
            Key::Enter | Key::Tab => match self.state {
                NavState::Browsing(index) if index < len => {
                    self.state = NavState::Idle;
                    NavAction::Commit(index)
                }
                _ => NavAction::Ignored,
            },
            Key::Escape if len > 0 || self.state != NavState::Idle => {
                self.state = NavState::Idle;
                NavAction::Dismiss
            }
            _ => NavAction::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_tab_still_commits() {
        let mut nav = SuggestionNav::new();
        nav.on_key(&KeyCombo::key(Key::Down), 2);
        assert_eq!(
            nav.on_key(&KeyCombo::key(Key::Tab).shift(), 2),
            NavAction::Commit(0)
        );
    }

    #[test]
    fn stale_index_does_not_commit() {
        let mut nav = SuggestionNav::new();
        nav.on_key(&KeyCombo::key(Key::Up), 3);
        assert_eq!(nav.highlighted(), Some(2));
        assert_eq!(nav.on_key(&KeyCombo::key(Key::Enter), 1), NavAction::Ignored);
    }
}
