//! Key handling for the search box.

use log::debug;

use crate::input::{EventResult, Key, KeyCombo};

use super::nav::NavAction;
use super::state::SearchBox;

/// Returns `true` for the find shortcut (Ctrl+F, Ctrl+K or Cmd+F, Cmd+K).
pub fn is_find_shortcut(key: &KeyCombo) -> bool {
    let modifier = key.modifiers.ctrl || key.modifiers.meta;
    modifier
        && !key.modifiers.alt
        && matches!(key.key, Key::Char('f' | 'F' | 'k' | 'K'))
}

impl SearchBox {
    /// Handle a key while the search box is focused.
    ///
    /// Arrows move through the suggestions, Enter/Tab commit the highlighted
    /// one (available from [`take_change`](Self::take_change) or the next
    /// [`tick`](Self::tick)), Escape hides the list.
    pub fn on_key(&mut self, key: &KeyCombo) -> EventResult {
        match self.nav.on_key(key, self.suggestions().len()) {
            NavAction::Ignored => EventResult::Ignored,
            NavAction::Moved(index) => {
                debug!("Suggestion highlight: {}", index);
                EventResult::Consumed
            }
            NavAction::Commit(index) => {
                self.outbox = self.select(index);
                EventResult::Consumed
            }
            NavAction::Dismiss => {
                self.dismiss();
                EventResult::Consumed
            }
        }
    }

    /// Handle a key anywhere on the page: the find shortcut focuses the box.
    pub fn on_global_key(&mut self, key: &KeyCombo) -> EventResult {
        if is_find_shortcut(key) {
            self.focus();
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}
