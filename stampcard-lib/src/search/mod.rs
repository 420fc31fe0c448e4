//! Search: normalized filtering, autocomplete suggestions and the search box.

mod debounce;
mod events;
mod index;
mod nav;
mod state;

pub use debounce::Debouncer;
pub use events::is_find_shortcut;
pub use index::{SearchIndex, SuggestionEntry};
pub use nav::{NavAction, NavState, SuggestionNav};
pub use state::{SearchBox, SearchChange};

pub use crate::text::normalize;
