//! Row model shared by the search index and the table

mod record;
mod value;

pub use record::*;
pub use value::*;
