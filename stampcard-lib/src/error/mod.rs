//! Error types

mod config;
mod loader;
mod storage;
mod table;

pub use config::*;
pub use loader::*;
pub use storage::*;
pub use table::*;
