//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("app", "stampcard", "stampcard")
}

/// Directory holding `config.toml`.
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// The table state database in the data directory.
pub fn tables_db() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("tables.db"))
}

/// Directory for session logs.
pub fn log_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().join("logs"))
}
