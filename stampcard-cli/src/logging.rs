//! Session log files.
//!
//! Each run logs to `latest.log`. At startup the previous run's file is
//! archived as `session-<started>.log`, named after the time it was last
//! written, and only the newest archives are kept.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use simplelog::{Config, LevelFilter, WriteLogger};

const LATEST: &str = "latest.log";
const ARCHIVE_PREFIX: &str = "session-";
const KEEP_ARCHIVES: usize = 25;

/// Start file logging in `dir`. Failures are reported on stderr and the
/// session continues without a log.
pub(crate) fn init(dir: &Path, verbose: bool) {
    if let Err(e) = fs::create_dir_all(dir) {
        eprintln!("warning: cannot create log directory {}: {}", dir.display(), e);
        return;
    }
    if let Err(e) = archive_latest(dir) {
        eprintln!("warning: cannot archive previous log: {}", e);
    }
    prune_archives(dir, KEEP_ARCHIVES);

    let path = dir.join(LATEST);
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("warning: cannot open log file {}: {}", path.display(), e);
            return;
        }
    };
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = WriteLogger::init(level, Config::default(), file) {
        eprintln!("warning: logging disabled: {}", e);
    }
}

/// Rename `latest.log` after its last write time. Returns the archive path.
fn archive_latest(dir: &Path) -> io::Result<Option<PathBuf>> {
    let latest = dir.join(LATEST);
    let modified = match fs::metadata(&latest) {
        Ok(meta) => meta.modified()?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    let stamp = DateTime::<Local>::from(modified).format("%Y%m%d-%H%M%S");
    let mut archived = dir.join(format!("{}{}.log", ARCHIVE_PREFIX, stamp));
    let mut n = 1;
    while archived.exists() {
        archived = dir.join(format!("{}{}-{}.log", ARCHIVE_PREFIX, stamp, n));
        n += 1;
    }
    fs::rename(&latest, &archived)?;
    Ok(Some(archived))
}

/// Delete all but the `keep` newest session archives.
///
/// Archive names embed a sortable timestamp, so name order is age order.
fn prune_archives(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };
    let mut archives: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(ARCHIVE_PREFIX) && n.ends_with(".log"))
        })
        .collect();
    archives.sort();
    let excess = archives.len().saturating_sub(keep);
    for path in archives.into_iter().take(excess) {
        if let Err(e) = fs::remove_file(&path) {
            eprintln!("warning: cannot remove old log {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archives_previous_session() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(archive_latest(dir.path()).unwrap(), None);

        fs::write(dir.path().join(LATEST), "first run").unwrap();
        let archived = archive_latest(dir.path()).unwrap().unwrap();
        assert!(!dir.path().join(LATEST).exists());
        assert_eq!(fs::read_to_string(&archived).unwrap(), "first run");

        // Same timestamp twice does not overwrite the earlier archive
        fs::write(dir.path().join(LATEST), "second run").unwrap();
        let stamp_source = fs::metadata(&archived).unwrap().modified().unwrap();
        File::options()
            .write(true)
            .open(dir.path().join(LATEST))
            .unwrap()
            .set_modified(stamp_source)
            .unwrap();
        let second = archive_latest(dir.path()).unwrap().unwrap();
        assert_ne!(second, archived);
        assert_eq!(fs::read_to_string(&archived).unwrap(), "first run");
    }

    #[test]
    fn unusable_log_dir_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("logs");
        fs::write(&blocker, "not a directory").unwrap();

        init(&blocker, false);
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
    }

    #[test]
    fn prune_keeps_newest_archives_only() {
        let dir = tempfile::tempdir().unwrap();
        for day in 1..=4 {
            let name = format!("{}2024010{}-000000.log", ARCHIVE_PREFIX, day);
            fs::write(dir.path().join(name), "old").unwrap();
        }
        fs::write(dir.path().join(LATEST), "current").unwrap();
        fs::write(dir.path().join("notes.log"), "unrelated").unwrap();

        prune_archives(dir.path(), 2);

        let mut left: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        left.sort();
        assert_eq!(
            left,
            vec![
                "latest.log",
                "notes.log",
                "session-20240103-000000.log",
                "session-20240104-000000.log",
            ]
        );
    }
}
