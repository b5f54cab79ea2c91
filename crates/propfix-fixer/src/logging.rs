//! Opt-in file logging of fix decisions
//!
//! Records why a property was or was not given a default. Nothing is
//! written until `init_logger` is called, and logging failures never
//! affect a fix.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

static LOGGER: Mutex<Option<DecisionLog>> = Mutex::new(None);

/// Timestamped line sink behind the global logger
struct DecisionLog {
    file: File,
}

impl DecisionLog {
    fn create(path: &Path) -> std::io::Result<Self> {
        Ok(Self {
            file: File::create(path)?,
        })
    }

    fn line(&mut self, message: &str) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let _ = writeln!(self.file, "[{timestamp}] {message}");
        let _ = self.file.flush();
    }

    fn section(&mut self, title: &str) {
        let rule = "=".repeat(60);
        self.line(&rule);
        self.line(title);
        self.line(&rule);
    }
}

/// Run `f` against the logger if one is installed
fn with_logger(f: impl FnOnce(&mut DecisionLog)) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(logger) = guard.as_mut() {
            f(logger);
        }
    }
}

/// Start logging to `log_path`, or to `propfix-<timestamp>.log` in the
/// system temp directory. Returns the path being written to.
pub fn init_logger(log_path: Option<&Path>) -> std::io::Result<PathBuf> {
    let path = match log_path {
        Some(path) => path.to_path_buf(),
        None => {
            let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            std::env::temp_dir().join(format!("propfix-{timestamp}.log"))
        }
    };

    let logger = DecisionLog::create(&path)?;
    if let Ok(mut guard) = LOGGER.lock() {
        *guard = Some(logger);
    }
    Ok(path)
}

/// Stop logging and close the log file
pub fn shutdown_logger() {
    if let Ok(mut guard) = LOGGER.lock() {
        *guard = None;
    }
}

pub fn is_enabled() -> bool {
    LOGGER.lock().map(|guard| guard.is_some()).unwrap_or(false)
}

pub fn log_fix_start(fixer: &str, token_count: usize) {
    with_logger(|logger| {
        logger.section(&format!("FIX {fixer}"));
        logger.line(&format!("Stream has {token_count} tokens"));
    });
}

pub fn log_class(class_index: usize, property_count: usize) {
    with_logger(|logger| {
        logger.line(&format!("Class at token {class_index}: {property_count} properties"))
    });
}

pub fn log_property_skipped(name: &str, position: usize, reason: &str) {
    with_logger(|logger| logger.line(&format!("SKIPPED: {name} at token {position} - {reason}")));
}

pub fn log_default_inserted(name: &str, position: usize) {
    with_logger(|logger| {
        logger.line(&format!("FIXED: {name} at token {position} - inserted `= []`"))
    });
}

pub fn log_fix_aborted(error: &str) {
    with_logger(|logger| logger.line(&format!("ABORTED: {error}")));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_timestamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fix.log");

        let mut logger = DecisionLog::create(&path).unwrap();
        logger.section("FIX test");
        logger.line("hello");
        drop(logger);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].ends_with("] FIX test"));
        assert!(lines[3].starts_with('['));
        assert!(lines[3].ends_with("] hello"));
    }
}
