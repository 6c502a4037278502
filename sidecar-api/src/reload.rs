//! Dev-mode change detection.
//!
//! Restarting the sidecar is owned by the supervising desktop process; this
//! side only watches and reports. The `sidecar_api::reload` target is
//! clamped to warning-and-above by the bridge's filter, so routine churn
//! stays out of the structured stream.

use anyhow::Result;
use notify::{Event, RecursiveMode, Watcher};
use sidecar_logging::LogContext;
use std::path::PathBuf;

/// Watches `dir` recursively on a background thread and reports detected
/// source changes. The watcher lives for the process lifetime.
pub fn start_change_watcher(log: &LogContext, dir: PathBuf) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
        if let Ok(event) = res {
            if event.kind.is_modify() || event.kind.is_create() {
                let _ = tx.send(event.paths);
            }
        }
    })?;
    watcher.watch(&dir, RecursiveMode::Recursive)?;

    std::thread::spawn(move || {
        let _watcher = watcher;
        while let Ok(paths) = rx.recv() {
            tracing::info!(
                target: "sidecar_api::reload",
                changed = paths.len(),
                "Detected file changes"
            );
        }
    });

    log.info(&format!("Change watcher started for {}", dir.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidecar_logging::{Level, LineSink};
    use tempfile::TempDir;

    #[test]
    fn watcher_starts_on_an_existing_directory() {
        let dir = TempDir::new().expect("temp dir");
        let log = LogContext::new(LineSink::from_writer(std::io::sink()), Level::Info);

        start_change_watcher(&log, dir.path().to_path_buf()).expect("watcher should start");
    }

    #[test]
    fn watcher_fails_on_a_missing_directory() {
        let log = LogContext::new(LineSink::from_writer(std::io::sink()), Level::Info);
        let missing = PathBuf::from("/nonexistent/sidecar-watch-target");

        assert!(start_change_watcher(&log, missing).is_err());
    }
}
