//! Watch mode: keep the selector index live while editing.
//!
//! Two triggers drive rebuilds here:
//! - a fixed-interval timer (`refresh_interval_secs`) that always does a
//!   full rebuild, and
//! - debounced file-creation notifications for new component files.
//!
//! Re-entering watch mode recreates the timer deadline, so timers never
//! stack. Triggers are serviced one at a time; the service's pending
//! flag covers anything that arrives mid-build.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{RecvTimeoutError, channel};
use std::time::{Duration, Instant};

use notify::{EventKind, RecommendedWatcher, RecursiveMode};
use notify_debouncer_full::{DebounceEventResult, Debouncer, NoCache, new_debouncer};

use crate::ignore::IgnoreRules;
use crate::service::IndexService;
use crate::types::{DEFAULT_COMPONENT_SUFFIX, DEFAULT_REFRESH_INTERVAL_SECS};

/// Watch configuration
pub struct WatchConfig {
    /// Interval between unconditional full rebuilds.
    pub refresh_interval: Duration,
    /// Debounce window for filesystem events (default: 500ms).
    pub debounce_duration: Duration,
    /// Component-file suffix to react to.
    pub suffix: String,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
            debounce_duration: Duration::from_millis(500),
            suffix: DEFAULT_COMPONENT_SUFFIX.to_string(),
        }
    }
}

/// Run the watch loop until the event channel closes.
pub fn watch_and_reindex(service: &mut IndexService, config: &WatchConfig) -> anyhow::Result<()> {
    let (tx, rx) = channel();

    let mut debouncer: Debouncer<RecommendedWatcher, NoCache> = new_debouncer(
        config.debounce_duration,
        None,
        move |result: DebounceEventResult| {
            if let Err(e) = tx.send(result) {
                eprintln!("[watch] error sending event: {e}");
            }
        },
    )?;
    debouncer
        .watch(service.root(), RecursiveMode::Recursive)
        .map_err(|e| anyhow::anyhow!("failed to watch {}: {}", service.root().display(), e))?;

    let rules = IgnoreRules::load(service.root());
    let tracked = count_tracked_files(service.root(), &config.suffix);

    if service.index().is_empty() {
        eprintln!("[watch] initial index...");
        if let Some(stats) = service.rebuild() {
            eprintln!("[watch] ✓ {}", stats.summary());
        }
    } else {
        eprintln!(
            "[watch] restored {} selector(s) from persisted index",
            service.index().len()
        );
    }
    eprintln!(
        "[watch] watching {} component file(s), full rebuild every {}s. Press Ctrl+C to exit",
        tracked,
        config.refresh_interval.as_secs()
    );

    let mut next_full = Instant::now() + config.refresh_interval;
    loop {
        let now = Instant::now();
        if now >= next_full {
            if let Some(stats) = service.rebuild() {
                eprintln!("[watch] ✓ {}", stats.summary());
            }
            next_full = Instant::now() + config.refresh_interval;
            continue;
        }

        match rx.recv_timeout(next_full - now) {
            Ok(Ok(events)) => {
                let created = collect_created_paths(&events, &config.suffix, service.root(), &rules);
                if created.is_empty() {
                    continue;
                }
                if created.len() == 1 {
                    eprintln!("[watch] new: {} → reindexing...", created[0].display());
                } else {
                    eprintln!("[watch] {} new component files → reindexing...", created.len());
                }
                if let Some(stats) = service.rebuild() {
                    eprintln!("[watch] ✓ {}", stats.summary());
                }
            }
            Ok(Err(errors)) => {
                for error in errors {
                    eprintln!("[watch] error: {error}");
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                // Timer fires on the next loop iteration.
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Created component files from one debounced event batch.
fn collect_created_paths(
    events: &[notify_debouncer_full::DebouncedEvent],
    suffix: &str,
    root: &Path,
    rules: &IgnoreRules,
) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for event in events {
        if !matches!(event.kind, EventKind::Create(_)) {
            continue;
        }
        for path in &event.paths {
            if !path.to_string_lossy().ends_with(suffix) {
                continue;
            }
            let rel = path.strip_prefix(root).unwrap_or(path);
            let rel_str = rel.to_string_lossy().replace('\\', "/");
            if rules.is_ignored(&rel_str) {
                continue;
            }
            paths.push(rel.to_path_buf());
        }
    }
    paths
}

/// Count component files under the root, for the startup summary.
fn count_tracked_files(root: &Path, suffix: &str) -> usize {
    walkdir::WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(suffix))
        .count()
}
