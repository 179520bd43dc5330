//! Index ownership and rebuild orchestration.
//!
//! `IndexService` owns the current selector index and every rebuild
//! trigger funnels through it: first use with no usable persisted index,
//! the watch-mode timer, the explicit `reindex` command, and
//! file-creation notifications. Consumers hold the service, never
//! ambient state.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use thiserror::Error;

use crate::alias::AliasTable;
use crate::extract::{self, ExtractError};
use crate::ignore::IgnoreRules;
use crate::rewrite;
use crate::scanner;
use crate::store::Store;
use crate::types::{ComponentRecord, RebuildStats, SelectorIndex};

/// Operation-scoped failures surfaced to the user. Neither changes any
/// index state.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("no active file to import into")]
    NoActiveFile,
    #[error("no component indexed for selector '{0}'; run `ngimport reindex` and retry")]
    ComponentNotFound(String),
}

/// One full index pass: ignore rules and alias table loaded once, tree
/// scanned once, per-file extraction with failure tallying. Always
/// returns a complete (possibly empty) index; per-file errors are
/// recovered and counted, never fatal.
pub fn build_index(root: &Path, suffix: &str) -> (SelectorIndex, RebuildStats) {
    let started = Instant::now();
    let rules = IgnoreRules::load(root);
    let aliases = AliasTable::load(root);
    let mut index = SelectorIndex::new();
    let mut stats = RebuildStats::default();

    for rel in scanner::scan(root, suffix, &rules) {
        let rel_str = rel.to_string_lossy().replace('\\', "/");
        match extract::extract_file(&root.join(&rel)) {
            Ok((selector, symbol)) => {
                let record = ComponentRecord {
                    file_path: rel_str.clone(),
                    symbol_name: symbol,
                    import_alias: aliases.resolve(&rel_str),
                };
                // Last write wins on selector collisions.
                index.insert(selector, record);
                stats.indexed += 1;
            }
            Err(ExtractError::MissingSelector) => stats.missing_selector += 1,
            Err(ExtractError::MissingName) => stats.missing_name += 1,
            Err(ExtractError::Read(err)) => {
                stats.read_errors += 1;
                eprintln!("[ngimport][warn] cannot read {rel_str}: {err}");
            }
        }
    }

    stats.duration_ms = started.elapsed().as_millis() as u64;
    (index, stats)
}

pub struct IndexService {
    root: PathBuf,
    suffix: String,
    store: Store,
    current: Arc<SelectorIndex>,
    building: bool,
    pending: bool,
}

impl IndexService {
    /// Construct the service, restoring the persisted index when a usable
    /// one exists. Call [`ensure_ready`](Self::ensure_ready) before the
    /// first query to fall back to a build.
    pub fn new(root: PathBuf, suffix: String) -> Self {
        let store = Store::new(&root);
        let current = Arc::new(store.load().unwrap_or_default());
        Self {
            root,
            suffix,
            store,
            current,
            building: false,
            pending: false,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The current complete index. Rebuilds swap the `Arc` only after a
    /// build finishes, so a held reference is never a partial map.
    pub fn index(&self) -> Arc<SelectorIndex> {
        Arc::clone(&self.current)
    }

    /// Build if no usable index was restored from the persisted slot.
    pub fn ensure_ready(&mut self) {
        if self.current.is_empty() {
            self.rebuild();
        }
    }

    /// Full rebuild, persist, swap. A trigger arriving while a build is in
    /// progress sets the pending flag and schedules exactly one follow-up
    /// build rather than a concurrent second one; that call itself
    /// returns `None`.
    pub fn rebuild(&mut self) -> Option<RebuildStats> {
        if self.building {
            self.pending = true;
            return None;
        }
        self.building = true;
        let mut last = None;
        loop {
            let (index, stats) = build_index(&self.root, &self.suffix);
            if let Err(err) = self.store.persist(&index) {
                eprintln!("[ngimport][warn] failed to persist index: {err}");
            }
            self.current = Arc::new(index);
            last = Some(stats);
            if !self.pending {
                break;
            }
            self.pending = false;
        }
        self.building = false;
        last
    }

    pub fn lookup(&self, selector: &str) -> Option<ComponentRecord> {
        self.current.get(selector).cloned()
    }

    /// Selectors containing the fragment, case-sensitive, sorted. A
    /// leading `<` on the fragment is tolerated so a tag-opening prefix
    /// can be passed through unchanged.
    pub fn complete(&self, fragment: &str) -> Vec<(String, ComponentRecord)> {
        let needle = fragment.trim_start_matches('<');
        let mut matches: Vec<(String, ComponentRecord)> = self
            .current
            .iter()
            .filter(|(selector, _)| selector.contains(needle))
            .map(|(selector, record)| (selector.clone(), record.clone()))
            .collect();
        matches.sort_by(|a, b| a.0.cmp(&b.0));
        matches
    }

    /// Look up the selector and rewrite the target file in place. The two
    /// [`ImportError`] cases abort the operation with a user-visible
    /// message and no state change.
    pub fn import_component(
        &self,
        selector: &str,
        target: Option<&Path>,
    ) -> anyhow::Result<ComponentRecord> {
        let target = target.ok_or(ImportError::NoActiveFile)?;
        let record = self
            .lookup(selector)
            .ok_or_else(|| ImportError::ComponentNotFound(selector.to_string()))?;
        let current_text = fs::read_to_string(target)
            .with_context(|| format!("failed to read {}", target.display()))?;
        let new_text = rewrite::rewrite(&current_text, &record, target, &self.root);
        if new_text != current_text {
            fs::write(target, new_text)
                .with_context(|| format!("failed to write {}", target.display()))?;
        }
        Ok(record)
    }
}
