//! Persistence for the selector index.
//!
//! The index survives across sessions in a single named slot,
//! `.ngimport/index.json`. Absence or emptiness is a valid state meaning
//! "index not yet built"; the caller falls back to a full rebuild.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::SelectorIndex;

/// Current schema version for the persisted slot.
pub const STORE_SCHEMA_VERSION: &str = "1";

/// Directory holding ngimport artifacts, under the project root.
pub const STORE_DIR: &str = ".ngimport";

/// File name of the persisted index slot.
pub const STORE_FILE: &str = "index.json";

/// On-disk envelope around the selector map.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreEnvelope {
    #[serde(default)]
    schema_version: String,
    /// Timestamp when the index was persisted (ISO 8601).
    #[serde(default)]
    generated_at: String,
    #[serde(default)]
    record_count: usize,
    #[serde(default)]
    selectors: SelectorIndex,
}

pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(project_root: &Path) -> Self {
        Self {
            path: project_root.join(STORE_DIR).join(STORE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Restore the persisted index if present, parseable, schema-current
    /// and non-empty; `None` signals the caller to rebuild.
    pub fn load(&self) -> Option<SelectorIndex> {
        let content = fs::read_to_string(&self.path).ok()?;
        let envelope: StoreEnvelope = match serde_json::from_str(&content) {
            Ok(envelope) => envelope,
            Err(err) => {
                eprintln!(
                    "[ngimport][warn] discarding unreadable index at {}: {err}",
                    self.path.display()
                );
                return None;
            }
        };
        if envelope.schema_version != STORE_SCHEMA_VERSION {
            eprintln!(
                "[ngimport][warn] discarding index with stale schema '{}'",
                envelope.schema_version
            );
            return None;
        }
        if envelope.selectors.is_empty() {
            return None;
        }
        Some(envelope.selectors)
    }

    /// Write the full map back to the slot. Called after every successful
    /// build.
    pub fn persist(&self, index: &SelectorIndex) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let now = time::OffsetDateTime::now_utc();
        let generated_at = now
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| "unknown".to_string());
        let envelope = StoreEnvelope {
            schema_version: STORE_SCHEMA_VERSION.to_string(),
            generated_at,
            record_count: index.len(),
            selectors: index.clone(),
        };
        let json = serde_json::to_string_pretty(&envelope)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
