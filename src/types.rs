use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// File-name suffix marking a component declaration file.
pub const DEFAULT_COMPONENT_SUFFIX: &str = ".component.ts";

/// Seconds between automatic full rebuilds in watch mode.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;

/// Indexed metadata for one discovered component.
///
/// A record only exists for files that yielded both a selector and an
/// exported class name; `symbol_name` is therefore always non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    /// Declaring file, relative to the project root (`/` separators).
    pub file_path: String,
    /// Exported class name implementing the component.
    pub symbol_name: String,
    /// Path alias preferred over a relative import, when the file falls
    /// under a configured tsconfig alias mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_alias: Option<String>,
}

/// Mapping from selector string to its component record.
///
/// Rebuilt wholesale on every index pass and swapped by reference, never
/// patched in place.
pub type SelectorIndex = HashMap<String, ComponentRecord>;

/// Per-rebuild telemetry: what was indexed and what was skipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RebuildStats {
    pub indexed: usize,
    pub missing_selector: usize,
    pub missing_name: usize,
    pub read_errors: usize,
    pub duration_ms: u64,
}

impl RebuildStats {
    pub fn skipped(&self) -> usize {
        self.missing_selector + self.missing_name + self.read_errors
    }

    /// One-line rebuild report for the CLI and watch mode.
    pub fn summary(&self) -> String {
        format!(
            "indexed {} component(s) in {:.2}s (missing selector: {}, missing name: {}, unreadable: {})",
            self.indexed,
            self.duration_ms as f64 / 1000.0,
            self.missing_selector,
            self.missing_name,
            self.read_errors,
        )
    }
}
