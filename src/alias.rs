//! Path-alias resolution from `tsconfig.json`.
//!
//! `compilerOptions.paths` maps alias keys like `@app/*` to target
//! patterns like `src/app/*`. Targets become anchored regexes rooted at
//! the project source directory; the first alias whose pattern set
//! matches a file path wins. Absent or malformed configuration degrades
//! to an empty table so index construction never fails on it.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde_json::Value;

pub const TSCONFIG_FILE: &str = "tsconfig.json";

struct AliasEntry {
    alias: String,
    patterns: Vec<Regex>,
}

/// Alias-to-pattern table, built once per index pass and read-only after.
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Load `<root>/tsconfig.json` and derive the table from
    /// `compilerOptions.paths`. Any failure yields an empty table.
    pub fn load(project_root: &Path) -> Self {
        let path = project_root.join(TSCONFIG_FILE);
        let Ok(content) = fs::read_to_string(&path) else {
            return Self::empty();
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(tsconfig) => Self::from_tsconfig(&tsconfig),
            Err(err) => {
                eprintln!("[ngimport][warn] failed to parse {}: {err}", path.display());
                Self::empty()
            }
        }
    }

    pub fn from_tsconfig(tsconfig: &Value) -> Self {
        let Some(paths) = tsconfig
            .pointer("/compilerOptions/paths")
            .and_then(|v| v.as_object())
        else {
            return Self::empty();
        };
        let base_url = tsconfig
            .pointer("/compilerOptions/baseUrl")
            .and_then(|v| v.as_str())
            .unwrap_or(".");

        let mut entries = Vec::new();
        for (alias, targets) in paths {
            let patterns: Vec<Regex> = targets
                .as_array()
                .map(|arr| {
                    arr.iter()
                        .filter_map(|v| v.as_str())
                        .filter_map(|target| compile_target(base_url, target))
                        .collect()
                })
                .unwrap_or_default();
            if !patterns.is_empty() {
                entries.push(AliasEntry {
                    alias: alias.clone(),
                    patterns,
                });
            }
        }
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First alias whose pattern set matches the root-relative file path,
    /// with `*` in the alias key replaced by `index` (a folder import
    /// resolves to the folder's index file).
    pub fn resolve(&self, rel_path: &str) -> Option<String> {
        for entry in &self.entries {
            if entry.patterns.iter().any(|re| re.is_match(rel_path)) {
                return Some(entry.alias.replace('*', "index"));
            }
        }
        None
    }
}

/// Derive an anchored regex from one tsconfig target pattern.
fn compile_target(base_url: &str, target: &str) -> Option<Regex> {
    let normalized = target.replace('\\', "/");
    let normalized = normalized.trim_start_matches("./");
    let base = base_url.replace('\\', "/");
    let base = base.trim_start_matches("./").trim_end_matches('/');
    let rooted = if base.is_empty() || base == "." {
        normalized.to_string()
    } else {
        format!("{base}/{normalized}")
    };

    let mut pattern = String::with_capacity(rooted.len() + 8);
    pattern.push('^');
    for ch in rooted.chars() {
        match ch {
            '*' => pattern.push_str(".*"),
            '\\' | '.' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '|' | '?' => {
                pattern.push('\\');
                pattern.push(ch);
            }
            _ => pattern.push(ch),
        }
    }
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(err) => {
            eprintln!("[ngimport][warn] unusable alias target '{target}': {err}");
            None
        }
    }
}
