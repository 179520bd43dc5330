//! Ignore-rule handling for the tree scanner.
//!
//! Rules come from a `.gitignore` at the scan root, one pattern per line.
//! This is deliberately not a full gitignore engine: `*` maps to `.*`,
//! there is no `**`, no negation, no directory-boundary semantics. A
//! pattern matches if it matches anywhere in the relative path.

use std::fs;
use std::path::Path;

use regex::Regex;

/// Name of the ignore-rule file read from the scan root.
pub const IGNORE_FILE: &str = ".gitignore";

/// Compiled ignore patterns, evaluated top to bottom.
pub struct IgnoreRules {
    patterns: Vec<Regex>,
}

impl IgnoreRules {
    /// Read rules from `<root>/.gitignore`. A missing file means nothing
    /// is ignored.
    pub fn load(root: &Path) -> Self {
        match fs::read_to_string(root.join(IGNORE_FILE)) {
            Ok(content) => Self::from_lines(&content),
            Err(_) => Self {
                patterns: Vec::new(),
            },
        }
    }

    /// Compile rules from raw ignore-file content. Blank lines are dropped.
    pub fn from_lines(content: &str) -> Self {
        let patterns = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(compile_pattern)
            .collect();
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether any rule matches the given root-relative path.
    pub fn is_ignored(&self, rel_path: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(rel_path))
    }
}

/// Turn one glob-like ignore pattern into a substring-search regex.
///
/// A pattern that still fails to compile degrades to matching broadly
/// rather than erroring: a scan must never abort due to a bad ignore rule.
fn compile_pattern(pattern: &str) -> Regex {
    let mut escaped = String::with_capacity(pattern.len() + 8);
    for ch in pattern.chars() {
        match ch {
            '*' => escaped.push_str(".*"),
            '\\' | '.' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '|' | '?' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    Regex::new(&escaped).unwrap_or_else(|err| {
        eprintln!("[ngimport][warn] unusable ignore pattern '{pattern}': {err}");
        Regex::new(".*").expect("valid regex literal")
    })
}
