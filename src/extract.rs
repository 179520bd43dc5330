//! Regex-based component metadata extraction.
//!
//! Extraction operates on raw text, not an AST. The two patterns mirror
//! the canonical component-declaration shape: a `selector: '...'` field
//! followed by an `export class` declaration. Only the first match of
//! each is taken; a file declaring multiple components contributes one
//! record (documented limitation). A real parser could replace this
//! module without touching any caller.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

pub(crate) fn regex_selector() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"selector:\s*'([^']+)'"))
}

pub(crate) fn regex_export_class() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"export\s+class\s+([A-Za-z0-9_$]+)"))
}

/// Why a candidate file produced no index entry.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read component file: {0}")]
    Read(#[from] io::Error),
    #[error("no selector declaration found")]
    MissingSelector,
    #[error("no exported class name found")]
    MissingName,
}

/// Pull `(selector, symbol_name)` out of a component file's text.
///
/// The selector must be found before a name is attempted; absence of
/// either is a distinct failure kind so rebuild telemetry can tally them
/// separately.
pub fn extract(text: &str) -> Result<(String, String), ExtractError> {
    let selector = regex_selector()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(ExtractError::MissingSelector)?;
    let symbol = regex_export_class()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(ExtractError::MissingName)?;
    Ok((selector, symbol))
}

/// Read a file and extract its component metadata. I/O failures are a
/// third failure kind, distinct from content mismatches.
pub fn extract_file(path: &Path) -> Result<(String, String), ExtractError> {
    let text = fs::read_to_string(path)?;
    extract(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPONENT: &str = "import { Component } from '@angular/core';\n\n\
        @Component({\n  selector: 'app-foo',\n  templateUrl: './foo.component.html',\n})\n\
        export class FooComponent {}\n";

    #[test]
    fn extracts_selector_and_class_name() {
        let (selector, symbol) = extract(COMPONENT).expect("extract");
        assert_eq!(selector, "app-foo");
        assert_eq!(symbol, "FooComponent");
    }

    #[test]
    fn missing_selector_is_its_own_failure() {
        let err = extract("export class FooComponent {}\n").expect_err("no selector");
        assert!(matches!(err, ExtractError::MissingSelector));
    }

    #[test]
    fn missing_class_is_its_own_failure() {
        let err = extract("const x = { selector: 'app-foo' };\n").expect_err("no class");
        assert!(matches!(err, ExtractError::MissingName));
    }

    #[test]
    fn first_declaration_wins_in_multi_component_files() {
        let text = format!(
            "{COMPONENT}\n@Component({{ selector: 'app-bar' }})\nexport class BarComponent {{}}\n"
        );
        let (selector, symbol) = extract(&text).expect("extract");
        assert_eq!(selector, "app-foo");
        assert_eq!(symbol, "FooComponent");
    }

    #[test]
    fn unreadable_file_is_a_read_error() {
        let err = extract_file(Path::new("/no/such/file.component.ts")).expect_err("read error");
        assert!(matches!(err, ExtractError::Read(_)));
    }
}
