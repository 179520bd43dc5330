//! Import insertion: pure text-to-text rewriting.
//!
//! Given a target file's current text and a component record, produce new
//! text with the import line prepended and the component registered in
//! the `@Component({ imports: [...] })` array. Writing the result back is
//! the caller's job. The rewrite is idempotent: an identical existing
//! import line and an existing array entry both suppress re-insertion.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::types::ComponentRecord;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

pub(crate) fn regex_component_open() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"@Component\(\s*\{"))
}

pub(crate) fn regex_imports_open() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"imports\s*:\s*\["))
}

/// Compute the target file's new text with `record`'s component imported.
///
/// The import path prefers the record's alias; otherwise it is the
/// relative path from the target file's directory to the declaring file,
/// stripped of its `.ts` suffix. If the text carries no `@Component`
/// annotation at all, only the import line is added.
pub fn rewrite(
    current_text: &str,
    record: &ComponentRecord,
    target_path: &Path,
    project_root: &Path,
) -> String {
    let import_path = match &record.import_alias {
        Some(alias) => alias.clone(),
        None => {
            let target_rel = target_path
                .strip_prefix(project_root)
                .unwrap_or(target_path)
                .to_string_lossy()
                .replace('\\', "/");
            relative_import(&target_rel, &record.file_path)
        }
    };

    let import_line = format!(
        "import {{ {} }} from '{}';",
        record.symbol_name, import_path
    );
    let mut text = if current_text.lines().any(|line| line.trim() == import_line) {
        current_text.to_string()
    } else {
        format!("{import_line}\n{current_text}")
    };

    let Some(annotation) = regex_component_open().find(&text) else {
        return text;
    };
    let annotation_body = annotation.end();

    match regex_imports_open().find_at(&text, annotation_body) {
        Some(open_match) => {
            let open = open_match.end();
            let Some(close) = text[open..].find(']').map(|i| open + i) else {
                return text;
            };
            let inner = text[open..close].to_string();
            if inner.split(',').any(|item| item.trim() == record.symbol_name) {
                return text;
            }
            if inner.trim().is_empty() {
                text.insert_str(open, &record.symbol_name);
            } else {
                text.insert_str(open, &format!("{}, ", record.symbol_name));
            }
        }
        None => {
            text.insert_str(
                annotation_body,
                &format!("\n  imports: [{}],", record.symbol_name),
            );
        }
    }
    text
}

/// Relative import specifier from one root-relative file to another, with
/// the `.ts` suffix dropped and a `./` prefix when no ascent is needed.
fn relative_import(from_file: &str, to_file: &str) -> String {
    let to_file = to_file.strip_suffix(".ts").unwrap_or(to_file);
    let from_parts: Vec<&str> = from_file.split('/').collect();
    let from_dir = &from_parts[..from_parts.len().saturating_sub(1)];
    let to_parts: Vec<&str> = to_file.split('/').collect();

    let common = from_dir
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::new();
    if from_dir.len() == common {
        parts.push(".");
    } else {
        for _ in common..from_dir.len() {
            parts.push("..");
        }
    }
    parts.extend(&to_parts[common..]);
    parts.join("/")
}
