//! Recursive directory scan for component files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::ignore::IgnoreRules;

/// Walk `root` depth-first and collect files whose name ends with `suffix`
/// and whose root-relative path is not ignored.
///
/// Directories are always descended into; ignore rules apply to files
/// only. A nonexistent root yields an empty list, and unreadable entries
/// are skipped with a warning rather than aborting the scan.
pub fn scan(root: &Path, suffix: &str, rules: &IgnoreRules) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk(root, root, suffix, rules, &mut files);
    files
}

fn walk(root: &Path, dir: &Path, suffix: &str, rules: &IgnoreRules, files: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            eprintln!("[ngimport][warn] cannot read {}: {err}", dir.display());
            return;
        }
    };

    let mut entries: Vec<_> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                eprintln!("[ngimport][warn] skipping entry in {}: {err}", dir.display());
                None
            }
        })
        .collect();
    entries.sort_by_key(|entry| entry.file_name().to_string_lossy().to_lowercase());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            walk(root, &path, suffix, rules, files);
            continue;
        }
        let name = entry.file_name();
        if !name.to_string_lossy().ends_with(suffix) {
            continue;
        }
        let rel = path.strip_prefix(root).unwrap_or(&path);
        let rel_str = rel.to_string_lossy().replace('\\', "/");
        if !rules.is_ignored(&rel_str) {
            files.push(PathBuf::from(rel_str));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_suffix_matches_recursively() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        let root = tmp.path();
        std::fs::create_dir_all(root.join("app/widgets")).expect("nested dirs");
        std::fs::write(root.join("app/foo.component.ts"), "").expect("write foo");
        std::fs::write(root.join("app/widgets/bar.component.ts"), "").expect("write bar");
        std::fs::write(root.join("app/foo.service.ts"), "").expect("write service");

        let found = scan(root, ".component.ts", &IgnoreRules::from_lines(""));
        let names: Vec<String> = found.iter().map(|p| p.to_string_lossy().to_string()).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"app/foo.component.ts".to_string()));
        assert!(names.contains(&"app/widgets/bar.component.ts".to_string()));
    }

    #[test]
    fn ignored_files_are_excluded() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        let root = tmp.path();
        std::fs::create_dir_all(root.join("dist")).expect("dist dir");
        std::fs::write(root.join("keep.component.ts"), "").expect("write keep");
        std::fs::write(root.join("dist/skip.component.ts"), "").expect("write skip");

        let rules = IgnoreRules::from_lines("dist\n");
        let found = scan(root, ".component.ts", &rules);
        assert_eq!(found, vec![PathBuf::from("keep.component.ts")]);
    }

    #[test]
    fn nonexistent_root_yields_empty() {
        let found = scan(
            Path::new("/definitely/not/a/real/root"),
            ".component.ts",
            &IgnoreRules::from_lines(""),
        );
        assert!(found.is_empty());
    }
}
