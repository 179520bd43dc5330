//! End-to-end CLI tests for ngimport.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get a command pointing to the ngimport binary
fn ngimport() -> Command {
    cargo_bin_cmd!("ngimport")
}

/// A project root with one component under `a/` and an empty `.gitignore`.
fn sample_project() -> TempDir {
    let temp = TempDir::new().expect("temp dir");
    let root = temp.path();
    fs::create_dir_all(root.join("a")).expect("a dir");
    fs::create_dir_all(root.join("b")).expect("b dir");
    fs::write(root.join(".gitignore"), "").expect("write gitignore");
    fs::write(
        root.join("a/foo.component.ts"),
        "@Component({\n  selector: 'app-foo',\n})\nexport class FooComponent {}\n",
    )
    .expect("write foo");
    fs::write(
        root.join("b/bar.component.ts"),
        "@Component({\n  selector: 'app-bar',\n  imports: [],\n})\nexport class BarComponent {}\n",
    )
    .expect("write bar");
    temp
}

mod cli_basics {
    use super::*;

    #[test]
    fn shows_help() {
        ngimport()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("ngimport"))
            .stdout(predicate::str::contains("reindex"))
            .stdout(predicate::str::contains("import"));
    }

    #[test]
    fn shows_version() {
        ngimport()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn unknown_command_fails_with_usage() {
        ngimport()
            .arg("frobnicate")
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown command"))
            .stderr(predicate::str::contains("Usage"));
    }
}

mod indexing {
    use super::*;

    #[test]
    fn reindex_builds_and_persists_the_index() {
        let project = sample_project();
        ngimport()
            .current_dir(project.path())
            .arg("reindex")
            .assert()
            .success()
            .stdout(predicate::str::contains("indexed 2 component(s)"))
            .stdout(predicate::str::contains("2 selector(s) in the index"));

        assert!(project.path().join(".ngimport/index.json").exists());
    }

    #[test]
    fn complete_lists_matching_selectors_with_origin() {
        let project = sample_project();
        ngimport()
            .current_dir(project.path())
            .args(["complete", "app-f"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "app-foo  FooComponent from a/foo.component.ts",
            ))
            .stdout(predicate::str::contains("app-bar").not());
    }

    #[test]
    fn lookup_prints_the_record_as_json() {
        let project = sample_project();
        ngimport()
            .current_dir(project.path())
            .args(["lookup", "app-foo"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"symbolName\": \"FooComponent\""))
            .stdout(predicate::str::contains("a/foo.component.ts"));
    }

    #[test]
    fn lookup_of_unknown_selector_suggests_reindex() {
        let project = sample_project();
        ngimport()
            .current_dir(project.path())
            .args(["lookup", "app-ghost"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("reindex"));
    }
}

mod importing {
    use super::*;

    fn assert_bar_rewritten(root: &Path) {
        let text = fs::read_to_string(root.join("b/bar.component.ts")).expect("read bar");
        assert!(
            text.starts_with("import { FooComponent } from '../a/foo.component';\n"),
            "unexpected head: {text}"
        );
        assert!(text.contains("imports: [FooComponent]"), "unexpected body: {text}");
    }

    #[test]
    fn import_inserts_relative_import_and_dependency_entry() {
        let project = sample_project();
        ngimport()
            .current_dir(project.path())
            .args(["import", "app-foo", "b/bar.component.ts"])
            .assert()
            .success()
            .stdout(predicate::str::contains("imported FooComponent"));
        assert_bar_rewritten(project.path());
    }

    #[test]
    fn repeated_import_does_not_duplicate() {
        let project = sample_project();
        for _ in 0..2 {
            ngimport()
                .current_dir(project.path())
                .args(["import", "app-foo", "b/bar.component.ts"])
                .assert()
                .success();
        }
        let text =
            fs::read_to_string(project.path().join("b/bar.component.ts")).expect("read bar");
        assert_eq!(text.matches("import { FooComponent }").count(), 1);
        assert_eq!(text.matches("FooComponent,").count() + text.matches("[FooComponent]").count(), 1);
    }

    #[test]
    fn import_without_target_reports_no_active_file() {
        let project = sample_project();
        ngimport()
            .current_dir(project.path())
            .args(["import", "app-foo"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("no active file"));
    }

    #[test]
    fn import_of_unknown_selector_reports_and_changes_nothing() {
        let project = sample_project();
        let before =
            fs::read_to_string(project.path().join("b/bar.component.ts")).expect("read bar");
        ngimport()
            .current_dir(project.path())
            .args(["import", "app-ghost", "b/bar.component.ts"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("app-ghost"));
        let after =
            fs::read_to_string(project.path().join("b/bar.component.ts")).expect("read bar");
        assert_eq!(before, after);
    }

    #[test]
    fn prompt_import_reads_the_selector_from_stdin() {
        let project = sample_project();
        ngimport()
            .current_dir(project.path())
            .args(["prompt-import", "b/bar.component.ts"])
            .write_stdin("app-foo\n")
            .assert()
            .success();
        assert_bar_rewritten(project.path());
    }
}

mod ignore_rules {
    use super::*;

    #[test]
    fn ignored_components_never_reach_the_index() {
        let project = sample_project();
        fs::write(project.path().join(".gitignore"), "b/*\n").expect("write gitignore");

        ngimport()
            .current_dir(project.path())
            .arg("reindex")
            .assert()
            .success()
            .stdout(predicate::str::contains("indexed 1 component(s)"));

        ngimport()
            .current_dir(project.path())
            .args(["lookup", "app-bar"])
            .assert()
            .failure();
    }
}
