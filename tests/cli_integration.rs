//! CLI integration tests for doctoc
//!
//! These tests drive the binary end to end: scanning a docs tree, writing the
//! TOC into a README, and recovering from hand-edited markers.

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get a command instance for the doctoc binary
fn doctoc_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("doctoc"))
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Create a project with a small docs tree
fn setup_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "docs/02_usage.md", "# Usage\n");
    write(dir.path(), "docs/01_install.md", "---\ntitle: Installation\n---\nbody\n");
    write(dir.path(), "docs/guide/advanced.md", "# Advanced Topics\n");
    dir
}

fn readme(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("README.md")).unwrap()
}

// =============================================================================
// Generation
// =============================================================================

#[test]
fn test_generate_appends_section_to_new_readme() {
    let dir = setup_project();

    doctoc_cmd()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Appended table of contents"));

    assert_eq!(
        readme(&dir),
        "## Table of Contents\n\
         <!--toc-->\n\
         - [Installation](docs/01_install.md)\n\
         - [Usage](docs/02_usage.md)\n\
         - guide\n  \
           - [Advanced Topics](docs/guide/advanced.md)\n\
         <!--tocEnd:offset=4-->\n"
    );
}

#[test]
fn test_generate_replaces_existing_region() {
    let dir = setup_project();
    write(
        dir.path(),
        "README.md",
        "# Project\n\n<!-- toc -->\n- stale\n<!--tocEnd:offset=1-->\n\nFooter\n",
    );

    doctoc_cmd()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated table of contents"));

    let content = readme(&dir);
    assert!(content
        .starts_with("# Project\n\n<!-- toc -->\n- [Installation](docs/01_install.md)\n"));
    assert!(content.ends_with("<!--tocEnd:offset=4-->\n\nFooter\n"));
    assert!(!content.contains("- stale"));
}

#[test]
fn test_generate_is_idempotent() {
    let dir = setup_project();

    doctoc_cmd().current_dir(dir.path()).arg("generate").assert().success();
    let first = readme(&dir);

    doctoc_cmd()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("already up to date"));

    assert_eq!(readme(&dir), first);
}

#[test]
fn test_generate_respects_depth() {
    let dir = setup_project();

    doctoc_cmd()
        .current_dir(dir.path())
        .args(["generate", "-d", "1"])
        .assert()
        .success();

    assert!(!readme(&dir).contains("Advanced Topics"));
}

#[test]
fn test_generate_rejects_zero_depth() {
    let dir = setup_project();

    doctoc_cmd()
        .current_dir(dir.path())
        .args(["generate", "-d", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_depth must be at least 1"));

    assert!(!dir.path().join("README.md").exists());
}

#[test]
fn test_generate_with_explicit_dir_and_out() {
    let dir = setup_project();
    write(dir.path(), "docs/guide/README.md", "<!--toc-->\n");

    doctoc_cmd()
        .current_dir(dir.path())
        .args(["generate", "docs/guide", "-o", "docs/guide/README.md"])
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("docs/guide/README.md")).unwrap();
    assert_eq!(
        content,
        "<!--toc-->\n- [Advanced Topics](advanced.md)\n<!--tocEnd:offset=1-->\n"
    );
}

#[test]
fn test_generate_uses_config_file() {
    let dir = setup_project();
    write(
        dir.path(),
        "toc.toml",
        "out_file = \"INDEX.md\"\nheading = \"## Docs\"\nignore = [\"**/guide/**\"]\n",
    );

    doctoc_cmd().current_dir(dir.path()).arg("generate").assert().success();

    let content = fs::read_to_string(dir.path().join("INDEX.md")).unwrap();
    assert!(content.starts_with("## Docs\n<!--toc-->\n"));
    assert!(!content.contains("guide"));
    assert!(!dir.path().join("README.md").exists());
}

#[test]
fn test_generate_fails_without_docs() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("docs")).unwrap();

    doctoc_cmd()
        .current_dir(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Markdown files found"));
}

#[test]
fn test_generate_dry_run_leaves_file_alone() {
    let dir = setup_project();
    write(dir.path(), "README.md", "<!--toc-->\n");

    doctoc_cmd()
        .current_dir(dir.path())
        .args(["generate", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[Usage](docs/02_usage.md)"))
        .stdout(predicate::str::contains("Dry run"));

    assert_eq!(readme(&dir), "<!--toc-->\n");
}

// =============================================================================
// Cleanup confirmation
// =============================================================================

const MOVED_README: &str = "- old\n<!--tocEnd:offset=1-->\n\n# Project\n<!--toc-->\n";

#[test]
fn test_cleanup_declined_keeps_file() {
    let dir = setup_project();
    write(dir.path(), "README.md", MOVED_README);

    doctoc_cmd()
        .current_dir(dir.path())
        .arg("generate")
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 1-2: orphan end tag"))
        .stderr(predicate::str::contains("Cleanup declined"));

    assert_eq!(readme(&dir), MOVED_README);
}

#[test]
fn test_cleanup_confirmed_interactively() {
    let dir = setup_project();
    write(dir.path(), "README.md", MOVED_README);

    doctoc_cmd()
        .current_dir(dir.path())
        .arg("generate")
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed lines 1-2 (orphan end tag)"));

    let content = readme(&dir);
    assert!(content.starts_with("\n# Project\n<!--toc-->\n"));
    assert!(!content.contains("- old"));
    assert_eq!(content.matches("tocEnd").count(), 1);
}

#[test]
fn test_cleanup_with_yes_flag() {
    let dir = setup_project();
    write(dir.path(), "README.md", MOVED_README);

    doctoc_cmd()
        .current_dir(dir.path())
        .args(["generate", "--yes"])
        .assert()
        .success();

    assert!(!readme(&dir).contains("- old"));
}

// =============================================================================
// Preview, init, JSON
// =============================================================================

#[test]
fn test_preview_reports_regions() {
    let dir = setup_project();
    write(dir.path(), "README.md", MOVED_README);

    doctoc_cmd()
        .current_dir(dir.path())
        .arg("preview")
        .assert()
        .success()
        .stdout(predicate::str::contains("line 1-2: orphan end tag"));

    assert_eq!(readme(&dir), MOVED_README);
}

#[test]
fn test_preview_clean_document() {
    let dir = setup_project();
    write(dir.path(), "README.md", "<!--toc-->\n");

    doctoc_cmd()
        .current_dir(dir.path())
        .arg("preview")
        .assert()
        .success()
        .stdout(predicate::str::contains("No stale TOC regions"));
}

#[test]
fn test_generate_json_report() {
    let dir = setup_project();

    let output = doctoc_cmd()
        .current_dir(dir.path())
        .args(["generate", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["outcome"], "appended");
    assert_eq!(json["move_detected"], false);
}

#[test]
fn test_preview_json() {
    let dir = setup_project();
    write(dir.path(), "README.md", MOVED_README);

    let output = doctoc_cmd()
        .current_dir(dir.path())
        .args(["preview", "-f", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(json["needs_cleanup"], true);
    assert_eq!(json["regions"][0]["kind"], "orphan-end");
    assert_eq!(json["regions"][0]["start_line"], 0);
}

#[test]
fn test_init_writes_config_once() {
    let dir = TempDir::new().unwrap();

    doctoc_cmd()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created toc.toml"));

    assert!(dir.path().join("toc.toml").is_file());

    doctoc_cmd()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
