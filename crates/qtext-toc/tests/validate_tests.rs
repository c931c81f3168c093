//! Integration tests running the validator over temporary notebook trees.

use std::fs;
use std::path::Path;

use qtext_toc::{TocError, Validator};
use tempfile::TempDir;

const TOC: &str = r#"
- title: Basics
  type: course
  overviewInfo:
    description:
      short: A short course
      long: A longer description of the course
    thumbnailUrl: /images/thumb.png
    prerequisites:
      - title: Linear algebra
        link: https://example.org/la
    externalRecommendedReadings:
      - title: A book
        author: Someone
  sections:
    - url: /intro/hello
      previewImgUrl: /images/hello.png
    - url: /intro/gates
      previewImgUrl: /images/gates.png
"#;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "{}").unwrap();
}

/// A tree where every reference resolves.
fn valid_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("toc.yaml"), TOC).unwrap();
    for rel in [
        "images/thumb.png",
        "images/hello.png",
        "images/gates.png",
        "intro/hello.ipynb",
        "intro/gates.ipynb",
    ] {
        touch(root, rel);
    }
    dir
}

#[test]
fn test_valid_tree_passes() {
    let dir = valid_tree();
    let report = Validator::new(dir.path()).run().unwrap();
    assert_eq!(report.courses, 1);
    assert_eq!(report.pages, 2);
    assert_eq!(report.notebooks, 2);
    assert_eq!(report.ignored, 0);
}

#[test]
fn test_missing_notebook_names_path() {
    let dir = valid_tree();
    fs::remove_file(dir.path().join("intro/gates.ipynb")).unwrap();

    let err = Validator::new(dir.path()).run().unwrap_err();
    match &err {
        TocError::MissingFile { path, .. } => assert!(path.ends_with("intro/gates.ipynb")),
        other => panic!("unexpected error: {other}"),
    }
    let message = err.to_string();
    assert!(message.starts_with("No file: "));
    assert!(message.contains("Please add the missing file, or remove the reference."));
}

#[test]
fn test_missing_thumbnail_checked_before_pages() {
    let dir = valid_tree();
    fs::remove_file(dir.path().join("images/thumb.png")).unwrap();
    fs::remove_file(dir.path().join("intro/hello.ipynb")).unwrap();

    let err = Validator::new(dir.path()).run().unwrap_err();
    assert!(matches!(&err, TocError::MissingFile { path, .. } if path.ends_with("images/thumb.png")));
}

#[test]
fn test_unreferenced_notebook_fails() {
    let dir = valid_tree();
    touch(dir.path(), "intro/extra.ipynb");

    let err = Validator::new(dir.path()).run().unwrap_err();
    assert!(matches!(err, TocError::UnreferencedNotebook { .. }));
    let message = err.to_string();
    assert!(message.contains("extra.ipynb"));
    assert!(message.contains("'extra.ipynb' -> '_extra.ipynb'"));

    fs::rename(
        dir.path().join("intro/extra.ipynb"),
        dir.path().join("intro/_extra.ipynb"),
    )
    .unwrap();
    let report = Validator::new(dir.path()).run().unwrap();
    assert_eq!(report.ignored, 1);
}

#[test]
fn test_draft_and_checkpoint_notebooks_ignored() {
    let dir = valid_tree();
    touch(dir.path(), "intro/_draft.ipynb");
    touch(dir.path(), "intro/.ipynb_checkpoints/hello-checkpoint.ipynb");

    let report = Validator::new(dir.path()).run().unwrap();
    assert_eq!(report.notebooks, 4);
    assert_eq!(report.ignored, 2);
}

#[test]
fn test_resource_with_unknown_key_fails() {
    let dir = valid_tree();
    let toc = TOC.replace("author: Someone", "author: Someone\n        year: 2019");
    fs::write(dir.path().join("toc.yaml"), toc).unwrap();

    let err = Validator::new(dir.path()).run().unwrap_err();
    match err {
        TocError::UnknownResourceKey { key, .. } => assert_eq!(key, "year"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_first_unknown_resource_key_in_document_order() {
    let dir = valid_tree();
    let toc = TOC.replace(
        "author: Someone",
        "zeta: 1\n        author: Someone\n        alpha: 2",
    );
    fs::write(dir.path().join("toc.yaml"), toc).unwrap();

    let err = Validator::new(dir.path()).run().unwrap_err();
    assert!(matches!(err, TocError::UnknownResourceKey { key, .. } if key == "zeta"));
}

#[test]
fn test_unknown_overview_key_fails() {
    let dir = valid_tree();
    let toc = TOC.replace(
        "thumbnailUrl: /images/thumb.png",
        "thumbnailUrl: /images/thumb.png\n    banner: none",
    );
    fs::write(dir.path().join("toc.yaml"), toc).unwrap();

    let err = Validator::new(dir.path()).run().unwrap_err();
    assert!(matches!(err, TocError::UnknownOverviewKey { key, .. } if key == "banner"));
}

#[test]
fn test_custom_toc_location() {
    let dir = valid_tree();
    let elsewhere = tempfile::tempdir().unwrap();
    let toc_path = elsewhere.path().join("contents.yaml");
    fs::rename(dir.path().join("toc.yaml"), &toc_path).unwrap();

    let validator = Validator::new(dir.path()).with_toc(&toc_path);
    assert_eq!(validator.toc_path(), toc_path.as_path());
    assert!(validator.run().is_ok());

    let err = Validator::new(dir.path()).run().unwrap_err();
    assert!(matches!(err, TocError::Io { .. }));
}

#[test]
fn test_bad_yaml_reported() {
    let dir = valid_tree();
    fs::write(dir.path().join("toc.yaml"), "- type: [unclosed").unwrap();
    let err = Validator::new(dir.path()).run().unwrap_err();
    assert!(matches!(err, TocError::Parse(_)));
}
