//! BDD-style scenario tests for ckmetrics-walk.

use std::fs;
use std::path::PathBuf;

use ckmetrics_walk::{WalkOptions, list_files};
use tempfile::TempDir;

// ============================================================================
// Helpers
// ============================================================================

fn names(files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|p| p.to_string_lossy().to_string())
        .collect()
}

fn project() -> TempDir {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let root = tmp.path();
    fs::create_dir_all(root.join("app/__pycache__")).unwrap();
    fs::create_dir_all(root.join("tests")).unwrap();
    fs::write(root.join("app/models.py"), "class User: pass\n").unwrap();
    fs::write(root.join("app/__pycache__/models.cpython-312.pyc"), "").unwrap();
    fs::write(root.join("app/test_models.py"), "").unwrap();
    fs::write(root.join("tests/conftest.py"), "").unwrap();
    fs::write(root.join("conftest.py"), "").unwrap();
    tmp
}

// ============================================================================
// Scenario: default exclusions
// ============================================================================

#[test]
fn given_python_project_when_listed_then_caches_and_tests_are_skipped() {
    // Given
    let tmp = project();
    let opts = WalkOptions {
        exclude_patterns: vec!["__pycache__".into()],
        ..WalkOptions::default()
    };

    // When
    let files = list_files(tmp.path(), &opts).unwrap();

    // Then
    assert_eq!(names(&files), ["app/models.py"]);
}

#[test]
fn given_include_tests_when_listed_then_test_files_are_kept() {
    // Given
    let tmp = project();
    let opts = WalkOptions {
        exclude_patterns: vec!["__pycache__".into()],
        include_tests: true,
        ..WalkOptions::default()
    };

    // When
    let files = list_files(tmp.path(), &opts).unwrap();

    // Then
    assert_eq!(
        names(&files),
        [
            "app/models.py",
            "app/test_models.py",
            "conftest.py",
            "tests/conftest.py",
        ]
    );
}

// ============================================================================
// Scenario: .gitignore support
// ============================================================================

#[test]
fn given_gitignore_when_listed_then_ignored_files_are_skipped() {
    // Given
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".gitignore"), "generated/\n").unwrap();
    fs::create_dir_all(tmp.path().join("generated")).unwrap();
    fs::write(tmp.path().join("generated/schema.py"), "").unwrap();
    fs::write(tmp.path().join("main.py"), "").unwrap();

    // When
    let files = list_files(tmp.path(), &WalkOptions::default()).unwrap();

    // Then
    assert!(names(&files).contains(&"main.py".to_string()));
    assert!(!names(&files).iter().any(|n| n.starts_with("generated/")));
}

#[test]
fn given_no_ignore_when_listed_then_gitignored_files_are_kept() {
    // Given
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".gitignore"), "generated/\n").unwrap();
    fs::create_dir_all(tmp.path().join("generated")).unwrap();
    fs::write(tmp.path().join("generated/schema.py"), "").unwrap();

    // When
    let opts = WalkOptions {
        no_ignore: true,
        ..WalkOptions::default()
    };
    let files = list_files(tmp.path(), &opts).unwrap();

    // Then
    assert!(names(&files).contains(&"generated/schema.py".to_string()));
}
