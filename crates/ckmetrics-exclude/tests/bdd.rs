use ckmetrics_exclude::{has_extension, is_excluded, is_test_path};

#[test]
fn given_default_cache_dir_when_matched_then_file_is_excluded() {
    let patterns = vec!["__pycache__".to_string(), ".venv".to_string()];
    assert!(is_excluded("app/__pycache__/models.cpython-312.py", &patterns));
    assert!(is_excluded(".venv/lib/site.py", &patterns));
}

#[test]
fn given_source_module_when_matched_then_file_is_kept() {
    let patterns = vec!["__pycache__".to_string()];
    assert!(!is_excluded("app/models.py", &patterns));
    assert!(!is_test_path("app/models.py"));
}

#[test]
fn given_pytest_layout_when_checked_then_every_test_file_is_recognized() {
    for path in [
        "tests/test_models.py",
        "app/test_views.py",
        "app/views_test.py",
        "conftest.py",
        "app/tests/factories.py",
    ] {
        assert!(is_test_path(path), "{path} should be a test path");
    }
}

#[test]
fn given_extension_list_when_checked_then_only_listed_suffixes_match() {
    let exts = vec![".py".to_string(), ".pyi".to_string()];
    assert!(has_extension("stubs/app.pyi", &exts));
    assert!(!has_extension("app.facts.json", &exts));
}
