//! Deterministic path normalization and exclude-pattern matching.

#![forbid(unsafe_code)]

use std::path::Path;

/// Normalize path separators to `/`.
///
/// # Examples
///
/// ```
/// use ckmetrics_exclude::normalize_slashes;
///
/// assert_eq!(normalize_slashes(r"pkg\models\user.py"), "pkg/models/user.py");
/// ```
#[must_use]
pub fn normalize_slashes(path: &str) -> String {
    if path.contains('\\') {
        path.replace('\\', "/")
    } else {
        path.to_string()
    }
}

/// Normalize a relative path for matching: `/` separators, one leading `./` stripped.
///
/// # Examples
///
/// ```
/// use ckmetrics_exclude::normalize_rel_path;
///
/// assert_eq!(normalize_rel_path("./pkg/app.py"), "pkg/app.py");
/// assert_eq!(normalize_rel_path(r".\pkg\app.py"), "pkg/app.py");
/// ```
#[must_use]
pub fn normalize_rel_path(path: &str) -> String {
    let normalized = normalize_slashes(path);
    match normalized.strip_prefix("./") {
        Some(stripped) => stripped.to_string(),
        None => normalized,
    }
}

/// Relative form of `path` under `root`, normalized. Paths outside `root` are
/// normalized as given.
#[must_use]
pub fn relative_to(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    normalize_rel_path(&rel.to_string_lossy())
}

/// Return `true` when `rel_path` matches any exclude pattern.
///
/// A pattern without `/` matches a whole path component (`venv` skips
/// `venv/lib/x.py` but not `venvs/x.py`). A pattern with `/` matches as a
/// path fragment.
///
/// # Examples
///
/// ```
/// use ckmetrics_exclude::is_excluded;
///
/// let patterns = vec!["__pycache__".to_string(), "gen/proto".to_string()];
/// assert!(is_excluded("pkg/__pycache__/mod.py", &patterns));
/// assert!(is_excluded("src/gen/proto/msg.py", &patterns));
/// assert!(!is_excluded("pkg/cache.py", &patterns));
/// ```
#[must_use]
pub fn is_excluded(rel_path: &str, patterns: &[String]) -> bool {
    let path = normalize_rel_path(rel_path);
    patterns.iter().any(|raw| {
        let pattern = normalize_rel_path(raw.trim());
        let pattern = pattern.trim_end_matches('/');
        if pattern.is_empty() {
            return false;
        }
        if pattern.contains('/') {
            path == pattern
                || path.starts_with(&format!("{pattern}/"))
                || path.contains(&format!("/{pattern}/"))
                || path.ends_with(&format!("/{pattern}"))
        } else {
            path.split('/').any(|component| component == pattern)
        }
    })
}

/// Return `true` for conventionally named test files and directories:
/// `test_*` and `*_test.*` files, `conftest.py`, anything under `test/` or `tests/`.
///
/// # Examples
///
/// ```
/// use ckmetrics_exclude::is_test_path;
///
/// assert!(is_test_path("tests/unit/helpers.py"));
/// assert!(is_test_path("pkg/test_models.py"));
/// assert!(is_test_path("pkg/models_test.py"));
/// assert!(is_test_path("conftest.py"));
/// assert!(!is_test_path("pkg/contest.py"));
/// ```
#[must_use]
pub fn is_test_path(rel_path: &str) -> bool {
    let lower = normalize_rel_path(rel_path).to_lowercase();
    let mut components: Vec<&str> = lower.split('/').collect();
    let name = components.pop().unwrap_or_default();
    if components.iter().any(|d| *d == "test" || *d == "tests") {
        return true;
    }
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    name == "conftest.py" || name.starts_with("test_") || stem.ends_with("_test")
}

/// Return `true` when the file name ends with one of `extensions`
/// (dot-prefixed, compared case-insensitively).
///
/// # Examples
///
/// ```
/// use ckmetrics_exclude::has_extension;
///
/// let exts = vec![".py".to_string()];
/// assert!(has_extension("pkg/App.PY", &exts));
/// assert!(!has_extension("pkg/app.pyc", &exts));
/// ```
#[must_use]
pub fn has_extension(rel_path: &str, extensions: &[String]) -> bool {
    let lower = rel_path.to_lowercase();
    extensions
        .iter()
        .any(|ext| !ext.is_empty() && lower.ends_with(&ext.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_patterns_do_not_match_prefixes() {
        let patterns = vec!["build".to_string()];
        assert!(is_excluded("build/lib/x.py", &patterns));
        assert!(is_excluded("pkg/build/x.py", &patterns));
        assert!(!is_excluded("pkg/builder.py", &patterns));
        assert!(!is_excluded("rebuild/x.py", &patterns));
    }

    #[test]
    fn slash_patterns_match_fragments() {
        let patterns = vec!["./vendor/third_party/".to_string()];
        assert!(is_excluded("vendor/third_party/lib.py", &patterns));
        assert!(is_excluded("app/vendor/third_party/lib.py", &patterns));
        assert!(!is_excluded("vendor/first_party/lib.py", &patterns));
    }

    #[test]
    fn empty_patterns_match_nothing() {
        let patterns = vec![String::new(), "  ".to_string()];
        assert!(!is_excluded("pkg/app.py", &patterns));
    }

    #[test]
    fn test_paths_are_detected_case_insensitively() {
        assert!(is_test_path("Tests/test_api.py"));
        assert!(is_test_path(r"pkg\tests\helpers.py"));
        assert!(is_test_path("pkg/TEST_models.py"));
        assert!(!is_test_path("pkg/latest.py"));
        assert!(!is_test_path("pkg/testing_utils.py"));
        assert!(!is_test_path("pkg/attest/report.py"));
    }

    #[test]
    fn relative_to_strips_root() {
        let root = Path::new("/repo");
        assert_eq!(relative_to(root, Path::new("/repo/pkg/app.py")), "pkg/app.py");
        assert_eq!(relative_to(root, Path::new("other/app.py")), "other/app.py");
    }
}
