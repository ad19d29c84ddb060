//! Object-store key construction
//!
//! Keys always use forward slashes, whatever the host OS uses for paths, so
//! the same logical path produces the same key on every platform.

use std::path::Path;

/// Join an optional prefix and a logical path into an object-store key.
///
/// An empty prefix returns the path's normalized string form unchanged.
/// No `..` normalization is performed.
pub fn join_key(prefix: &str, path: &Path) -> String {
    let logical = normalize(&path.to_string_lossy());
    if prefix.is_empty() {
        return logical;
    }
    let prefix = normalize(prefix);
    format!("{}/{}", prefix.trim_end_matches('/'), logical)
}

/// Normalize a path string to forward slashes
fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_no_prefix_returns_path_unchanged() {
        let path = PathBuf::from("data/table.csv");
        assert_eq!(join_key("", &path), "data/table.csv");
    }

    #[test]
    fn test_prefix_is_prepended_with_separator() {
        let path = PathBuf::from("data/table.csv");
        assert_eq!(join_key("project", &path), "project/data/table.csv");
    }

    #[test]
    fn test_trailing_slash_on_prefix_is_not_doubled() {
        let path = PathBuf::from("table.csv");
        assert_eq!(join_key("project/", &path), "project/table.csv");
    }

    #[test]
    fn test_backslashes_are_normalized() {
        assert_eq!(join_key("project", Path::new(r"data\table.csv")), "project/data/table.csv");
    }

    #[test]
    fn test_deterministic() {
        let path = PathBuf::from("data/table.json");
        assert_eq!(join_key("p", &path), join_key("p", &path));
    }
}
