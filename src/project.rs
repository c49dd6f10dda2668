//! Locating the project directory that owns an edited file.

use std::path::{Path, PathBuf};

/// Walk up from the file's directory and return the first directory that
/// contains any of `markers` (relative paths, e.g. `vendor/bin/phpstan`).
///
/// The filesystem root itself is never inspected.
pub fn find_ancestor_with<P: AsRef<Path>>(file: P, markers: &[&str]) -> Option<PathBuf> {
    let mut dir = file.as_ref().parent()?;

    loop {
        // `parent()` of a root is `None`; of a bare relative name it is "".
        let parent = dir.parent()?;
        if !dir.as_os_str().is_empty() && markers.iter().any(|m| dir.join(m).exists()) {
            return Some(dir.to_path_buf());
        }
        dir = parent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_finds_nearest_marker() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let nested = root.join("packages/web/src");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join("tsconfig.json"), "{}").unwrap();
        std::fs::write(root.join("packages/web/tsconfig.json"), "{}").unwrap();

        let found = find_ancestor_with(nested.join("app.ts"), &["tsconfig.json"]);
        assert_eq!(found, Some(root.join("packages/web")));
    }

    #[test]
    fn test_nested_marker_path() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::fs::create_dir_all(root.join("vendor/bin")).unwrap();
        std::fs::create_dir_all(root.join("app/Models")).unwrap();
        std::fs::write(root.join("vendor/bin/phpstan"), "").unwrap();

        let found = find_ancestor_with(root.join("app/Models/User.php"), &["vendor/bin/phpstan"]);
        assert_eq!(found, Some(root.to_path_buf()));
    }

    #[test]
    fn test_any_of_several_markers() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("mypy.ini"), "").unwrap();
        let found = find_ancestor_with(
            temp.path().join("pkg.py"),
            &["pyproject.toml", "mypy.ini"],
        );
        assert_eq!(found, Some(temp.path().to_path_buf()));
    }

    #[test]
    fn test_no_marker() {
        let temp = TempDir::new().unwrap();
        let found = find_ancestor_with(
            temp.path().join("a/b/c.ts"),
            &["ecc-hooks-marker-that-does-not-exist"],
        );
        assert_eq!(found, None);
    }
}
