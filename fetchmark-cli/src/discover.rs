//! Repository Root Discovery
//!
//! Scans a directory tree (bounded depth) for directories containing a
//! `.git` entry. Nested repositories are included; hidden directories are
//! not descended into. Unreadable directories are skipped, not fatal.

use fetchmark_core::Target;
use std::path::Path;

/// Find repository roots under `base`, at most `max_depth` levels deep
/// (the base itself is depth 0). Results are sorted by path.
pub fn discover_roots(base: &Path, max_depth: usize) -> anyhow::Result<Vec<Target>> {
    if !base.is_dir() {
        anyhow::bail!("not a directory: {}", base.display());
    }

    let mut roots = Vec::new();
    walk(base, 0, max_depth, &mut roots);
    roots.sort();
    Ok(roots)
}

fn walk(dir: &Path, depth: usize, max_depth: usize, roots: &mut Vec<Target>) {
    if dir.join(".git").exists() {
        roots.push(Target::new(dir));
    }

    if depth >= max_depth {
        return;
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        // Skip hidden directories, including .git itself.
        if path
            .file_name()
            .map(|n| n.to_string_lossy().starts_with('.'))
            .unwrap_or(true)
        {
            continue;
        }
        walk(&path, depth + 1, max_depth, roots);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn mkrepo(base: &Path, rel: &str) {
        let dir = base.join(rel);
        fs::create_dir_all(dir.join(".git")).unwrap();
    }

    #[test]
    fn test_finds_nested_repositories() {
        let tmp = tempfile::tempdir().unwrap();
        mkrepo(tmp.path(), "");
        mkrepo(tmp.path(), "community");
        mkrepo(tmp.path(), "community/android");
        fs::create_dir_all(tmp.path().join("plain")).unwrap();

        let roots = discover_roots(tmp.path(), 6).unwrap();
        let names: Vec<String> = roots.iter().map(|t| t.name()).collect();

        assert_eq!(roots.len(), 3);
        assert!(names.contains(&"community".to_string()));
        assert!(names.contains(&"android".to_string()));
    }

    #[test]
    fn test_depth_bound() {
        let tmp = tempfile::tempdir().unwrap();
        mkrepo(tmp.path(), "a/b/c/deep");

        let shallow = discover_roots(tmp.path(), 2).unwrap();
        assert!(shallow.is_empty());

        let full = discover_roots(tmp.path(), 4).unwrap();
        assert_eq!(full.len(), 1);
        assert_eq!(full[0].name(), "deep");
    }

    #[test]
    fn test_hidden_directories_not_descended() {
        let tmp = tempfile::tempdir().unwrap();
        mkrepo(tmp.path(), ".cache/repo");

        let roots = discover_roots(tmp.path(), 6).unwrap();
        assert!(roots.is_empty());
    }

    #[test]
    fn test_results_are_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        mkrepo(tmp.path(), "zeta");
        mkrepo(tmp.path(), "alpha");
        mkrepo(tmp.path(), "mid");

        let roots = discover_roots(tmp.path(), 2).unwrap();
        let names: Vec<String> = roots.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_missing_base_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        assert!(discover_roots(&missing, 6).is_err());
    }
}
