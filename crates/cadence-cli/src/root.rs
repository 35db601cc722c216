use std::path::{Path, PathBuf};

/// Resolve the cadence workspace root: the `--root` flag / `CADENCE_ROOT`
/// env var if given, else the nearest ancestor holding a `.cadence/`
/// directory, else the nearest ancestor holding `.git/`, else cwd.
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    for marker in [".cadence", ".git"] {
        if let Some(found) = nearest_ancestor_with(&cwd, marker) {
            return found;
        }
    }
    cwd
}

fn nearest_ancestor_with(start: &Path, marker: &str) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join(marker).is_dir() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve_root(Some(dir.path())), dir.path());
    }

    #[test]
    fn marker_is_found_in_ancestors() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".cadence")).unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            nearest_ancestor_with(&nested, ".cadence"),
            Some(dir.path().to_path_buf())
        );
        assert_eq!(nearest_ancestor_with(&nested, ".nope"), None);
    }
}
