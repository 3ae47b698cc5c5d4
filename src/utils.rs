use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Expand tilde (~) in path
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Move a file, creating the target's parent directories.
///
/// Falls back to copy + remove when `rename` cannot cross filesystems.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    if fs::rename(from, to).is_ok() {
        return Ok(());
    }

    fs::copy(from, to)
        .with_context(|| format!("Failed to copy {} to {}", from.display(), to.display()))?;
    fs::remove_file(from).with_context(|| format!("Failed to remove {}", from.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(expand_tilde("/srv/walls"), PathBuf::from("/srv/walls"));
        assert_eq!(expand_tilde("walls/~x"), PathBuf::from("walls/~x"));
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/Pictures"), home.join("Pictures"));
        }
    }

    #[test]
    fn move_file_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("a.jpg");
        let to = tmp.path().join("saved/anime/a.jpg");
        fs::write(&from, b"img").unwrap();

        move_file(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read(&to).unwrap(), b"img");
    }
}
