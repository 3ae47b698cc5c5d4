//! Desktop background adapters.
//!
//! The desktop owns the "current background" pointer; we only read and
//! write it through one of these backends and never keep a copy.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

use crate::error::WallError;
use crate::wallpaper::Wallpaper;

mod gnome;
mod swww;

pub use gnome::GnomeBackground;
pub use swww::SwwwBackground;

const FILE_SCHEME: &str = "file://";

/// Read/write access to the desktop's current background.
pub trait Background {
    /// Current background as a `file://` URI.
    fn current_uri(&self) -> Result<String>;

    /// Point the desktop at `path`.
    fn set_current(&self, path: &Path) -> Result<()>;
}

/// Which desktop integration to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// GNOME via gsettings (default)
    #[default]
    Gnome,
    /// swww on wlroots compositors
    Swww,
}

impl Backend {
    pub fn adapter(self) -> Box<dyn Background> {
        match self {
            Backend::Gnome => Box::new(GnomeBackground),
            Backend::Swww => Box::new(SwwwBackground::default()),
        }
    }
}

pub fn file_uri(path: &Path) -> Result<String> {
    let s = path
        .to_str()
        .ok_or_else(|| anyhow!("path is not valid UTF-8: {}", path.display()))?;
    Ok(format!("{FILE_SCHEME}{s}"))
}

/// Path portion of a `file://` URI.
pub fn uri_to_path(uri: &str) -> Result<PathBuf, WallError> {
    uri.strip_prefix(FILE_SCHEME)
        .filter(|rest| !rest.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| WallError::format(uri, "background is not a local file URI"))
}

/// Decode the wallpaper the desktop currently shows.
pub fn current_wallpaper(background: &dyn Background) -> Result<Wallpaper> {
    let uri = background
        .current_uri()
        .context("Failed to read current background")?;
    let path = uri_to_path(&uri)?;
    Ok(Wallpaper::from_path(&path)?)
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryBackground;
    use super::*;
    use crate::wallpaper::{Category, Kind, Purity};

    #[test]
    fn uri_round_trip() {
        let path = Path::new("/pics/fresh/anime/wallhaven-abc123-sfw.jpg");
        let uri = file_uri(path).unwrap();
        assert_eq!(uri, "file:///pics/fresh/anime/wallhaven-abc123-sfw.jpg");
        assert_eq!(uri_to_path(&uri).unwrap(), path);
    }

    #[test]
    fn non_file_uri_is_format_error() {
        assert!(matches!(
            uri_to_path("https://wallhaven.cc/w/abc"),
            Err(WallError::Format { .. })
        ));
        assert!(matches!(uri_to_path("file://"), Err(WallError::Format { .. })));
    }

    #[test]
    fn current_wallpaper_decodes_pointer() {
        let bg = MemoryBackground::showing(Path::new("/pics/saved/people/wallhaven-zz9-sketchy.png"));
        let wp = current_wallpaper(&bg).unwrap();
        assert_eq!(wp.id, "zz9");
        assert_eq!(wp.category, Category::People);
        assert_eq!(wp.purity, Purity::Sketchy);
        assert_eq!(wp.kind, Kind::Saved);
        assert_eq!(wp.root, PathBuf::from("/pics"));
    }

    #[test]
    fn foreign_background_is_reported() {
        let bg = MemoryBackground::showing(Path::new("/usr/share/backgrounds/default.png"));
        let err = current_wallpaper(&bg).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WallError>(),
            Some(WallError::Format { .. })
        ));
    }
}
