use super::{Category, Kind, Purity, Wallpaper};
use crate::error::WallError;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Fixed first token of every stored file name
const FILE_PREFIX: &str = "wallhaven";

/// Base of the public wallpaper pages
const WEB_BASE: &str = "https://wallhaven.cc/w";

impl Wallpaper {
    /// Fresh wallpaper as described by the search API.
    pub fn new(
        id: impl Into<String>,
        url: impl Into<String>,
        category: Category,
        purity: Purity,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            category,
            purity,
            root: root.into(),
            kind: Kind::Fresh,
        }
    }

    /// Storage location: `<root>/<kind>/<category>/wallhaven-<id>-<purity><ext>`.
    pub fn path(&self) -> PathBuf {
        let name = format!(
            "{FILE_PREFIX}-{}-{}{}",
            self.id,
            self.purity,
            url_suffix(&self.url)
        );
        self.root
            .join(self.kind.as_str())
            .join(self.category.as_str())
            .join(name)
    }

    /// Where this wallpaper lives once kept.
    pub fn saved_path(&self) -> PathBuf {
        Wallpaper {
            kind: Kind::Saved,
            ..self.clone()
        }
        .path()
    }

    /// Public page of this wallpaper on the service.
    pub fn web_url(&self) -> String {
        format!("{WEB_BASE}/{}", self.id)
    }

    /// Rebuild a record from a stored file path.
    ///
    /// The category comes from the parent directory, the kind from the
    /// grandparent and the storage root is whatever lies above that.
    pub fn from_path(path: &Path) -> Result<Self, WallError> {
        let malformed = |reason: &str| WallError::format(path.display().to_string(), reason);

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| malformed("missing file name"))?;

        let category_dir = path
            .parent()
            .ok_or_else(|| malformed("missing category directory"))?;
        let category: Category = parse_dir_name(category_dir)
            .ok_or_else(|| malformed("parent directory is not a category"))?;

        let kind_dir = category_dir
            .parent()
            .ok_or_else(|| malformed("missing kind directory"))?;
        let kind: Kind =
            parse_dir_name(kind_dir).ok_or_else(|| malformed("expected fresh/ or saved/"))?;

        let root = kind_dir
            .parent()
            .ok_or_else(|| malformed("missing storage root"))?
            .to_path_buf();

        let tokens: Vec<&str> = stem.split('-').collect();
        let [prefix, id, purity] = tokens.as_slice() else {
            return Err(malformed("expected wallhaven-<id>-<purity>"));
        };
        if *prefix != FILE_PREFIX {
            return Err(malformed("missing wallhaven- prefix"));
        }
        if id.is_empty() {
            return Err(malformed("empty wallpaper id"));
        }
        let purity: Purity = purity
            .parse()
            .map_err(|_| malformed("unknown purity in file name"))?;

        Ok(Self {
            id: (*id).to_string(),
            url: path.to_string_lossy().into_owned(),
            category,
            purity,
            root,
            kind,
        })
    }
}

fn parse_dir_name<T: FromStr>(dir: &Path) -> Option<T> {
    dir.file_name()?.to_str()?.parse().ok()
}

/// Extension of the last URL path segment, dot included, query ignored.
fn url_suffix(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => &name[idx..],
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Wallpaper {
        Wallpaper::new(
            "abc123",
            "https://w.wallhaven.cc/full/ab/wallhaven-abc123.jpg",
            Category::Anime,
            Purity::Sfw,
            "/pics",
        )
    }

    #[test]
    fn encodes_documented_layout() {
        assert_eq!(
            sample().path(),
            PathBuf::from("/pics/fresh/anime/wallhaven-abc123-sfw.jpg")
        );
    }

    #[test]
    fn decodes_documented_layout() {
        let wp = Wallpaper::from_path(Path::new("/pics/fresh/anime/wallhaven-abc123-sfw.jpg"))
            .unwrap();
        assert_eq!(wp.id, "abc123");
        assert_eq!(wp.purity, Purity::Sfw);
        assert_eq!(wp.category, Category::Anime);
        assert_eq!(wp.kind, Kind::Fresh);
        assert_eq!(wp.root, PathBuf::from("/pics"));
    }

    #[test]
    fn round_trips_every_combination() {
        for category in Category::ALL {
            for purity in Purity::ALL {
                for kind in [Kind::Fresh, Kind::Saved] {
                    let original = Wallpaper {
                        kind,
                        ..Wallpaper::new(
                            "x9y8z7",
                            "https://w.wallhaven.cc/full/x9/wallhaven-x9y8z7.png",
                            category,
                            purity,
                            "/srv/walls",
                        )
                    };
                    let decoded = Wallpaper::from_path(&original.path()).unwrap();
                    assert_eq!(
                        decoded,
                        Wallpaper {
                            url: original.path().to_string_lossy().into_owned(),
                            ..original.clone()
                        }
                    );
                    assert_eq!(decoded.path(), original.path());
                }
            }
        }
    }

    #[test]
    fn saved_path_moves_into_saved_tree() {
        assert_eq!(
            sample().saved_path(),
            PathBuf::from("/pics/saved/anime/wallhaven-abc123-sfw.jpg")
        );
    }

    #[test]
    fn web_url_uses_id() {
        assert_eq!(sample().web_url(), "https://wallhaven.cc/w/abc123");
    }

    #[test]
    fn url_suffix_ignores_query_and_dotless_names() {
        assert_eq!(url_suffix("https://host/a/b.png?x=1"), ".png");
        assert_eq!(url_suffix("https://host/a.b/c"), "");
        assert_eq!(url_suffix("/pics/fresh/anime/wallhaven-a-sfw.webp"), ".webp");
    }

    #[test]
    fn rejects_wrong_token_count() {
        let err = Wallpaper::from_path(Path::new("/pics/fresh/anime/wallhaven-a-b-sfw.jpg"));
        assert!(matches!(err, Err(WallError::Format { .. })));
        let err = Wallpaper::from_path(Path::new("/pics/fresh/anime/wallhaven-abc.jpg"));
        assert!(matches!(err, Err(WallError::Format { .. })));
    }

    #[test]
    fn rejects_foreign_layouts() {
        for path in [
            "/pics/fresh/landscape/wallhaven-abc-sfw.jpg",
            "/pics/trash/anime/wallhaven-abc-sfw.jpg",
            "/pics/fresh/anime/unsplash-abc-sfw.jpg",
            "/pics/fresh/anime/wallhaven-abc-safe.jpg",
            "anime/wallhaven-abc-sfw.jpg",
        ] {
            assert!(
                matches!(
                    Wallpaper::from_path(Path::new(path)),
                    Err(WallError::Format { .. })
                ),
                "{path} should not decode"
            );
        }
    }
}
