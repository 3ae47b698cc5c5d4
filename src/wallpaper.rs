use crate::error::WallError;
use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

mod model;
pub mod selector;

/// Subject classification used by Wallhaven
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Anime,
    People,
}

impl Category {
    /// All categories, in the order the API bitmask expects.
    pub const ALL: [Category; 3] = [Category::General, Category::Anime, Category::People];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Anime => "anime",
            Category::People => "people",
        }
    }
}

/// Content rating
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Purity {
    Sfw,
    Sketchy,
    Nsfw,
}

impl Purity {
    /// All purity levels, in the order the API bitmask expects.
    pub const ALL: [Purity; 3] = [Purity::Sfw, Purity::Sketchy, Purity::Nsfw];

    pub fn as_str(&self) -> &'static str {
        match self {
            Purity::Sfw => "sfw",
            Purity::Sketchy => "sketchy",
            Purity::Nsfw => "nsfw",
        }
    }
}

/// Whether a stored wallpaper came straight from the service or was kept by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    /// Downloaded, not yet kept (default)
    #[default]
    Fresh,
    /// Explicitly kept, never deleted
    Saved,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Fresh => "fresh",
            Kind::Saved => "saved",
        }
    }
}

macro_rules! impl_name_conversions {
    ($ty:ty, $what:literal, [$($variant:expr),+]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = WallError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                [$($variant),+]
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| WallError::format(s, concat!("unknown ", $what)))
            }
        }
    };
}

impl_name_conversions!(Category, "category", [Category::General, Category::Anime, Category::People]);
impl_name_conversions!(Purity, "purity", [Purity::Sfw, Purity::Sketchy, Purity::Nsfw]);
impl_name_conversions!(Kind, "kind", [Kind::Fresh, Kind::Saved]);

/// A wallpaper known either from an API response or from its file on disk.
///
/// The on-disk location is derived entirely from these fields, see
/// [`Wallpaper::path`] and [`Wallpaper::from_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallpaper {
    pub id: String,
    /// Remote image URL, or the local path for records decoded from disk
    pub url: String,
    pub category: Category,
    pub purity: Purity,
    /// Storage root holding the `fresh/` and `saved/` trees
    pub root: PathBuf,
    pub kind: Kind,
}
