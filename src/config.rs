use crate::background::Backend;
use crate::error::WallError;
use crate::utils::expand_tilde;
use crate::wallpaper::{Category, Purity};
use crate::webimport::{Sorting, DEFAULT_RATIOS};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Defaults for every command-line option.
///
/// Flags win over environment variables, which win over this file.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub wallhaven: WallhavenConfig,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub desktop: DesktopConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WallhavenConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub sorting: Sorting,
    #[serde(default = "default_ratios")]
    pub ratios: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LibraryConfig {
    /// Storage root holding `fresh/` and `saved/`
    #[serde(default)]
    pub destination: Option<PathBuf>,
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
    #[serde(default = "default_purity")]
    pub purity: Vec<Purity>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DesktopConfig {
    #[serde(default)]
    pub backend: Backend,
}

fn default_ratios() -> String {
    DEFAULT_RATIOS.to_string()
}

fn default_categories() -> Vec<Category> {
    Category::ALL.to_vec()
}

fn default_purity() -> Vec<Purity> {
    vec![Purity::Sfw]
}

impl Default for WallhavenConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            sorting: Sorting::default(),
            ratios: default_ratios(),
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            destination: None,
            categories: default_categories(),
            purity: default_purity(),
        }
    }
}

impl Config {
    /// Return the path to the configuration file.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("cc", "wallhaven", "havenwall")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Load the user's config, falling back to defaults when absent or corrupt.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        match toml::from_str::<Config>(&data) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config, using defaults"
                );
                Ok(Config::default())
            }
        }
    }

    /// Storage root: the flag/environment value, else the configured one.
    pub fn destination(&self, flag: Option<PathBuf>) -> Result<PathBuf, WallError> {
        flag.or_else(|| self.library.destination.clone())
            .map(|dir| match dir.to_str() {
                Some(s) => expand_tilde(s),
                None => dir,
            })
            .ok_or(WallError::Config)
    }

    /// Category filter: explicit flags, else the configured set.
    pub fn categories(&self, flags: Vec<Category>) -> Vec<Category> {
        if flags.is_empty() {
            self.library.categories.clone()
        } else {
            flags
        }
    }

    /// Purity filter: explicit flags, else the configured set.
    pub fn purity(&self, flags: Vec<Purity>) -> Vec<Purity> {
        if flags.is_empty() {
            self.library.purity.clone()
        } else {
            flags
        }
    }
}
