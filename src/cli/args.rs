use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::background::Backend;
use crate::wallpaper::{Category, Purity};
use crate::webimport::Sorting;

#[derive(Parser)]
#[command(name = "havenwall")]
#[command(version)]
#[command(about = "Fetch Wallhaven wallpapers and rotate your desktop background")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Desktop integration used to read and set the background
    #[arg(long, global = true, value_enum)]
    pub(crate) backend: Option<Backend>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,
}

/// Category and purity filters (repeatable)
#[derive(Args, Debug, Clone)]
pub(crate) struct FilterArgs {
    /// Category to include [default: all]
    #[arg(short = 'c', long = "category", value_enum)]
    pub(crate) categories: Vec<Category>,

    /// Purity level to include [default: sfw]
    #[arg(short = 'p', long = "purity", value_enum)]
    pub(crate) purity: Vec<Purity>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct DestinationArg {
    /// Storage root for downloaded wallpapers
    #[arg(long, env = "WALLHAVEN_DESTINATION")]
    pub(crate) destination: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Query the API and download the results
    GetWallpapers {
        /// Wallhaven API key (needed for nsfw results)
        #[arg(long, env = "WALLHAVEN_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Result ordering [default: random]
        #[arg(short, long, value_enum)]
        sorting: Option<Sorting>,

        /// Comma-separated aspect ratios [default: 16x9,16x10]
        #[arg(long)]
        ratios: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        destination: DestinationArg,
    },
    /// Set a random stored wallpaper matching category and purity
    ChooseRandomBackground {
        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        destination: DestinationArg,
    },
    /// Print the path and web page of the current background
    ShowWallpaper,
    /// Delete the current background and choose another with the same category/purity
    DeleteWallpaper,
    /// Move the current background into the saved tree
    SaveWallpaper {
        #[command(flatten)]
        destination: DestinationArg,
    },
}
