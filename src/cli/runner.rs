use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use super::{Cli, Commands};
use crate::cli_cmds::*;
use crate::config::Config;
use crate::webimport::SearchQuery;

pub(crate) async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;
    let background = cli.backend.unwrap_or(config.desktop.backend).adapter();

    match cli.command {
        Commands::GetWallpapers {
            api_key,
            sorting,
            ratios,
            filter,
            destination,
        } => {
            let destination = config.destination(destination.destination)?;
            let query = SearchQuery {
                api_key: api_key.or_else(|| config.wallhaven.api_key.clone()),
                sorting: sorting.unwrap_or(config.wallhaven.sorting),
                categories: config.categories(filter.categories),
                purity: config.purity(filter.purity),
                ratios: ratios.unwrap_or_else(|| config.wallhaven.ratios.clone()),
            };
            cmd_get_wallpapers(&query, &destination).await?;
        }
        Commands::ChooseRandomBackground {
            filter,
            destination,
        } => {
            let destination = config.destination(destination.destination)?;
            cmd_choose_random(
                background.as_ref(),
                &destination,
                &config.categories(filter.categories),
                &config.purity(filter.purity),
                &mut rand::thread_rng(),
            )?;
        }
        Commands::ShowWallpaper => {
            cmd_show(background.as_ref())?;
        }
        Commands::DeleteWallpaper => {
            cmd_delete(background.as_ref(), &mut rand::thread_rng())?;
        }
        Commands::SaveWallpaper { destination } => {
            let destination = config.destination(destination.destination)?;
            cmd_save(background.as_ref(), &destination)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
