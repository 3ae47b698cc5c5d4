mod background;
mod cli;
mod cli_cmds;
mod config;
mod error;
mod utils;
mod wallpaper;
mod webimport;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
