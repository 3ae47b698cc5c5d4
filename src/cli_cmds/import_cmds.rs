use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use crate::webimport::{download_batch, BatchReport, SearchQuery, WallhavenClient};

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb
}

fn summary(report: &BatchReport) -> String {
    format!(
        "Downloaded {} new, {} already present, {} failed",
        report.downloaded.len(),
        report.skipped.len(),
        report.failed.len()
    )
}

/// Search Wallhaven and download every result into `destination`.
pub async fn cmd_get_wallpapers(query: &SearchQuery, destination: &Path) -> Result<()> {
    let client = WallhavenClient::default();

    let wallpapers = client.search(query, destination).await?;
    if wallpapers.is_empty() {
        println!("No wallpapers matched the query.");
        return Ok(());
    }

    let pb = progress_bar(wallpapers.len() as u64);
    let report = download_batch(&client, client.retry(), wallpapers, &pb).await;
    pb.finish_and_clear();

    println!("{}", summary(&report));
    for (wallpaper, err) in &report.failed {
        eprintln!("  {} ({}): {}", wallpaper.id, wallpaper.url, err);
    }

    if !report.failed.is_empty() {
        anyhow::bail!(
            "{} of {} downloads failed",
            report.failed.len(),
            report.total()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransferError;
    use crate::wallpaper::{Category, Purity, Wallpaper};
    use std::path::PathBuf;

    #[test]
    fn summary_counts_each_outcome() {
        let report = BatchReport {
            downloaded: vec![PathBuf::from("/a"), PathBuf::from("/b")],
            skipped: vec![PathBuf::from("/c")],
            failed: vec![(
                Wallpaper::new("x", "https://h/x.jpg", Category::General, Purity::Sfw, "/"),
                TransferError::Permanent("HTTP 404 Not Found".into()),
            )],
        };
        assert_eq!(
            summary(&report),
            "Downloaded 2 new, 1 already present, 1 failed"
        );
    }
}
