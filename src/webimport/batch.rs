//! Concurrent download of a search result page.
//!
//! Every item is dispatched at once and awaited together; a failing item
//! only shows up in the report and never stops its siblings.

use futures_util::future::join_all;
use indicatif::ProgressBar;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::error::TransferError;
use crate::wallpaper::Wallpaper;

/// Something that can store the resource behind a URL into a file.
pub trait ImageSource {
    /// Write the body of `url` to `dest`, returning the byte count.
    fn fetch_to(&self, url: &str, dest: &Path)
        -> impl Future<Output = Result<u64, TransferError>>;
}

/// Exponential backoff for transient transfer errors
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub initial_delay: Duration,
    /// Upper bound for a single wait
    pub max_delay: Duration,
    /// No retry is scheduled past this much total time
    pub max_elapsed: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
            max_elapsed: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Run `op` until it succeeds, fails permanently, or the window closes.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T, TransferError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, TransferError>>,
    {
        let started = Instant::now();
        let mut delay = self.initial_delay;
        let mut attempt: u32 = 1;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && started.elapsed() + delay <= self.max_elapsed => {
                    warn!(
                        target_item = label,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(self.max_delay);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded(PathBuf),
    /// The file was already in the library
    Skipped(PathBuf),
}

/// Per-item results of a batch
#[derive(Debug, Default)]
pub struct BatchReport {
    pub downloaded: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<(Wallpaper, TransferError)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.downloaded.len() + self.skipped.len() + self.failed.len()
    }
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}

/// Store one wallpaper at its encoded path.
///
/// Bytes land in a `.part` sibling first so an interrupted transfer never
/// leaves a truncated image where the selector would find it.
pub async fn download<S: ImageSource>(
    source: &S,
    retry: &RetryPolicy,
    wallpaper: &Wallpaper,
) -> Result<DownloadOutcome, TransferError> {
    let dest = wallpaper.path();
    if tokio::fs::try_exists(&dest).await? {
        debug!(path = %dest.display(), "already downloaded");
        return Ok(DownloadOutcome::Skipped(dest));
    }
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let part = part_path(&dest);
    let url = wallpaper.url.as_str();
    let part_ref = part.as_path();
    match retry
        .run(&wallpaper.id, move || source.fetch_to(url, part_ref))
        .await
    {
        Ok(bytes) => {
            tokio::fs::rename(&part, &dest).await?;
            info!(path = %dest.display(), bytes, "downloaded wallpaper");
            Ok(DownloadOutcome::Downloaded(dest))
        }
        Err(err) => {
            let _ = tokio::fs::remove_file(&part).await;
            Err(err)
        }
    }
}

/// Download all wallpapers concurrently and wait for every one of them.
pub async fn download_batch<S: ImageSource>(
    source: &S,
    retry: &RetryPolicy,
    wallpapers: Vec<Wallpaper>,
    progress: &ProgressBar,
) -> BatchReport {
    let tasks = wallpapers.into_iter().map(move |wallpaper| async move {
        let outcome = download(source, retry, &wallpaper).await;
        progress.inc(1);
        (wallpaper, outcome)
    });

    let mut report = BatchReport::default();
    for (wallpaper, outcome) in join_all(tasks).await {
        match outcome {
            Ok(DownloadOutcome::Downloaded(path)) => report.downloaded.push(path),
            Ok(DownloadOutcome::Skipped(path)) => report.skipped.push(path),
            Err(err) => {
                debug!(id = %wallpaper.id, url = %wallpaper.url, error = %err, "download failed");
                report.failed.push((wallpaper, err));
            }
        }
    }
    report
}
