//! Wallhaven search client
//!
//! Queries the search API and hands the results to the batch downloader.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::TransferError;
use crate::wallpaper::{Category, Purity, Wallpaper};

mod batch;

pub use batch::{download_batch, BatchReport, ImageSource, RetryPolicy};

pub const API_URL: &str = "https://wallhaven.cc/api/v1/search";

/// Aspect ratios requested unless configured otherwise
pub const DEFAULT_RATIOS: &str = "16x9,16x10";

/// Result ordering of the search API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Sorting {
    #[default]
    Random,
    Favourites,
    Toplist,
    Views,
}

impl Sorting {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sorting::Random => "random",
            Sorting::Favourites => "favourites",
            Sorting::Toplist => "toplist",
            Sorting::Views => "views",
        }
    }
}

impl fmt::Display for Sorting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One search request
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub api_key: Option<String>,
    pub sorting: Sorting,
    pub categories: Vec<Category>,
    pub purity: Vec<Purity>,
    pub ratios: String,
}

impl SearchQuery {
    /// Query-string parameters; the API key is only sent when present.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(5);
        if let Some(key) = &self.api_key {
            params.push(("apikey", key.clone()));
        }
        params.push(("sorting", self.sorting.to_string()));
        params.push(("categories", bitmask(&Category::ALL, &self.categories)));
        params.push(("purity", bitmask(&Purity::ALL, &self.purity)));
        params.push(("ratios", self.ratios.clone()));
        params
    }
}

/// `1`/`0` per element of `all`, depending on membership in `selected`.
pub fn bitmask<T: PartialEq>(all: &[T], selected: &[T]) -> String {
    all.iter()
        .map(|item| if selected.contains(item) { '1' } else { '0' })
        .collect()
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: Vec<ApiWallpaper>,
}

#[derive(Debug, Deserialize)]
struct ApiWallpaper {
    id: String,
    path: String,
    category: String,
    purity: String,
}

impl SearchResponse {
    /// Fresh records rooted at `root`; entries we cannot file are skipped.
    fn into_wallpapers(self, root: &Path) -> Vec<Wallpaper> {
        self.data
            .into_iter()
            .filter_map(|item| {
                let parsed = item
                    .category
                    .parse::<Category>()
                    .and_then(|c| item.purity.parse::<Purity>().map(|p| (c, p)));
                match parsed {
                    Ok((category, purity)) => {
                        Some(Wallpaper::new(item.id, item.path, category, purity, root))
                    }
                    Err(e) => {
                        warn!(id = %item.id, error = %e, "skipping search result");
                        None
                    }
                }
            })
            .collect()
    }
}

/// HTTP side of the fetch/store client
pub struct WallhavenClient {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl WallhavenClient {
    pub fn new(retry: RetryPolicy) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(format!("havenwall/{}", env!("CARGO_PKG_VERSION")))
                .connect_timeout(Duration::from_secs(10))
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            retry,
        }
    }

    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Run the search and describe the results as wallpapers under `root`.
    pub async fn search(&self, query: &SearchQuery, root: &Path) -> Result<Vec<Wallpaper>> {
        let params = query.params();
        info!(
            sorting = %query.sorting,
            categories = %bitmask(&Category::ALL, &query.categories),
            purity = %bitmask(&Purity::ALL, &query.purity),
            "querying Wallhaven"
        );

        let client = &self.client;
        let params = params.as_slice();
        let response: SearchResponse = self
            .retry
            .run("search", move || async move {
                let response = client.get(API_URL).query(params).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(TransferError::from_status(status));
                }
                Ok(response.json::<SearchResponse>().await?)
            })
            .await
            .context("Failed to query Wallhaven")?;

        Ok(response.into_wallpapers(root))
    }
}

impl Default for WallhavenClient {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

impl ImageSource for WallhavenClient {
    async fn fetch_to(&self, url: &str, dest: &Path) -> Result<u64, TransferError> {
        use futures_util::StreamExt;
        use tokio::io::AsyncWriteExt;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::from_status(status));
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }
}
