//! Recipe metadata lookup.
//!
//! This module fetches supplementary data (thumbnail, category, area) for a
//! recipe title from TheMealDB's search endpoint. Results are never cached
//! and failed requests are not retried.

use crate::model::{MealMetadata, MealSearchResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Public TheMealDB API, free tier.
pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Errors that can occur when looking up recipe metadata.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Invalid lookup base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Lookup request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Lookup service answered with HTTP {0}")]
    Status(StatusCode),

    #[error("Failed to decode lookup response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of supplementary recipe metadata.
#[async_trait]
pub trait MetadataLookup {
    /// Returns the best match for `title`, or `None` if nothing matches.
    async fn fetch_details(&self, title: &str) -> Result<Option<MealMetadata>, LookupError>;
}

/// Client for TheMealDB `search.php` endpoint.
///
/// # Examples
///
/// ```no_run
/// use recipe_box::{MealDbClient, MetadataLookup};
/// use std::time::Duration;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = MealDbClient::new(recipe_box::lookup::DEFAULT_BASE_URL, Duration::from_secs(10))?;
/// if let Some(meta) = client.fetch_details("Arrabiata").await? {
///     println!("{:?} / {:?}", meta.category, meta.area);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MealDbClient {
    client: Client,
    search_url: Url,
}

impl MealDbClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let search_url = format!("{}/search.php", base_url.trim_end_matches('/'));
        let search_url = Url::parse(&search_url).map_err(|source| LookupError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;

        let client = Client::builder()
            .user_agent(concat!("recipe-box/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(MealDbClient { client, search_url })
    }
}

#[async_trait]
impl MetadataLookup for MealDbClient {
    #[instrument(skip(self))]
    async fn fetch_details(&self, title: &str) -> Result<Option<MealMetadata>, LookupError> {
        let response = self
            .client
            .get(self.search_url.clone())
            .query(&[("s", title)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        let body = response.text().await?;
        let meta = serde_json::from_str::<MealSearchResponse>(&body)?.into_first();
        debug!(found = meta.is_some(), "metadata lookup finished");
        Ok(meta)
    }
}
