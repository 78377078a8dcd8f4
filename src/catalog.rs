//! Catalog API client.
//!
//! Every public fetch on [`CatalogClient`] is infallible from the caller's point
//! of view. A failed request rotates the API key once, is logged, and is
//! replaced by a substitute value: the fixed two-item fallback page for list
//! endpoints, or `None` for detail and trailer lookups. The request is never
//! retried with the new key; the next call simply uses it.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use crate::config::{CatalogSettings, ConfigError};
use crate::credentials::CredentialRotator;
use crate::media::{
    CatalogPage, CatalogRecordPage, MediaDetails, MediaId, MediaItem, MediaKind,
};
use crate::trailer::{find_trailer, TrailerVideo, VideosResponse};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for CatalogError {
    fn from(error: reqwest::Error) -> Self {
        // The request URL carries the API key.
        CatalogError::Network(error.without_url().to_string())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ImageSize {
    Poster,
    Backdrop,
}

pub async fn fetch_image_bytes(url: String) -> Result<Vec<u8>, String> {
    reqwest::get(&url)
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| e.to_string())
}

/// The two records shown in place of any list that could not be fetched.
pub fn fallback_page() -> CatalogPage {
    let stranger_things = MediaItem {
        id: MediaId::Number(1),
        kind: MediaKind::Tv,
        display_title: String::from("Stranger Things"),
        overview: String::from(
            "When a young boy disappears, his mother, a police chief and his friends must \
             confront terrifying supernatural forces in order to get him back.",
        ),
        poster_path: Some(String::from("/x2LSRK2Cm7MZhjluni1msVJ3wDF.jpg")),
        backdrop_path: Some(String::from("/56v2KjBlU4XaOv9rVYEQypROD7P.jpg")),
        vote_average: 8.7,
        display_date: Some(String::from("2016-07-15")),
    };
    let witcher = MediaItem {
        id: MediaId::Number(2),
        kind: MediaKind::Tv,
        display_title: String::from("The Witcher"),
        overview: String::from(
            "Geralt of Rivia, a mutated monster-hunter for hire, journeys toward his destiny \
             in a turbulent world where people often prove more wicked than beasts.",
        ),
        poster_path: Some(String::from("/7vjaCdMw15FEbXyLQTVa04URsPm.jpg")),
        backdrop_path: Some(String::from("/7vjaCdMw15FEbXyLQTVa04URsPm.jpg")),
        vote_average: 8.2,
        display_date: Some(String::from("2019-12-20")),
    };
    CatalogPage {
        results: vec![stranger_things, witcher],
    }
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    image_base_url: String,
    placeholder_image_url: String,
    credentials: CredentialRotator,
    http_client: Arc<reqwest::Client>,
}

impl CatalogClient {
    pub fn new(settings: &CatalogSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            base_url: settings.base_url.clone(),
            image_base_url: settings.image_base_url.clone(),
            placeholder_image_url: settings.placeholder_image_url.clone(),
            credentials: CredentialRotator::new(settings.api_keys.clone())?,
            http_client: Arc::new(reqwest::Client::new()),
        })
    }

    pub fn credentials(&self) -> &CredentialRotator {
        &self.credentials
    }

    pub fn placeholder_image_url(&self) -> &str {
        &self.placeholder_image_url
    }

    /// Absent or blank paths resolve to the placeholder image.
    pub fn image_url(&self, path: Option<&str>, size: ImageSize) -> String {
        let Some(path) = path.filter(|p| !p.trim().is_empty()) else {
            return self.placeholder_image_url.clone();
        };
        let size_path = match size {
            ImageSize::Poster => "w500",
            ImageSize::Backdrop => "original",
        };
        format!("{}/{}{}", self.image_base_url, size_path, path)
    }

    /// `query` must end in `?` or `&`; the key is appended as one more parameter.
    fn build_url(&self, endpoint: &str, query: &str, key_index: usize) -> String {
        format!(
            "{}{}{}&api_key={}",
            self.base_url,
            endpoint,
            query,
            self.credentials.key(key_index)
        )
    }

    async fn try_get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &str,
        key_index: usize,
    ) -> Result<T, CatalogError> {
        let url = self.build_url(endpoint, query, key_index);
        tracing::debug!(endpoint, key_index, "catalog request");

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Rotates away from the key the failed request used. A failure on a key
    /// that another request already rotated away from only gets logged.
    fn absorb(&self, endpoint: &str, key_index: usize, error: &CatalogError) {
        if self.credentials.rotate_from(key_index) {
            tracing::warn!(
                endpoint,
                %error,
                key_index = self.credentials.current_index(),
                "catalog fetch failed, rotated API key"
            );
        } else {
            tracing::warn!(endpoint, %error, key_index, "catalog fetch failed on a retired key");
        }
    }

    /// The one place a failed request is turned into an absent value.
    async fn fetch_optional<T: DeserializeOwned>(&self, endpoint: &str, query: &str) -> Option<T> {
        let key_index = self.credentials.current_index();
        match self.try_get(endpoint, query, key_index).await {
            Ok(value) => Some(value),
            Err(error) => {
                self.absorb(endpoint, key_index, &error);
                None
            }
        }
    }

    /// Fetches a list endpoint, yielding the fallback page on any failure.
    #[instrument(skip(self))]
    pub async fn fetch(&self, endpoint: &str, query: &str) -> CatalogPage {
        self.fetch_optional::<CatalogRecordPage>(endpoint, query)
            .await
            .map_or_else(fallback_page, CatalogPage::from)
    }

    #[instrument(skip(self))]
    pub async fn fetch_details(&self, id: &MediaId, kind: MediaKind) -> Option<MediaDetails> {
        let endpoint = format!("/{}/{}", kind.path(), id);
        self.fetch_optional(&endpoint, "?").await
    }

    /// Looks up the first YouTube trailer; `None` when there is none or the
    /// lookup failed.
    #[instrument(skip(self))]
    pub async fn fetch_trailer(&self, id: &MediaId, kind: MediaKind) -> Option<TrailerVideo> {
        let endpoint = format!("/{}/{}/videos", kind.path(), id);
        let videos: Option<VideosResponse> = self.fetch_optional(&endpoint, "?").await;
        videos.and_then(|v| find_trailer(&v.results).cloned())
    }
}
