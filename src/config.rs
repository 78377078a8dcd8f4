//! Compiled-in catalog configuration.

use thiserror::Error;

const BASE_URL: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
const PLACEHOLDER_IMAGE_URL: &str =
    "https://via.placeholder.com/300x450/1a1a1a/ffffff?text=No+Image";
const API_KEYS: [&str; 2] = [
    "c8dea14dc917687ac631a52620e4f7ad",
    "3cb41ecea3bf606c56552db3d17adefd",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("at least one API key is required")]
    NoApiKeys,
    #[error("API key at position {0} is blank")]
    BlankApiKey(usize),
}

#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub base_url: String,
    pub image_base_url: String,
    pub placeholder_image_url: String,
    pub api_keys: Vec<String>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: String::from(BASE_URL),
            image_base_url: String::from(IMAGE_BASE_URL),
            placeholder_image_url: String::from(PLACEHOLDER_IMAGE_URL),
            api_keys: API_KEYS.iter().map(|k| String::from(*k)).collect(),
        }
    }
}

impl CatalogSettings {
    /// Points the client at another endpoint root (a wiremock server in tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.api_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_keys.is_empty() {
            return Err(ConfigError::NoApiKeys);
        }
        match self.api_keys.iter().position(|k| k.trim().is_empty()) {
            Some(index) => Err(ConfigError::BlankApiKey(index)),
            None => Ok(()),
        }
    }
}
