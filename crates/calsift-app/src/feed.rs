//! Feed loading.
//!
//! A configured feed source is either an HTTP(S) URL or a local
//! filesystem path; everything downstream only sees the feed text.

use std::path::PathBuf;

use crate::error::AppResult;

/// Where a calendar feed comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    /// An `http://` or `https://` URL fetched over the network.
    Url(String),
    /// A local file path.
    Path(PathBuf),
}

impl FeedSource {
    /// Classifies a configured source string.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::Url(source.to_string())
        } else {
            Self::Path(PathBuf::from(source))
        }
    }

    /// Loads the feed text.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP request fails or returns a non-2xx
    /// status, or if the file cannot be read.
    pub async fn load(&self) -> AppResult<String> {
        match self {
            Self::Url(url) => {
                tracing::debug!(url, "Fetching feed");
                let response = reqwest::get(url).await?.error_for_status()?;
                Ok(response.text().await?)
            }
            Self::Path(path) => {
                tracing::debug!(path = %path.display(), "Reading feed file");
                Ok(tokio::fs::read_to_string(path).await?)
            }
        }
    }
}
