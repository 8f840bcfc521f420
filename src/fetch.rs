//! Retrieval of document bytes from disk or over HTTP.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use reqwest::blocking::Client;

use crate::source::DocumentSource;
use crate::{Error, Result};

/// Trait for retrieving the raw bytes behind a [`DocumentSource`].
///
/// [`HttpFetcher`] is the default; tests and offline builds can provide
/// their own implementation.
pub trait DocumentFetcher: Send + Sync {
    fn fetch(&self, source: &DocumentSource) -> Result<Vec<u8>>;
}

impl<T: DocumentFetcher + ?Sized> DocumentFetcher for Arc<T> {
    fn fetch(&self, source: &DocumentSource) -> Result<Vec<u8>> {
        (**self).fetch(source)
    }
}

/// Reads local files and issues a single blocking GET for remote sources.
///
/// No retry and no backoff. The request timeout is whatever the HTTP client
/// uses by default.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent.to_string())
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    fn fetch_remote(&self, url: &url::Url) -> Result<Vec<u8>> {
        debug!("GET {}", url);
        let res = self
            .client
            .get(url.as_str())
            .send()
            .map_err(|e| Error::Network(format!("GET {} failed: {}", url, e)))?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::Network(format!("GET {} returned {}", url, status)));
        }

        let body = res
            .bytes()
            .map_err(|e| Error::Network(format!("Failed to read response body from {}: {}", url, e)))?;
        Ok(body.to_vec())
    }
}

impl DocumentFetcher for HttpFetcher {
    fn fetch(&self, source: &DocumentSource) -> Result<Vec<u8>> {
        match source {
            DocumentSource::Local(path) => read_local(path),
            DocumentSource::Remote(url) => self.fetch_remote(url),
        }
    }
}

/// Read a whole local file into memory.
///
/// Any failure to read, not only `NotFound`, reports the asset as missing:
/// a file that cannot be opened is as unusable as one that is absent.
pub fn read_local(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        if e.kind() != ErrorKind::NotFound {
            debug!("reading {} failed: {}", path.display(), e);
        }
        Error::MissingLocalAsset(path.to_path_buf())
    })
}
