//! Certificate renderer: fetch, preview and offer each configured document.
//!
//! Entries are processed strictly in order. A failure on one entry becomes a
//! [`RenderResult::Failed`] for that entry and the loop moves on; nothing
//! escapes [`CertificateRenderer::render_all`].

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use serde::Serialize;

use crate::cache::{FetchCache, MemoryCache};
use crate::download::{provide_download, DownloadOffer};
use crate::fetch::{DocumentFetcher, HttpFetcher};
use crate::preview::{self, PageRasterizer, PreviewHandle, PreviewMode};
use crate::source::{CertificateEntry, DocumentSource};
use crate::{Error, Result};

/// Configuration for a [`CertificateRenderer`]
///
/// ```
/// let cfg = folio::RendererConfig::default();
/// assert_eq!(cfg.mode, folio::PreviewMode::Embed);
/// ```
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Preview strategy applied to every entry
    pub mode: PreviewMode,
    /// User agent sent with remote fetches
    pub user_agent: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            mode: PreviewMode::default(),
            user_agent: format!("folio/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Why an entry could not be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    MissingLocalAsset,
    NetworkFailure,
    DecodeFailure,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::MissingLocalAsset => "missing local asset",
            FailureKind::NetworkFailure => "network failure",
            FailureKind::DecodeFailure => "decode failure",
        };
        f.write_str(s)
    }
}

/// Outcome for one entry in one render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderResult {
    Rendered {
        name: String,
        preview: PreviewHandle,
        download: DownloadOffer,
        /// Remote documents can also be opened directly in a new tab
        open_url: Option<String>,
    },
    Failed {
        name: String,
        kind: FailureKind,
        message: String,
    },
}

impl RenderResult {
    pub fn name(&self) -> &str {
        match self {
            RenderResult::Rendered { name, .. } | RenderResult::Failed { name, .. } => name,
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, RenderResult::Rendered { .. })
    }

    fn failed(name: &str, err: &Error) -> Self {
        RenderResult::Failed {
            name: name.to_string(),
            kind: err.failure_kind().unwrap_or(FailureKind::DecodeFailure),
            message: err.to_string(),
        }
    }
}

/// A fetched and previewed entry, before it is folded into a [`RenderResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub name: String,
    pub preview: PreviewHandle,
    pub download: DownloadOffer,
    pub open_url: Option<String>,
}

impl From<Rendered> for RenderResult {
    fn from(r: Rendered) -> Self {
        RenderResult::Rendered {
            name: r.name,
            preview: r.preview,
            download: r.download,
            open_url: r.open_url,
        }
    }
}

/// Renders certificate entries with an injected fetcher, cache and rasterizer.
pub struct CertificateRenderer {
    mode: PreviewMode,
    fetcher: Arc<dyn DocumentFetcher>,
    cache: Arc<dyn FetchCache>,
    rasterizer: Option<Box<dyn PageRasterizer>>,
}

impl CertificateRenderer {
    /// Renderer using [`HttpFetcher`], an in-memory cache and whichever
    /// rasterizer this build provides.
    pub fn new(config: RendererConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.user_agent)?;
        Ok(Self {
            mode: config.mode,
            fetcher: Arc::new(fetcher),
            cache: Arc::new(MemoryCache::new()),
            rasterizer: preview::raster::default_rasterizer(),
        })
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn DocumentFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn FetchCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_rasterizer(mut self, rasterizer: Box<dyn PageRasterizer>) -> Self {
        self.rasterizer = Some(rasterizer);
        self
    }

    pub fn mode(&self) -> &PreviewMode {
        &self.mode
    }

    /// Retrieve the bytes for `source`.
    ///
    /// Remote fetches are memoized by URL; local files are always re-read.
    /// Failures are never cached.
    pub fn fetch_bytes(&self, source: &DocumentSource) -> Result<Vec<u8>> {
        if !source.is_remote() {
            return self.fetcher.fetch(source);
        }
        let key = source.cache_key();
        if let Some(bytes) = self.cache.get(&key) {
            debug!("cache hit for {}", key);
            return Ok(bytes);
        }
        let bytes = self.fetcher.fetch(source)?;
        self.cache.put(&key, bytes.clone());
        Ok(bytes)
    }

    /// Fetch and preview one entry, propagating the first failure.
    pub fn try_render(&self, entry: &CertificateEntry) -> Result<Rendered> {
        let source = entry.document_source();
        let bytes = self.fetch_bytes(&source)?;
        let preview = preview::build_preview(&bytes, &self.mode, &source, self.rasterizer.as_deref())?;
        let open_url = match &source {
            DocumentSource::Remote(url) => Some(url.to_string()),
            DocumentSource::Local(_) => None,
        };
        Ok(Rendered {
            name: entry.name.clone(),
            preview,
            download: provide_download(&bytes, &entry.name),
            open_url,
        })
    }

    /// Render one entry, converting any failure into [`RenderResult::Failed`].
    pub fn render_entry(&self, entry: &CertificateEntry) -> RenderResult {
        match self.try_render(entry) {
            Ok(rendered) => rendered.into(),
            Err(e) => {
                warn!("certificate '{}' not rendered: {}", entry.name, e);
                RenderResult::failed(&entry.name, &e)
            }
        }
    }

    /// Render every entry in order. An empty slice yields an empty Vec.
    pub fn render_all(&self, entries: &[CertificateEntry]) -> Vec<RenderResult> {
        entries.iter().map(|e| self.render_entry(e)).collect()
    }
}
