//! Folio
//!
//! A personal portfolio site renderer: a sidebar-navigated Home/About page,
//! a projects showcase and a contact form, plus a certificate gallery whose
//! documents are fetched from disk or the network and previewed inline.
//!
//! # Features
//!
//! - **Certificate renderer**: ordered, failure-isolated fetch + preview +
//!   download for every configured document
//! - **Pluggable previews**: inline base64 embed, online viewer, or page
//!   rasterization (`pdfium` feature)
//! - **Injected cache**: memoize remote fetches with any [`FetchCache`]
//!
//! # Example
//!
//! ```no_run
//! use folio::{CertificateEntry, CertificateRenderer, RenderResult, RendererConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let renderer = CertificateRenderer::new(RendererConfig::default())?;
//! let entries = vec![
//!     CertificateEntry::new("Intermediate Python", "https://example.com/python.pdf"),
//!     CertificateEntry::new("SQL Basics", "certs/sql.pdf"),
//! ];
//! for result in renderer.render_all(&entries) {
//!     match result {
//!         RenderResult::Rendered { name, .. } => println!("{}: ok", name),
//!         RenderResult::Failed { name, message, .. } => println!("{}: {}", name, message),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod cache;
pub mod document;
pub mod download;
pub mod fetch;
pub mod preview;
pub mod renderer;
pub mod site;
pub mod source;

// HTTP front end for the rendered pages
pub mod server;

pub use cache::{BoundedCache, FetchCache, MemoryCache, NoopCache};
pub use download::{download_filename, provide_download, DownloadOffer};
pub use fetch::{DocumentFetcher, HttpFetcher};
pub use preview::{build_preview, PageImage, PageRasterizer, PreviewHandle, PreviewMode};
pub use renderer::{CertificateRenderer, FailureKind, RenderResult, RendererConfig};
pub use site::{render_view, Block, NavState, Section, SiteConfig, View};
pub use source::{CertificateEntry, DocumentSource};
