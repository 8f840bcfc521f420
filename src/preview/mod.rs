//! Preview strategies for certificate documents.
//!
//! Three mutually exclusive strategies are supported: embedding the whole
//! document inline as a base64 data URI, delegating to a third-party online
//! viewer, or rasterizing each page to a PNG.

pub mod raster;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::document;
use crate::source::DocumentSource;
use crate::{Error, Result};

pub use raster::{PageImage, PageRasterizer};

/// Default third-party viewer; the percent-encoded document URL is appended.
pub const DEFAULT_VIEWER_BASE: &str = "https://docs.google.com/viewer?embedded=true&url=";

/// Default zoom factor for rasterized pages.
pub const DEFAULT_ZOOM: f32 = 2.0;

pub const PDF_MIME: &str = "application/pdf";

/// Which preview strategy the renderer uses.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreviewMode {
    /// Base64-encode the whole document into a `data:` URI
    #[default]
    Embed,
    /// Point an iframe at an online viewer
    Viewer {
        #[serde(default = "default_viewer_base")]
        base: String,
    },
    /// Rasterize pages at a fixed zoom
    Rasterize {
        #[serde(default = "default_zoom")]
        zoom: f32,
        #[serde(default)]
        max_pages: Option<usize>,
    },
}

fn default_viewer_base() -> String {
    DEFAULT_VIEWER_BASE.to_string()
}

fn default_zoom() -> f32 {
    DEFAULT_ZOOM
}

/// A ready-to-display preview.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewHandle {
    Embed { data_uri: String },
    Viewer { url: String },
    Pages(Vec<PageImage>),
}

impl PreviewHandle {
    pub fn label(&self) -> &'static str {
        match self {
            PreviewHandle::Embed { .. } => "embed",
            PreviewHandle::Viewer { .. } => "viewer",
            PreviewHandle::Pages(_) => "pages",
        }
    }
}

/// Encode bytes as a `data:` URI with the given MIME type.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Viewer URL for a remote document.
pub fn viewer_url(base: &str, document_url: &url::Url) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(document_url.as_str().as_bytes()).collect();
    format!("{}{}", base, encoded)
}

/// Build a preview for a fetched document.
///
/// `bytes` is ignored by the viewer strategy, which only needs the source
/// URL. Local sources have no public URL, so the viewer strategy embeds
/// them instead.
pub fn build_preview(
    bytes: &[u8],
    mode: &PreviewMode,
    source: &DocumentSource,
    rasterizer: Option<&dyn PageRasterizer>,
) -> Result<PreviewHandle> {
    match (mode, source) {
        (PreviewMode::Viewer { base }, DocumentSource::Remote(url)) => Ok(PreviewHandle::Viewer {
            url: viewer_url(base, url),
        }),
        (PreviewMode::Embed, _) | (PreviewMode::Viewer { .. }, DocumentSource::Local(_)) => {
            document::check_header(bytes)?;
            Ok(PreviewHandle::Embed {
                data_uri: data_uri(PDF_MIME, bytes),
            })
        }
        (PreviewMode::Rasterize { zoom, max_pages }, _) => {
            let info = document::inspect(bytes)?;
            let rasterizer =
                rasterizer.ok_or_else(|| Error::Render("no page rasterizer available".into()))?;
            let limit = max_pages.map_or(info.page_count, |m| m.min(info.page_count));
            let pages = rasterizer.rasterize(bytes, *zoom, limit)?;
            if pages.is_empty() {
                return Err(Error::Render("rasterizer produced no pages".into()));
            }
            Ok(PreviewHandle::Pages(pages))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::tests::sample_pdf;
    use std::path::PathBuf;

    struct BlankPages;

    impl PageRasterizer for BlankPages {
        fn rasterize(&self, _bytes: &[u8], zoom: f32, max_pages: usize) -> Result<Vec<PageImage>> {
            Ok((0..max_pages)
                .map(|index| PageImage {
                    index,
                    width: (10.0 * zoom) as u32,
                    height: (14.0 * zoom) as u32,
                    png: vec![0x89, b'P', b'N', b'G'],
                })
                .collect())
        }
    }

    fn local() -> DocumentSource {
        DocumentSource::Local(PathBuf::from("cert.pdf"))
    }

    #[test]
    fn embed_is_base64_data_uri() {
        let pdf = sample_pdf(1);
        let handle = build_preview(&pdf, &PreviewMode::Embed, &local(), None).unwrap();
        let PreviewHandle::Embed { data_uri } = handle else {
            panic!("expected embed");
        };
        let payload = data_uri.strip_prefix("data:application/pdf;base64,").unwrap();
        assert_eq!(STANDARD.decode(payload).unwrap(), pdf);
    }

    #[test]
    fn embed_rejects_non_pdf() {
        let err = build_preview(b"hello", &PreviewMode::Embed, &local(), None).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn embed_accepts_damaged_xref() {
        let mut pdf = sample_pdf(1);
        let at = pdf.windows(9).rposition(|w| w == b"startxref").unwrap() + 10;
        let digit = pdf[at..].iter().position(u8::is_ascii_digit).unwrap() + at;
        pdf[digit] = if pdf[digit] == b'9' { b'1' } else { b'9' };

        let handle = build_preview(&pdf, &PreviewMode::Embed, &local(), None).unwrap();
        let PreviewHandle::Embed { data_uri } = handle else {
            panic!("expected embed");
        };
        let payload = data_uri.strip_prefix("data:application/pdf;base64,").unwrap();
        assert_eq!(STANDARD.decode(payload).unwrap(), pdf);
    }

    #[test]
    fn viewer_encodes_remote_url_without_bytes() {
        let src = DocumentSource::parse("https://example.com/certs/a b.pdf?x=1");
        let mode = PreviewMode::Viewer {
            base: DEFAULT_VIEWER_BASE.into(),
        };
        let handle = build_preview(&[], &mode, &src, None).unwrap();
        assert_eq!(
            handle,
            PreviewHandle::Viewer {
                url: "https://docs.google.com/viewer?embedded=true&url=https%3A%2F%2Fexample.com%2Fcerts%2Fa%2520b.pdf%3Fx%3D1"
                    .into()
            }
        );
    }

    #[test]
    fn viewer_embeds_local_sources() {
        let mode = PreviewMode::Viewer {
            base: DEFAULT_VIEWER_BASE.into(),
        };
        let handle = build_preview(&sample_pdf(1), &mode, &local(), None).unwrap();
        assert_eq!(handle.label(), "embed");
    }

    #[test]
    fn rasterize_respects_page_limit() {
        let mode = PreviewMode::Rasterize {
            zoom: 2.0,
            max_pages: Some(2),
        };
        let handle = build_preview(&sample_pdf(5), &mode, &local(), Some(&BlankPages)).unwrap();
        let PreviewHandle::Pages(pages) = handle else {
            panic!("expected pages");
        };
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].index, 1);
        assert_eq!(pages[0].width, 20);
    }

    #[test]
    fn rasterize_without_backend_fails() {
        let mode = PreviewMode::Rasterize {
            zoom: DEFAULT_ZOOM,
            max_pages: None,
        };
        let err = build_preview(&sample_pdf(1), &mode, &local(), None).unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }

    #[test]
    fn mode_deserializes_with_defaults() {
        let m: PreviewMode = serde_json::from_str(r#"{"kind":"rasterize"}"#).unwrap();
        assert_eq!(
            m,
            PreviewMode::Rasterize {
                zoom: DEFAULT_ZOOM,
                max_pages: None
            }
        );
        let v: PreviewMode = serde_json::from_str(r#"{"kind":"viewer"}"#).unwrap();
        assert_eq!(
            v,
            PreviewMode::Viewer {
                base: DEFAULT_VIEWER_BASE.into()
            }
        );
    }
}
