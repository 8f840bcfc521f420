//! PDF validation before a preview is built.

use lopdf::Document;

use crate::{Error, Result};

/// Basic facts about a decoded PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub page_count: usize,
    pub version: String,
}

/// Cheap check that `bytes` start with a PDF header.
///
/// Leading whitespace is tolerated. The body is not parsed, so documents
/// with a damaged cross-reference table still pass.
pub fn check_header(bytes: &[u8]) -> Result<()> {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(bytes.len());
    if bytes[start..].starts_with(b"%PDF-") {
        Ok(())
    } else {
        Err(Error::Decode("missing %PDF- header".into()))
    }
}

/// Parse `bytes` as a PDF and report its page count.
///
/// Bytes that lopdf cannot parse, or a document with no pages, are a
/// decode failure.
pub fn inspect(bytes: &[u8]) -> Result<DocumentInfo> {
    if bytes.is_empty() {
        return Err(Error::Decode("empty document".into()));
    }
    let doc = Document::load_mem(bytes).map_err(|e| Error::Decode(e.to_string()))?;
    let page_count = doc.get_pages().len();
    if page_count == 0 {
        return Err(Error::Decode("document has no pages".into()));
    }
    Ok(DocumentInfo {
        page_count,
        version: doc.version.clone(),
    })
}
