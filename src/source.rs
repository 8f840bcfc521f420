//! Certificate entries and the sources their documents are loaded from.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

/// One certificate/document record: a display label and where to load it from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateEntry {
    /// Display label, unique within a run
    pub name: String,
    /// Local path, `file://` URL or `http(s)://` URL
    pub source: String,
}

impl CertificateEntry {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Parsed form of `source`
    pub fn document_source(&self) -> DocumentSource {
        DocumentSource::parse(&self.source)
    }
}

/// Where a document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Local(PathBuf),
    Remote(Url),
}

impl DocumentSource {
    /// Classify a raw source string.
    ///
    /// Anything that is not an `http`, `https` or `file` URL is treated as a
    /// filesystem path, so Windows drive letters (`C:\...`) stay local.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => DocumentSource::Remote(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => DocumentSource::Local(path),
                Err(()) => DocumentSource::Local(PathBuf::from(url.path())),
            },
            _ => DocumentSource::Local(PathBuf::from(raw)),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, DocumentSource::Remote(_))
    }

    /// Key used for fetch memoization
    pub fn cache_key(&self) -> String {
        match self {
            DocumentSource::Local(p) => p.display().to_string(),
            DocumentSource::Remote(u) => u.as_str().to_string(),
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Local(p) => write!(f, "{}", p.display()),
            DocumentSource::Remote(u) => write!(f, "{}", u),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_and_https_are_remote() {
        assert!(DocumentSource::parse("https://example.com/cert.pdf").is_remote());
        assert!(DocumentSource::parse("http://127.0.0.1:8080/a.pdf").is_remote());
    }

    #[test]
    fn paths_and_file_urls_are_local() {
        assert_eq!(
            DocumentSource::parse("certs/python.pdf"),
            DocumentSource::Local(PathBuf::from("certs/python.pdf"))
        );
        assert_eq!(
            DocumentSource::parse("  certs/sql.pdf "),
            DocumentSource::Local(PathBuf::from("certs/sql.pdf"))
        );
        #[cfg(unix)]
        assert_eq!(
            DocumentSource::parse("file:///tmp/cert.pdf"),
            DocumentSource::Local(PathBuf::from("/tmp/cert.pdf"))
        );
    }

    #[test]
    fn windows_drive_letter_stays_local() {
        // `C:` parses as a URL scheme; it must not become a remote source
        assert!(!DocumentSource::parse(r"C:\certs\cert.pdf").is_remote());
    }
}
