//! Download affordance for fetched documents.

use sha2::{Digest, Sha256};

use crate::preview::PDF_MIME;

const FILENAME_SEPARATOR: char = '_';

/// Raw bytes offered for download with a suggested filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOffer {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl DownloadOffer {
    /// Hex SHA-256 of the offered bytes
    pub fn sha256(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }
}

/// Derive a download filename from a display name.
///
/// Whitespace runs become `_`, characters that are unsafe in filenames are
/// dropped, and `.pdf` is appended unless already present.
pub fn download_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut pending_sep = false;
    for ch in name.trim().chars() {
        if ch.is_whitespace() {
            pending_sep = true;
            continue;
        }
        if matches!(ch, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || ch.is_control() {
            continue;
        }
        if pending_sep && !out.is_empty() {
            out.push(FILENAME_SEPARATOR);
        }
        pending_sep = false;
        out.push(ch);
    }
    if out.is_empty() {
        out.push_str("document");
    }
    if !out.to_ascii_lowercase().ends_with(".pdf") {
        out.push_str(".pdf");
    }
    out
}

/// Offer `bytes` for download under a name derived from `name`.
pub fn provide_download(bytes: &[u8], name: &str) -> DownloadOffer {
    DownloadOffer {
        filename: download_filename(name),
        mime: PDF_MIME,
        bytes: bytes.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_become_underscores() {
        assert_eq!(download_filename("Intermediate Python"), "Intermediate_Python.pdf");
        assert_eq!(download_filename("  SQL   for Data  Science "), "SQL_for_Data_Science.pdf");
    }

    #[test]
    fn unsafe_characters_are_dropped() {
        assert_eq!(download_filename("AI/ML: Basics?"), "AIML_Basics.pdf");
        assert_eq!(download_filename("Résumé 2024"), "Résumé_2024.pdf");
    }

    #[test]
    fn existing_extension_is_kept() {
        assert_eq!(download_filename("Certificate.PDF"), "Certificate.PDF");
        assert_eq!(download_filename(""), "document.pdf");
    }

    #[test]
    fn offer_carries_bytes_and_filename() {
        let offer = provide_download(b"%PDF", "Data Analysis");
        assert_eq!(offer.filename, "Data_Analysis.pdf");
        assert_eq!(offer.mime, "application/pdf");
        assert_eq!(offer.bytes, b"%PDF");
        assert_eq!(offer.sha256().len(), 64);
    }
}
