//! Site configuration: profile content, projects, contact endpoint and the
//! certificate table.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::preview::PreviewMode;
use crate::renderer::RendererConfig;
use crate::source::CertificateEntry;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub page_title: String,
    pub owner_name: String,
    pub welcome: String,
    pub photo: Option<PhotoConfig>,
    pub resume: Option<ResumeConfig>,
    /// Markdown shown under "About Me"
    pub about: String,
    pub employers: Vec<String>,
    pub email: String,
    pub linkedin: Option<String>,
    pub projects_intro: String,
    pub projects: Vec<Project>,
    pub contact_intro: String,
    /// Form action; defaults to the formsubmit.co address for `email`
    pub contact_endpoint: Option<String>,
    /// Displayed in configuration order
    pub certificates: Vec<CertificateEntry>,
    pub preview: PreviewMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub caption: String,
    #[serde(default = "default_photo_width")]
    pub width: u32,
}

fn default_photo_width() -> u32 {
    200
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeConfig {
    pub path: PathBuf,
    pub label: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            page_title: "My Portfolio".into(),
            owner_name: "OdeDjinn Caezar Y. Suba".into(),
            welcome: "Welcome to my portfolio website!".into(),
            photo: Some(PhotoConfig {
                path: PathBuf::from("profile.jpg"),
                caption: "This is me!".into(),
                width: default_photo_width(),
            }),
            resume: Some(ResumeConfig {
                path: PathBuf::from("resume.pdf"),
                label: "Download My Resume".into(),
                filename: "CV-Suba, OdeDjinnCaezar.pdf".into(),
            }),
            about: "I'm a **Data Analyst x AI Developer** with a passion for creating impactful real-world solutions.".into(),
            employers: vec!["MSCI Inc".into(), "UPM IMS-DIG".into(), "Remotasks".into()],
            email: "othedjinn@gmail.com".into(),
            linkedin: Some("https://www.linkedin.com/in/caezar-suba-634453161/".into()),
            projects_intro: "Here are some of my featured projects:".into(),
            projects: vec![
                Project {
                    title: "Project 1: [Project Name]".into(),
                    description: "What this project is about.".into(),
                    tech_stack: vec!["Python".into(), "Streamlit".into()],
                },
                Project {
                    title: "Project 2: [Another Project]".into(),
                    description: "Features and links.".into(),
                    tech_stack: Vec::new(),
                },
            ],
            contact_intro: "I'd love to connect!".into(),
            contact_endpoint: None,
            certificates: Vec::new(),
            preview: PreviewMode::default(),
        }
    }
}

impl SiteConfig {
    /// Load and validate a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let cfg: SiteConfig = serde_json::from_str(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.certificates {
            if entry.name.trim().is_empty() {
                return Err(Error::Config("certificate with empty name".into()));
            }
            if entry.source.trim().is_empty() {
                return Err(Error::Config(format!("certificate '{}' has no source", entry.name)));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(Error::Config(format!("duplicate certificate name '{}'", entry.name)));
            }
        }
        if let PreviewMode::Rasterize { zoom, .. } = &self.preview {
            if !zoom.is_finite() || *zoom <= 0.0 {
                return Err(Error::Config(format!("zoom must be positive, got {}", zoom)));
            }
        }
        Ok(())
    }

    pub fn contact_action(&self) -> String {
        self.contact_endpoint
            .clone()
            .unwrap_or_else(|| format!("https://formsubmit.co/{}", self.email))
    }

    pub fn renderer_config(&self) -> RendererConfig {
        RendererConfig {
            mode: self.preview.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_formsubmit_for_contact() {
        let cfg = SiteConfig::default();
        assert_eq!(cfg.contact_action(), "https://formsubmit.co/othedjinn@gmail.com");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults_and_keeps_order() {
        let cfg: SiteConfig = serde_json::from_str(
            r#"{
                "owner_name": "Test Person",
                "certificates": [
                    {"name": "Zeta", "source": "z.pdf"},
                    {"name": "Alpha", "source": "https://example.com/a.pdf"}
                ],
                "preview": {"kind": "viewer"}
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.owner_name, "Test Person");
        assert_eq!(cfg.page_title, "My Portfolio");
        assert_eq!(cfg.certificates[0].name, "Zeta");
        assert_eq!(cfg.certificates[1].name, "Alpha");
        assert!(matches!(cfg.preview, PreviewMode::Viewer { .. }));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let cfg = SiteConfig {
            certificates: vec![
                CertificateEntry::new("Same", "a.pdf"),
                CertificateEntry::new("Same", "b.pdf"),
            ],
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn non_positive_zoom_is_rejected() {
        let cfg = SiteConfig {
            preview: PreviewMode::Rasterize { zoom: 0.0, max_pages: None },
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn from_path_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(&path, serde_json::to_string(&SiteConfig::default()).unwrap()).unwrap();
        assert_eq!(SiteConfig::from_path(&path).unwrap(), SiteConfig::default());

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(SiteConfig::from_path(&path), Err(Error::Json(_))));
    }
}
