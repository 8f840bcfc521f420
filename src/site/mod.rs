//! Portfolio pages as explicit view descriptions.
//!
//! [`render_view`] takes the current navigation state and returns a [`View`];
//! turning it into HTML is left to [`html::render_page`].

pub mod config;
pub mod html;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::warn;

use crate::download::DownloadOffer;
use crate::fetch::read_local;
use crate::preview::{data_uri, PDF_MIME};
use crate::renderer::{CertificateRenderer, RenderResult};
use crate::{Error, Result};

pub use config::{PhotoConfig, Project, ResumeConfig, SiteConfig};

/// The three navigable sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Home,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Home, Section::Projects, Section::Contact];

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Projects => "Projects",
            Section::Contact => "Contact",
        }
    }

    /// Value used in the `section` query parameter
    pub fn slug(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Projects => "projects",
            Section::Contact => "contact",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Section::ALL
            .into_iter()
            .find(|sec| sec.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Config(format!("unknown section '{}'", s)))
    }
}

/// Everything the UI remembers between interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavState {
    pub section: Section,
}

impl NavState {
    pub fn new(section: Section) -> Self {
        Self { section }
    }
}

/// Sidebar navigation: the options and which one is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct Sidebar {
    pub title: String,
    pub options: Vec<Section>,
    pub selected: Section,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: &'static str,
    pub input: &'static str,
    pub placeholder: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactForm {
    pub action: String,
    pub method: &'static str,
    pub fields: Vec<FormField>,
}

impl ContactForm {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            method: "POST",
            fields: vec![
                FormField { name: "name", input: "text", placeholder: "Your name", required: true },
                FormField { name: "email", input: "email", placeholder: "Your email", required: true },
                FormField { name: "message", input: "textarea", placeholder: "Your message here...", required: true },
            ],
        }
    }
}

/// One element of a page, in display order.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Header(String),
    Subheader(String),
    Markdown(String),
    Image {
        data_uri: String,
        caption: String,
        width: u32,
    },
    Download {
        label: String,
        offer: DownloadOffer,
    },
    Warning(String),
    Certificate(RenderResult),
    ContactForm(ContactForm),
}

/// A fully described page.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub page_title: String,
    pub sidebar: Sidebar,
    pub blocks: Vec<Block>,
}

/// Build the view for the selected section.
pub fn render_view(nav: NavState, config: &SiteConfig, renderer: &CertificateRenderer) -> View {
    let blocks = match nav.section {
        Section::Home => home_blocks(config, renderer),
        Section::Projects => project_blocks(config),
        Section::Contact => contact_blocks(config),
    };
    View {
        page_title: config.page_title.clone(),
        sidebar: Sidebar {
            title: "Navigation".into(),
            options: Section::ALL.to_vec(),
            selected: nav.section,
        },
        blocks,
    }
}

fn home_blocks(config: &SiteConfig, renderer: &CertificateRenderer) -> Vec<Block> {
    let mut blocks = vec![
        Block::Title(format!("Hi, I'm {}", config.owner_name)),
        Block::Markdown(config.welcome.clone()),
    ];

    if let Some(photo) = &config.photo {
        match load_image(&photo.path) {
            Ok(uri) => blocks.push(Block::Image {
                data_uri: uri,
                caption: photo.caption.clone(),
                width: photo.width,
            }),
            Err(e) => {
                warn!("profile photo unavailable: {}", e);
                blocks.push(Block::Warning(format!(
                    "Profile picture not found. Please place '{}' in the app folder.",
                    photo.path.display()
                )));
            }
        }
    }

    if let Some(resume) = &config.resume {
        match read_local(&resume.path) {
            Ok(bytes) => blocks.push(Block::Download {
                label: resume.label.clone(),
                offer: DownloadOffer {
                    filename: resume.filename.clone(),
                    mime: PDF_MIME,
                    bytes,
                },
            }),
            Err(e) => {
                warn!("resume unavailable: {}", e);
                blocks.push(Block::Warning(format!(
                    "Resume file not found. Please place '{}' in the app folder.",
                    resume.path.display()
                )));
            }
        }
    }

    blocks.push(Block::Header("About Me".into()));
    blocks.push(Block::Markdown(about_markdown(config)));

    if !config.certificates.is_empty() {
        blocks.push(Block::Header("Certificates".into()));
        blocks.extend(
            renderer
                .render_all(&config.certificates)
                .into_iter()
                .map(Block::Certificate),
        );
    }
    blocks
}

fn about_markdown(config: &SiteConfig) -> String {
    let mut md = config.about.clone();
    if !config.employers.is_empty() {
        let employers: Vec<String> = config.employers.iter().map(|e| format!("**{}**", e)).collect();
        md.push_str(&format!("\n\n- I've worked with: {}", employers.join(", ")));
    }
    let mut reach = format!("[{0}](mailto:{0})", config.email);
    if let Some(linkedin) = &config.linkedin {
        reach.push_str(&format!(" | [LinkedIn]({})", linkedin));
    }
    md.push_str(&format!("\n- How to reach me: {}", reach));
    md
}

fn project_blocks(config: &SiteConfig) -> Vec<Block> {
    let mut blocks = vec![
        Block::Title("Projects".into()),
        Block::Markdown(config.projects_intro.clone()),
    ];
    for project in &config.projects {
        blocks.push(Block::Subheader(project.title.clone()));
        let mut md = format!("- **Description**: {}", project.description);
        if !project.tech_stack.is_empty() {
            md.push_str(&format!("\n- **Tech Stack**: {}", project.tech_stack.join(", ")));
        }
        blocks.push(Block::Markdown(md));
    }
    blocks
}

fn contact_blocks(config: &SiteConfig) -> Vec<Block> {
    vec![
        Block::Title("Contact Me".into()),
        Block::Markdown(config.contact_intro.clone()),
        Block::ContactForm(ContactForm::new(config.contact_action())),
    ]
}

/// Read and decode an image, returning it as a `data:` URI.
fn load_image(path: &Path) -> Result<String> {
    let bytes = read_local(path)?;
    let format = image::guess_format(&bytes).map_err(|e| Error::Decode(e.to_string()))?;
    image::load_from_memory_with_format(&bytes, format).map_err(|e| Error::Decode(e.to_string()))?;
    Ok(data_uri(format.to_mime_type(), &bytes))
}
