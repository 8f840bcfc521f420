//! Minimal HTTP front end: `GET /?section=<home|projects|contact>`.
//!
//! Requests are handled one at a time on the calling thread, so every page
//! render sees the renderer and its cache without contention.

use std::io;

use log::{info, warn};
use tiny_http::{Header, Request, Response, Server};

use crate::renderer::CertificateRenderer;
use crate::site::{html, render_view, NavState, Section, SiteConfig};
use crate::{Error, Result};

/// Response produced for a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.into(),
        }
    }
}

/// Route a request URL (path plus query) to a page.
pub fn route(raw_url: &str, site: &SiteConfig, renderer: &CertificateRenderer) -> Reply {
    let Ok(url) = url::Url::parse("http://localhost").and_then(|base| base.join(raw_url)) else {
        return Reply::text(400, "Bad request");
    };
    if url.path() != "/" {
        return Reply::text(404, "Not Found");
    }

    let section = match url.query_pairs().find(|(k, _)| k == "section") {
        Some((_, v)) => match v.parse::<Section>() {
            Ok(s) => s,
            Err(e) => return Reply::text(400, e.to_string()),
        },
        None => Section::default(),
    };

    let view = render_view(NavState::new(section), site, renderer);
    Reply {
        status: 200,
        content_type: "text/html; charset=utf-8",
        body: html::render_page(&view),
    }
}

pub struct SiteServer {
    server: Server,
}

impl SiteServer {
    pub fn bind(addr: &str) -> Result<Self> {
        let server = Server::http(addr).map_err(|e| Error::Io(io::Error::other(e.to_string())))?;
        Ok(Self { server })
    }

    /// Bound address, e.g. `127.0.0.1:8501`
    pub fn addr(&self) -> String {
        self.server.server_addr().to_string()
    }

    /// Handle requests until the listener shuts down.
    pub fn serve(&self, site: &SiteConfig, renderer: &CertificateRenderer) {
        for request in self.server.incoming_requests() {
            handle(request, site, renderer);
        }
    }

    /// Block for a single request and answer it.
    pub fn serve_one(&self, site: &SiteConfig, renderer: &CertificateRenderer) -> Result<()> {
        let request = self.server.recv()?;
        handle(request, site, renderer);
        Ok(())
    }
}

fn handle(request: Request, site: &SiteConfig, renderer: &CertificateRenderer) {
    let reply = route(request.url(), site, renderer);
    info!("{} {} -> {}", request.method(), request.url(), reply.status);

    let mut response = Response::from_string(reply.body).with_status_code(reply.status);
    if let Ok(h) = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes()) {
        response = response.with_header(h);
    }
    if let Err(e) = request.respond(response) {
        warn!("failed to send response: {}", e);
    }
}
