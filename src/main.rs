use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{Level, LevelFilter, Metadata, Record};

use folio::site::{html, render_view, NavState, Section, SiteConfig};
use folio::{CertificateRenderer, RenderResult};

#[derive(Parser)]
#[command(name = "folio", version, about = "Render a portfolio site with certificate previews")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the HTML page for one section
    Render {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value = "home")]
        section: Section,
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Fetch and preview every certificate and report the outcome
    Certs {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Serve the site over HTTP
    Serve {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value = "127.0.0.1:8501")]
        addr: String,
    },
    /// Write the default configuration as JSON
    Init {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}: {}", level_tag(record.level()), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn load_site(path: Option<&Path>) -> Result<SiteConfig> {
    match path {
        Some(p) => SiteConfig::from_path(p).with_context(|| format!("loading {}", p.display())),
        None => Ok(SiteConfig::default()),
    }
}

fn write_output(out: Option<&Path>, contents: &str) -> Result<()> {
    match out {
        Some(p) => std::fs::write(p, contents).with_context(|| format!("writing {}", p.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn report_certs(results: &[RenderResult], json: bool) -> Result<()> {
    if json {
        let rows: Vec<serde_json::Value> = results
            .iter()
            .map(|r| match r {
                RenderResult::Rendered { name, preview, download, open_url } => serde_json::json!({
                    "name": name,
                    "status": "ok",
                    "preview": preview.label(),
                    "filename": download.filename,
                    "sha256": download.sha256(),
                    "open_url": open_url,
                }),
                RenderResult::Failed { name, kind, message } => serde_json::json!({
                    "name": name,
                    "status": "failed",
                    "kind": kind,
                    "message": message,
                }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for r in results {
        match r {
            RenderResult::Rendered { name, preview, download, .. } => {
                println!("ok      {:<32} {:<7} {}", name, preview.label(), download.filename);
            }
            RenderResult::Failed { name, kind, message } => {
                println!("failed  {:<32} {}: {}", name, kind, message);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Render { config, section, out } => {
            let site = load_site(config.as_deref())?;
            let renderer = CertificateRenderer::new(site.renderer_config())?;
            let view = render_view(NavState::new(section), &site, &renderer);
            write_output(out.as_deref(), &html::render_page(&view))?;
        }
        Command::Certs { config, json } => {
            let site = load_site(config.as_deref())?;
            let renderer = CertificateRenderer::new(site.renderer_config())?;
            report_certs(&renderer.render_all(&site.certificates), json)?;
        }
        Command::Serve { config, addr } => {
            let site = load_site(config.as_deref())?;
            let renderer = CertificateRenderer::new(site.renderer_config())?;
            let server = folio::server::SiteServer::bind(&addr).with_context(|| format!("binding {}", addr))?;
            eprintln!("folio: serving on http://{}", server.addr());
            server.serve(&site, &renderer);
        }
        Command::Init { out } => {
            let json = serde_json::to_string_pretty(&SiteConfig::default())?;
            write_output(out.as_deref(), &format!("{}\n", json))?;
        }
    }
    Ok(())
}
