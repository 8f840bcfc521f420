//! HTML rendering of a [`View`].

use std::fmt::Write as _;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::{Block, ContactForm, View};
use crate::preview::{data_uri, PreviewHandle};
use crate::renderer::RenderResult;

const STYLE: &str = r#"
body { margin: 0; font-family: sans-serif; display: flex; }
nav { width: 14rem; min-height: 100vh; padding: 1rem; background: #f0f2f6; }
nav a { display: block; padding: 0.3rem 0; color: inherit; text-decoration: none; }
nav a.selected { font-weight: bold; }
nav a.selected::before { content: "\25C9  "; }
nav a:not(.selected)::before { content: "\25CB  "; }
main { flex: 1; padding: 1rem 3rem; }
.warning { background: #fffce7; border-left: 4px solid #f0ad4e; padding: 0.6rem 1rem; }
.error { background: #ffecec; border-left: 4px solid #d9534f; padding: 0.6rem 1rem; }
.certificate { margin-bottom: 1.5rem; }
.certificate iframe, .certificate embed { width: 100%; height: 600px; border: none; }
.certificate img { max-width: 100%; display: block; margin-bottom: 0.5rem; }
form { display: flex; flex-direction: column; }
input, textarea { margin-bottom: 10px; padding: 10px; font-size: 1rem; width: 100%; }
button { padding: 10px; background-color: #4CAF50; color: white; border: none; font-size: 1rem; }
"#;

/// Render a full HTML document for `view`.
pub fn render_page(view: &View) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n",
        escape(&view.page_title),
        STYLE
    );

    let _ = writeln!(out, "<nav>\n<h2>{}</h2>", escape(&view.sidebar.title));
    for section in &view.sidebar.options {
        let class = if *section == view.sidebar.selected { " class=\"selected\"" } else { "" };
        let _ = writeln!(out, "<a href=\"?section={}\"{}>{}</a>", section.slug(), class, section.label());
    }
    out.push_str("</nav>\n<main>\n");

    for block in &view.blocks {
        render_block(&mut out, block);
    }

    out.push_str("</main>\n</body>\n</html>\n");
    out
}

fn render_block(out: &mut String, block: &Block) {
    match block {
        Block::Title(t) => {
            let _ = writeln!(out, "<h1>{}</h1>", escape(t));
        }
        Block::Header(t) => {
            let _ = writeln!(out, "<h2>{}</h2>", escape(t));
        }
        Block::Subheader(t) => {
            let _ = writeln!(out, "<h3>{}</h3>", escape(t));
        }
        Block::Markdown(md) => out.push_str(&markdown(md)),
        Block::Image { data_uri, caption, width } => {
            let _ = writeln!(
                out,
                "<figure><img src=\"{}\" width=\"{}\" alt=\"{}\"><figcaption>{}</figcaption></figure>",
                data_uri,
                width,
                escape(caption),
                escape(caption)
            );
        }
        Block::Download { label, offer } => {
            let _ = writeln!(
                out,
                "<p><a download=\"{}\" href=\"{}\">{}</a></p>",
                escape(&offer.filename),
                data_uri(offer.mime, &offer.bytes),
                escape(label)
            );
        }
        Block::Warning(w) => {
            let _ = writeln!(out, "<div class=\"warning\">{}</div>", escape(w));
        }
        Block::Certificate(result) => render_certificate(out, result),
        Block::ContactForm(form) => render_form(out, form),
    }
}

fn render_certificate(out: &mut String, result: &RenderResult) {
    match result {
        RenderResult::Rendered {
            name,
            preview,
            download,
            open_url,
        } => {
            let _ = writeln!(out, "<section class=\"certificate\">\n<h3>{}</h3>", escape(name));
            match preview {
                PreviewHandle::Embed { data_uri } => {
                    let _ = writeln!(out, "<embed src=\"{}\" type=\"application/pdf\">", data_uri);
                }
                PreviewHandle::Viewer { url } => {
                    let _ = writeln!(out, "<iframe src=\"{}\"></iframe>", escape(url));
                }
                PreviewHandle::Pages(pages) => {
                    for page in pages {
                        let _ = writeln!(
                            out,
                            "<img src=\"data:image/png;base64,{}\" width=\"{}\" height=\"{}\" alt=\"{} page {}\">",
                            STANDARD.encode(&page.png),
                            page.width,
                            page.height,
                            escape(name),
                            page.index + 1
                        );
                    }
                }
            }
            let _ = writeln!(
                out,
                "<a download=\"{}\" href=\"{}\">Download {}</a>",
                escape(&download.filename),
                data_uri(download.mime, &download.bytes),
                escape(&download.filename)
            );
            if let Some(url) = open_url {
                let _ = writeln!(out, " | <a href=\"{}\" target=\"_blank\" rel=\"noopener\">Open in new tab</a>", escape(url));
            }
            out.push_str("</section>\n");
        }
        RenderResult::Failed { name, kind, message } => {
            let _ = writeln!(
                out,
                "<div class=\"error\"><strong>{}</strong>: could not display certificate ({}). {}</div>",
                escape(name),
                kind,
                escape(message)
            );
        }
    }
}

fn render_form(out: &mut String, form: &ContactForm) {
    let _ = writeln!(out, "<form action=\"{}\" method=\"{}\">", escape(&form.action), form.method);
    for field in &form.fields {
        let required = if field.required { " required" } else { "" };
        if field.input == "textarea" {
            let _ = writeln!(
                out,
                "<textarea name=\"{}\" placeholder=\"{}\"{}></textarea>",
                field.name,
                escape(field.placeholder),
                required
            );
        } else {
            let _ = writeln!(
                out,
                "<input type=\"{}\" name=\"{}\" placeholder=\"{}\"{}>",
                field.input,
                field.name,
                escape(field.placeholder),
                required
            );
        }
    }
    out.push_str("<button type=\"submit\">Send</button>\n</form>\n");
}

/// Escape text for use in HTML content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Render the small markdown subset used by page text: paragraphs,
/// `- ` list items, `**bold**` and `[label](url)` links.
pub fn markdown(md: &str) -> String {
    let mut out = String::new();
    let mut in_list = false;
    let mut paragraph: Vec<&str> = Vec::new();

    let flush = |out: &mut String, paragraph: &mut Vec<&str>| {
        if !paragraph.is_empty() {
            let _ = writeln!(out, "<p>{}</p>", inline(&paragraph.join(" ")));
            paragraph.clear();
        }
    };

    for line in md.lines().map(str::trim) {
        if let Some(item) = line.strip_prefix("- ") {
            flush(&mut out, &mut paragraph);
            if !in_list {
                out.push_str("<ul>\n");
                in_list = true;
            }
            let _ = writeln!(out, "<li>{}</li>", inline(item));
            continue;
        }
        if in_list {
            out.push_str("</ul>\n");
            in_list = false;
        }
        if line.is_empty() {
            flush(&mut out, &mut paragraph);
        } else {
            paragraph.push(line);
        }
    }
    flush(&mut out, &mut paragraph);
    if in_list {
        out.push_str("</ul>\n");
    }
    out
}

fn inline(text: &str) -> String {
    let mut out = String::new();
    let mut rest = text;
    let mut bold = false;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("**") {
            out.push_str(if bold { "</strong>" } else { "<strong>" });
            bold = !bold;
            rest = after;
            continue;
        }
        if rest.starts_with('[') {
            if let Some((label, url, after)) = split_link(rest) {
                let _ = write!(out, "<a href=\"{}\">{}</a>", escape(url), escape(label));
                rest = after;
                continue;
            }
        }
        let ch = rest.chars().next().unwrap_or_default();
        out.push_str(&escape(ch.encode_utf8(&mut [0u8; 4])));
        rest = &rest[ch.len_utf8()..];
    }
    if bold {
        out.push_str("</strong>");
    }
    out
}

/// Split `[label](url)rest` into its parts.
///
/// The label ends at the first `]` and must be followed directly by `(`.
fn split_link(s: &str) -> Option<(&str, &str, &str)> {
    let close = s.find(']')?;
    let label = &s[1..close];
    if label.contains('[') {
        return None;
    }
    let tail = s[close + 1..].strip_prefix('(')?;
    let end = tail.find(')')?;
    Some((label, &tail[..end], &tail[end + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::DownloadOffer;
    use crate::renderer::FailureKind;
    use crate::site::{NavState, Section, Sidebar};

    fn view(blocks: Vec<Block>) -> View {
        View {
            page_title: "My <Portfolio>".into(),
            sidebar: Sidebar {
                title: "Navigation".into(),
                options: Section::ALL.to_vec(),
                selected: NavState::new(Section::Projects).section,
            },
            blocks,
        }
    }

    #[test]
    fn markdown_renders_lists_bold_and_links() {
        let html = markdown("I'm a **Data Analyst**.\n\n- one\n- reach: [mail](mailto:a@b.c)");
        assert_eq!(
            html,
            "<p>I&#39;m a <strong>Data Analyst</strong>.</p>\n<ul>\n<li>one</li>\n<li>reach: <a href=\"mailto:a@b.c\">mail</a></li>\n</ul>\n"
        );
    }

    #[test]
    fn unmatched_link_syntax_is_plain_text() {
        assert_eq!(inline("[not a link"), "[not a link");
    }

    #[test]
    fn bracketed_text_before_link_stays_plain() {
        assert_eq!(
            markdown("See [draft] and [site](https://x.y)"),
            "<p>See [draft] and <a href=\"https://x.y\">site</a></p>\n"
        );
        assert_eq!(inline("[a] (b)"), "[a] (b)");
    }

    #[test]
    fn page_marks_selected_section_and_escapes() {
        let html = render_page(&view(vec![Block::Warning("<b>missing</b>".into())]));
        assert!(html.contains("<title>My &lt;Portfolio&gt;</title>"));
        assert!(html.contains("<a href=\"?section=projects\" class=\"selected\">Projects</a>"));
        assert!(html.contains("<a href=\"?section=home\">Home</a>"));
        assert!(html.contains("<div class=\"warning\">&lt;b&gt;missing&lt;/b&gt;</div>"));
    }

    #[test]
    fn certificates_render_preview_download_and_failure() {
        let html = render_page(&view(vec![
            Block::Certificate(RenderResult::Rendered {
                name: "Intermediate Python".into(),
                preview: PreviewHandle::Viewer {
                    url: "https://viewer/?url=x&embedded=true".into(),
                },
                download: DownloadOffer {
                    filename: "Intermediate_Python.pdf".into(),
                    mime: "application/pdf",
                    bytes: b"%PDF".to_vec(),
                },
                open_url: Some("https://host/py.pdf".into()),
            }),
            Block::Certificate(RenderResult::Failed {
                name: "SQL".into(),
                kind: FailureKind::NetworkFailure,
                message: "Network error: refused".into(),
            }),
        ]));
        assert!(html.contains("<iframe src=\"https://viewer/?url=x&amp;embedded=true\"></iframe>"));
        assert!(html.contains("download=\"Intermediate_Python.pdf\" href=\"data:application/pdf;base64,JVBERg==\""));
        assert!(html.contains("target=\"_blank\""));
        assert!(html.contains("<strong>SQL</strong>: could not display certificate (network failure)"));
    }

    #[test]
    fn contact_form_has_required_fields() {
        let html = render_page(&view(vec![Block::ContactForm(ContactForm::new("https://formsubmit.co/x@y.z"))]));
        assert!(html.contains("<form action=\"https://formsubmit.co/x@y.z\" method=\"POST\">"));
        assert!(html.contains("<input type=\"email\" name=\"email\" placeholder=\"Your email\" required>"));
        assert!(html.contains("<textarea name=\"message\""));
        assert!(html.contains("background-color: #4CAF50"));
    }
}
