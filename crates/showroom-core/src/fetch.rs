//! Site content fetcher.
//!
//! Retrieves a company's homepage and extracts a lightweight text signal for
//! summarization: page title, meta description, an `og:image` hint, and the
//! cleaned visible text of the main content area.

use crate::error::Result;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

/// Character budget for extracted page text.
pub const MAX_TEXT_CHARS: usize = 12_000;

const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

pub(crate) const USER_AGENT: &str =
    "Mozilla/5.0 (compatible; GitHubActionsBot/1.0; +https://github.com/)";

/// Elements whose subtrees carry no visible text signal.
const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "svg"];

// ---------------------------------------------------------------------------
// SiteContent
// ---------------------------------------------------------------------------

/// Everything we pull out of a company homepage. All fields are empty when no
/// URL was supplied — not every company has a public site.
#[derive(Debug, Clone, Default)]
pub struct SiteContent {
    pub title: String,
    pub meta_description: String,
    pub text: String,
    pub og_image: String,
}

// ---------------------------------------------------------------------------
// URL normalization
// ---------------------------------------------------------------------------

/// Prefix `https://` when the value has no scheme. Empty stays empty.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let lower = trimmed.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

pub(crate) fn http_client() -> Result<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()?)
}

/// Fetch the page at `url` and extract its content.
///
/// A single GET with a fixed timeout, following redirects; a non-success
/// final status is a fatal error — there is no retry at this layer, unlike
/// the summary client. An empty `url` yields empty content, not an error.
pub fn fetch_site_content(url: &str) -> Result<SiteContent> {
    fetch_site_content_with_budget(url, MAX_TEXT_CHARS)
}

pub fn fetch_site_content_with_budget(url: &str, max_chars: usize) -> Result<SiteContent> {
    if url.trim().is_empty() {
        return Ok(SiteContent::default());
    }
    let url = normalize_url(url);
    debug!("fetching {url}");
    let resp = http_client()?.get(&url).send()?.error_for_status()?;
    let html = resp.text()?;
    Ok(extract(&html, max_chars))
}

// ---------------------------------------------------------------------------
// HTML extraction
// ---------------------------------------------------------------------------

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Extract title, meta description, og:image, and cleaned main-content text
/// from raw HTML. Pure; all the network-free behavior lives here.
pub fn extract(html: &str, max_chars: usize) -> SiteContent {
    let doc = Html::parse_document(html);

    let title = doc
        .select(&selector("title"))
        .next()
        .map(joined_text)
        .unwrap_or_default();

    let meta_description = meta_content(&doc, r#"meta[name="description" i]"#);
    let og_image = meta_content(&doc, r#"meta[property="og:image" i]"#);

    // Prefer main/article for the text signal; fall back to body, then the
    // whole document.
    let content_root = doc
        .select(&selector("main, article"))
        .next()
        .or_else(|| doc.select(&selector("body")).next())
        .unwrap_or_else(|| doc.root_element());

    let mut lines = Vec::new();
    collect_text(content_root, &mut lines);
    let text = clean_text(&lines.join("\n"), max_chars);

    SiteContent {
        title,
        meta_description,
        text,
        og_image,
    }
}

fn meta_content(doc: &Html, css: &str) -> String {
    doc.select(&selector(css))
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Element text with all whitespace runs collapsed to single spaces.
fn joined_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Walk the subtree collecting trimmed text fragments, skipping elements
/// that never contribute visible text.
fn collect_text(el: ElementRef<'_>, lines: &mut Vec<String>) {
    for child in el.children() {
        match child.value() {
            Node::Text(t) => {
                let t = t.trim();
                if !t.is_empty() {
                    lines.push(t.to_string());
                }
            }
            Node::Element(e) => {
                if !SKIP_TAGS.contains(&e.name()) {
                    if let Some(child_el) = ElementRef::wrap(child) {
                        collect_text(child_el, lines);
                    }
                }
            }
            _ => {}
        }
    }
}

static SPACES_RE: OnceLock<Regex> = OnceLock::new();
static BLANKS_RE: OnceLock<Regex> = OnceLock::new();

/// Collapse whitespace runs and clamp to the character budget, appending an
/// ellipsis marker when truncated.
fn clean_text(text: &str, max_chars: usize) -> String {
    let spaces = SPACES_RE.get_or_init(|| Regex::new(r"[ \t]+").unwrap());
    let blanks = BLANKS_RE.get_or_init(|| Regex::new(r"\n{3,}").unwrap());

    let text = spaces.replace_all(text, " ");
    let text = blanks.replace_all(&text, "\n\n");
    let text = text.trim();

    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut clamped: String = text.chars().take(max_chars).collect();
    clamped.push('…');
    clamped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
          <head>
            <title>Acme —
              Widgets</title>
            <meta name="Description" content=" Industrial widgets since 1949. ">
            <meta property="og:image" content="https://acme.com/hero.png">
          </head>
          <body>
            <nav>Home About</nav>
            <main>
              <script>var tracking = true;</script>
              <style>.h { display: none }</style>
              <h1>Acme</h1>
              <p>We   make    widgets.</p>
            </main>
          </body>
        </html>
    "#;

    #[test]
    fn extracts_title_and_meta() {
        let content = extract(PAGE, MAX_TEXT_CHARS);
        assert_eq!(content.title, "Acme — Widgets");
        assert_eq!(content.meta_description, "Industrial widgets since 1949.");
        assert_eq!(content.og_image, "https://acme.com/hero.png");
    }

    #[test]
    fn prefers_main_and_skips_scripts() {
        let content = extract(PAGE, MAX_TEXT_CHARS);
        assert!(content.text.contains("Acme"));
        assert!(content.text.contains("We make widgets."));
        assert!(!content.text.contains("tracking"));
        assert!(!content.text.contains("display"));
        // nav lives outside <main>
        assert!(!content.text.contains("Home About"));
    }

    #[test]
    fn falls_back_to_body_without_main() {
        let content = extract("<html><body><p>plain body</p></body></html>", MAX_TEXT_CHARS);
        assert_eq!(content.text, "plain body");
        assert_eq!(content.title, "");
    }

    #[test]
    fn truncates_to_budget_with_marker() {
        let html = format!("<html><body><p>{}</p></body></html>", "x".repeat(20_000));
        let content = extract(&html, MAX_TEXT_CHARS);
        assert_eq!(content.text.chars().count(), MAX_TEXT_CHARS + 1);
        assert!(content.text.ends_with('…'));
    }

    #[test]
    fn blank_lines_collapse() {
        let html = "<html><body><p>a</p><p></p><p></p><p></p><p>b</p></body></html>";
        let content = extract(html, MAX_TEXT_CHARS);
        assert!(!content.text.contains("\n\n\n"));
    }

    #[test]
    fn normalize_url_adds_scheme() {
        assert_eq!(normalize_url("acme.com"), "https://acme.com");
        assert_eq!(normalize_url("  acme.com  "), "https://acme.com");
        assert_eq!(normalize_url("http://acme.com"), "http://acme.com");
        assert_eq!(normalize_url("HTTPS://acme.com"), "HTTPS://acme.com");
        assert_eq!(normalize_url(""), "");
    }

    #[test]
    fn empty_url_yields_empty_content() {
        let content = fetch_site_content("").unwrap();
        assert!(content.title.is_empty());
        assert!(content.meta_description.is_empty());
        assert!(content.text.is_empty());
        assert!(content.og_image.is_empty());
    }

    #[test]
    fn fetches_over_http() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("<html><head><title>Mock Co</title></head><body><main>hello</main></body></html>")
            .create();

        let content = fetch_site_content(&server.url()).unwrap();
        assert_eq!(content.title, "Mock Co");
        assert_eq!(content.text, "hello");
    }

    #[test]
    fn non_success_status_is_fatal() {
        let mut server = mockito::Server::new();
        let _m = server.mock("GET", "/").with_status(503).create();

        assert!(fetch_site_content(&server.url()).is_err());
    }
}
