//! Template renderer for company pages.
//!
//! Two constructs, nothing more: named conditional blocks
//! (`{#IF_NAME}…{/IF_NAME}`) and literal placeholder tokens
//! (`{{COMPANY_NAME}}` etc.). Output is written verbatim — issue authors are
//! trusted, so no HTML escaping is performed.

use crate::issue::CompanyRequest;
use crate::paths;
use regex::Regex;

/// Keep or drop a `{#IF_<name>}…{/IF_<name>}` block. When kept, only the
/// delimiters are removed.
fn strip_block(html: &str, name: &str, keep: bool) -> String {
    let pattern = format!(r"(?s)\{{\#IF_{name}\}}(.*?)\{{/IF_{name}\}}");
    let re = Regex::new(&pattern).unwrap();
    re.replace_all(html, |caps: &regex::Captures<'_>| {
        if keep {
            caps[1].to_string()
        } else {
            String::new()
        }
    })
    .into_owned()
}

/// Instantiate a company page from the template HTML.
///
/// Conditional blocks are resolved first (website present? screenshot
/// present?), then every placeholder token is substituted, empty string for
/// absent values.
pub fn render(
    template_html: &str,
    company: &CompanyRequest,
    slug: &str,
    summary: &str,
    screenshot: Option<&str>,
) -> String {
    let mut html = template_html.to_string();

    html = strip_block(&html, "WEBSITE", !company.website.is_empty());
    html = strip_block(&html, "SCREENSHOT", screenshot.is_some());

    let replacements = [
        ("{{COMPANY_NAME}}", company.name.as_str()),
        ("{{COMPANY_WEBSITE}}", company.website.as_str()),
        ("{{COMPANY_SUMMARY}}", summary),
        ("{{COMPANY_TONE}}", company.tone.as_str()),
        ("{{LOGO_URL}}", &paths::logo_url(slug)),
        ("{{S3_BUCKET_HINT}}", &paths::s3_bucket_hint(slug)),
        ("{{S3_LOGO_HINT}}", &paths::s3_logo_hint(slug)),
        ("{{SCREENSHOT_PATH}}", screenshot.unwrap_or("")),
    ];

    for (token, value) in replacements {
        html = html.replace(token, value);
    }

    html
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
