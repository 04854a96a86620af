//! Best-effort homepage screenshots via a headless Chromium subprocess.
//!
//! Screenshotting must never abort the overall workflow: every failure path
//! — no browser installed, navigation timeout, bot-blocked page, subprocess
//! crash — degrades to "no screenshot" and cleans up any partial image.
//!
//! The browser binary is discovered at runtime (`which`), mirroring how the
//! tool runner detects its script runtimes rather than linking one in.

use crate::error::Result;
use crate::{fetch, io, paths};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

const BROWSER_CANDIDATES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
];

/// Phrases that mark a WAF/bot-protection interstitial. A page containing
/// any of these (case-insensitive) is not worth screenshotting.
const DENY_MARKERS: &[&str] = &[
    "access denied",
    "you don't have permission",
    "request blocked",
    "service unavailable",
    "verify you are human",
    "captcha",
    "cloudflare",
    "akamai",
    "reference #",
];

/// Page-load deadline passed to the browser.
const NAV_TIMEOUT_MS: u32 = 45_000;
/// Virtual-time settle budget after the document loads.
const SETTLE_BUDGET_MS: u32 = 1_500;
/// Tall fixed window — the headless CLI captures the window, so this stands
/// in for a full-page shot.
const WINDOW_SIZE: &str = "1280,2000";

/// Find an installed headless-capable browser, in preference order.
pub fn detect_browser() -> Option<PathBuf> {
    BROWSER_CANDIDATES
        .iter()
        .find_map(|name| which::which(name).ok())
}

fn is_block_page(content: &str) -> bool {
    let lower = content.to_lowercase();
    DENY_MARKERS.iter().any(|m| lower.contains(m))
}

/// Capture a screenshot of `url` for `slug`.
///
/// Returns the site-relative reference path on success, `None` when the URL
/// is empty, no browser is available, the page is blocked, or anything at
/// all goes wrong.
pub fn capture(root: &Path, slug: &str, url: &str) -> Option<String> {
    if url.trim().is_empty() {
        return None;
    }
    let Some(browser) = detect_browser() else {
        debug!("no headless browser found; skipping screenshot");
        return None;
    };

    let url = fetch::normalize_url(url);
    let out_path = paths::screenshot_path(root, slug);

    match try_capture(&browser, &url, &out_path) {
        Ok(true) => Some(paths::screenshot_ref(slug)),
        Ok(false) => {
            cleanup(&out_path);
            None
        }
        Err(e) => {
            warn!("screenshot of {url} failed: {e}");
            cleanup(&out_path);
            None
        }
    }
}

fn try_capture(browser: &Path, url: &str, out_path: &Path) -> Result<bool> {
    // The headless CLI doesn't expose the HTTP status, so probe with the
    // fetcher's client first; 401/403 means a blocked page.
    if let Ok(resp) = fetch::http_client()?.get(url).send() {
        let status = resp.status().as_u16();
        if status == 401 || status == 403 {
            debug!("{url} answered {status}; treating as blocked");
            return Ok(false);
        }
    }

    // Render the DOM once to check for bot-protection interstitials.
    let dom = browser_cmd(browser).arg("--dump-dom").arg(url).output()?;
    if !dom.status.success() {
        debug!("browser exited {:?} while rendering {url}", dom.status.code());
        return Ok(false);
    }
    let content = String::from_utf8_lossy(&dom.stdout);
    if is_block_page(&content) {
        debug!("{url} looks bot-blocked; skipping screenshot");
        return Ok(false);
    }

    if let Some(parent) = out_path.parent() {
        io::ensure_dir(parent)?;
    }

    let shot = browser_cmd(browser)
        .arg(format!("--window-size={WINDOW_SIZE}"))
        .arg(format!("--screenshot={}", out_path.display()))
        .arg(url)
        .output()?;
    if !shot.status.success() || !out_path.exists() {
        return Ok(false);
    }

    Ok(true)
}

fn browser_cmd(browser: &Path) -> Command {
    let mut cmd = Command::new(browser);
    cmd.arg("--headless=new")
        .arg("--disable-gpu")
        .arg("--hide-scrollbars")
        .arg("--accept-lang=en-GB,en;q=0.9")
        .arg(format!("--timeout={NAV_TIMEOUT_MS}"))
        .arg(format!("--virtual-time-budget={SETTLE_BUDGET_MS}"));
    cmd
}

fn cleanup(path: &Path) {
    if path.exists() {
        let _ = std::fs::remove_file(path);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_url_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        assert_eq!(capture(dir.path(), "acme", ""), None);
        assert!(!dir.path().join("assets").exists());
    }

    #[test]
    fn detect_browser_does_not_panic() {
        // Result depends on the environment; only the call path is exercised.
        let _ = detect_browser();
    }

    #[test]
    fn block_markers_match_case_insensitively() {
        assert!(is_block_page("<h1>Access Denied</h1>"));
        assert!(is_block_page("protected by CLOUDFLARE"));
        assert!(is_block_page("Reference #18.4d0a1502"));
        assert!(!is_block_page("<h1>Welcome to Acme</h1>"));
    }

    #[test]
    fn cleanup_removes_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.png");
        std::fs::write(&path, b"half an image").unwrap();
        cleanup(&path);
        assert!(!path.exists());
    }
}
