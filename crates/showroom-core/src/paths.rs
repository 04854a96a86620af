use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const TEMPLATE_DIR: &str = "company-template";
pub const ASSETS_DIR: &str = "assets";
pub const SITES_FILE: &str = "assets/sites.json";
pub const SCREENSHOTS_DIR: &str = "assets/screenshots";

pub const PAGE_FILE: &str = "index.html";

/// Top-level folders that are never company sites, even when they happen to
/// contain an `index.html` (the template folder does).
pub const EXCLUDED_DIRS: &[&str] = &[".git", ".github", "assets", "scripts", TEMPLATE_DIR];

/// Bucket all externally hosted company assets live under, keyed by slug.
pub const S3_BASE: &str = "https://sfdcdemoimages.s3.eu-west-1.amazonaws.com";
pub const S3_BUCKET: &str = "sfdcdemoimages";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn template_dir(root: &Path) -> PathBuf {
    root.join(TEMPLATE_DIR)
}

pub fn assets_dir(root: &Path) -> PathBuf {
    root.join(ASSETS_DIR)
}

pub fn sites_path(root: &Path) -> PathBuf {
    root.join(SITES_FILE)
}

pub fn screenshots_dir(root: &Path) -> PathBuf {
    root.join(SCREENSHOTS_DIR)
}

pub fn company_dir(root: &Path, slug: &str) -> PathBuf {
    root.join(slug)
}

pub fn company_page(root: &Path, slug: &str) -> PathBuf {
    company_dir(root, slug).join(PAGE_FILE)
}

pub fn screenshot_path(root: &Path, slug: &str) -> PathBuf {
    screenshots_dir(root).join(format!("{slug}.png"))
}

/// Site-relative reference written into pages and the manifest.
pub fn screenshot_ref(slug: &str) -> String {
    format!("/{SCREENSHOTS_DIR}/{slug}.png")
}

// ---------------------------------------------------------------------------
// Asset URL conventions
// ---------------------------------------------------------------------------

pub fn logo_url(slug: &str) -> String {
    format!("{S3_BASE}/{slug}/logo.png")
}

pub fn s3_bucket_hint(slug: &str) -> String {
    format!("s3://{S3_BUCKET}/{slug}/")
}

pub fn s3_logo_hint(slug: &str) -> String {
    format!("{slug}/logo.png")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
