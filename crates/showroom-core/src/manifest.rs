//! The sites.json manifest that drives the landing page.
//!
//! Read at the start of a mutating operation, mutated in memory, rewritten
//! whole. Writes are atomic (tempfile + rename) so readers never see a torn
//! file, but there is no cross-invocation locking: concurrent runs are
//! last-writer-wins, an accepted limitation of the low-concurrency CI
//! trigger.

use crate::error::{Result, ShowroomError};
use crate::io;
use crate::paths;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_TAG: &str = "Demo";

// ---------------------------------------------------------------------------
// SiteEntry
// ---------------------------------------------------------------------------

/// One company in the directory. `id` is the folder slug, unique and
/// immutable once created. Every field except `id` tolerates absence on load
/// so sparse hand-edited manifests still parse; serialization always writes
/// the full shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteEntry {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default, rename = "logoUrl")]
    pub logo_url: String,
    #[serde(default)]
    pub archived: bool,
}

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub sites: Vec<SiteEntry>,
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

impl Manifest {
    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Strict load, for operations that must reference an existing record.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::sites_path(root);
        if !path.exists() {
            return Err(ShowroomError::ManifestMissing);
        }
        let raw = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Forgiving load, for creation-time paths: a missing or corrupt file
    /// starts from an empty manifest.
    pub fn load_or_default(root: &Path) -> Self {
        Self::load(root).unwrap_or_default()
    }

    /// Rewrite the whole file: 2-space indentation and a trailing newline,
    /// for readable version-control diffs.
    pub fn save(&self, root: &Path) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        io::atomic_write(&paths::sites_path(root), json.as_bytes())
    }

    pub fn find(&self, id: &str) -> Option<&SiteEntry> {
        self.sites.iter().find(|s| s.id == id)
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Insert or update the entry for `slug`.
    ///
    /// `name` and `description` are always overwritten; `tag` and `logoUrl`
    /// are only defaulted when currently unset, so values curated by hand
    /// survive re-runs. `path` is fixed at entry creation.
    pub fn upsert(root: &Path, slug: &str, name: &str, summary: &str) -> Result<()> {
        let mut manifest = Self::load_or_default(root);

        let idx = match manifest.sites.iter().position(|s| s.id == slug) {
            Some(i) => i,
            None => {
                manifest.sites.push(SiteEntry {
                    id: slug.to_string(),
                    path: format!("/{slug}/"),
                    ..SiteEntry::default()
                });
                manifest.sites.len() - 1
            }
        };

        let entry = &mut manifest.sites[idx];
        entry.name = name.to_string();
        entry.description = summary.to_string();
        if entry.tag.is_empty() {
            entry.tag = DEFAULT_TAG.to_string();
        }
        if entry.logo_url.is_empty() {
            entry.logo_url = paths::logo_url(slug);
        }

        manifest.updated = today();
        manifest.save(root)
    }

    /// Set or clear the archived flag on an existing entry.
    ///
    /// Unlike `upsert`, this is strict: the manifest must exist and the
    /// entry must be present, otherwise the file is left untouched.
    pub fn toggle_archived(root: &Path, slug: &str, archived: bool) -> Result<()> {
        let mut manifest = Self::load(root)?;

        let entry = manifest
            .sites
            .iter_mut()
            .find(|s| s.id == slug)
            .ok_or_else(|| ShowroomError::CompanyNotFound(slug.to_string()))?;
        entry.archived = archived;

        manifest.updated = today();
        manifest.save(root)
    }

    /// Rebuild the manifest from the filesystem: every top-level folder with
    /// an index.html (infrastructure folders excluded) becomes an entry,
    /// preserving previously-known values per id. Folders gone from disk are
    /// dropped — a full, destructive resync.
    pub fn regenerate(root: &Path) -> Result<usize> {
        let dirs = detect_company_dirs(root)?;
        let previous: HashMap<String, SiteEntry> = Self::load_or_default(root)
            .sites
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();

        let sites: Vec<SiteEntry> = dirs
            .into_iter()
            .map(|d| {
                let old = previous.get(&d);
                SiteEntry {
                    name: old
                        .map(|o| o.name.clone())
                        .filter(|n| !n.is_empty())
                        .unwrap_or_else(|| title_case(&d)),
                    path: format!("/{d}/"),
                    description: old.map(|o| o.description.clone()).unwrap_or_default(),
                    tag: old
                        .map(|o| o.tag.clone())
                        .filter(|t| !t.is_empty())
                        .unwrap_or_else(|| DEFAULT_TAG.to_string()),
                    logo_url: old
                        .map(|o| o.logo_url.clone())
                        .filter(|u| !u.is_empty())
                        .unwrap_or_else(|| paths::logo_url(&d)),
                    archived: old.map(|o| o.archived).unwrap_or(false),
                    id: d,
                }
            })
            .collect();

        let manifest = Manifest {
            updated: today(),
            sites,
        };
        manifest.save(root)?;
        Ok(manifest.sites.len())
    }
}

// ---------------------------------------------------------------------------
// Filesystem scan
// ---------------------------------------------------------------------------

/// Top-level folders that contain a page file, sorted alphabetically. This
/// is the authoritative set of companies for `regenerate`.
pub fn detect_company_dirs(root: &Path) -> Result<Vec<String>> {
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if name.starts_with('.') || paths::EXCLUDED_DIRS.contains(&name.as_str()) {
            continue;
        }
        if entry.path().join(paths::PAGE_FILE).exists() {
            dirs.push(name);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// "acme-co" → "Acme Co", the display-name default for folders the manifest
/// has never seen.
fn title_case(slug: &str) -> String {
    slug.split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
