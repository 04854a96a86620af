//! Labeled-field parsing of issue-tracker text.
//!
//! Issues are filled in by humans via an issue template, so parsing is
//! deliberately permissive: case-insensitive `**Field:** value` matching
//! rather than a strict grammar.

use crate::error::{Result, ShowroomError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// CompanyRequest
// ---------------------------------------------------------------------------

/// A request to create a new demo company, parsed from an issue body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRequest {
    pub name: String,
    pub website: String,
    pub tone: String,
}

// ---------------------------------------------------------------------------
// IssueAction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueAction {
    Archive,
    Restore,
}

impl IssueAction {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueAction::Archive => "archive",
            IssueAction::Restore => "restore",
        }
    }
}

impl fmt::Display for IssueAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

static COMPANY_ID_RE: OnceLock<Regex> = OnceLock::new();

fn company_id_re() -> &'static Regex {
    COMPANY_ID_RE
        .get_or_init(|| Regex::new(r"(?i)\*\*Company id:\*\*\s*([a-z0-9\-]+)").unwrap())
}

/// Find a `**Field:** value` line in the body, case-insensitively.
/// Returns the trimmed remainder of the line, or an empty string.
fn labeled_field(body: &str, field: &str) -> String {
    let pattern = format!(r"(?i)\*\*{}:\*\*\s*(.+)", regex::escape(field));
    let re = Regex::new(&pattern).unwrap();
    re.captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Parse an archive/restore issue.
///
/// The title selects the action ("Archive company: …" / "Restore company: …",
/// case-insensitive) and the body must carry `**Company id:** <slug>`.
pub fn parse_issue(title: &str, body: &str) -> Result<(IssueAction, String)> {
    let title = title.trim();

    let action = if title.to_lowercase().starts_with("archive company:") {
        Some(IssueAction::Archive)
    } else if title.to_lowercase().starts_with("restore company:") {
        Some(IssueAction::Restore)
    } else {
        None
    };

    let company_id = company_id_re()
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    match (action, company_id) {
        (Some(action), id) if !id.is_empty() => Ok((action, id)),
        _ => Err(ShowroomError::UnparsableIssue),
    }
}

/// Parse a company-creation issue body.
///
/// Expects lines like:
/// ```text
/// **Company name:** Acme Ltd
/// **Website:** https://acme.com
/// **Tone:** Professional
/// ```
pub fn parse_issue_body(body: &str) -> Result<CompanyRequest> {
    let name = labeled_field(body, "Company name");
    let mut website = labeled_field(body, "Website");
    let tone = labeled_field(body, "Tone");

    if name.is_empty() {
        return Err(ShowroomError::MissingCompanyName);
    }

    // The issue template uses "-" for "no public website".
    if website == "-" {
        website = String::new();
    }

    Ok(CompanyRequest {
        name,
        website,
        tone: if tone.is_empty() {
            "Professional".to_string()
        } else {
            tone
        },
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
