use crate::output::print_json;
use anyhow::Context;
use showroom_core::issue::{self, IssueAction};
use showroom_core::manifest::Manifest;
use std::path::Path;

pub fn run(root: &Path, title: &str, body: &str, json: bool) -> anyhow::Result<()> {
    let (action, company_id) = issue::parse_issue(title, body)?;

    Manifest::toggle_archived(root, &company_id, action == IssueAction::Archive)
        .with_context(|| format!("failed to {action} '{company_id}'"))?;

    if json {
        print_json(&serde_json::json!({
            "action": action.as_str(),
            "id": company_id,
        }))?;
    } else {
        println!("{} OK: {company_id}", action.as_str().to_uppercase());
    }
    Ok(())
}
