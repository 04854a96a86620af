use crate::output::print_json;
use anyhow::Context;
use openai_agent::{SummaryClient, SummaryInput};
use showroom_core::manifest::Manifest;
use showroom_core::{fetch, io, issue, paths, screenshot, slug, template};
use std::path::Path;

/// The full creation workflow: parse → scaffold → fetch → summarize →
/// screenshot → render → manifest.
pub fn run(root: &Path, body: &str, json: bool) -> anyhow::Result<()> {
    if body.trim().is_empty() {
        println!("ISSUE_BODY is empty; nothing to do.");
        return Ok(());
    }

    let req = issue::parse_issue_body(body).context("failed to parse issue body")?;
    let slug = slug::slugify(&req.name);

    let company_dir = paths::company_dir(root, &slug);
    if company_dir.exists() {
        // Re-running the workflow for an existing company is a no-op, not an
        // error — issues get reopened and retriggered.
        println!("Company folder already exists: {}", company_dir.display());
        return Ok(());
    }

    let template_dir = paths::template_dir(root);
    if !template_dir.exists() {
        anyhow::bail!("template folder not found: {}", template_dir.display());
    }

    io::copy_dir(&template_dir, &company_dir).context("failed to scaffold company folder")?;

    let content = fetch::fetch_site_content(&req.website)
        .with_context(|| format!("failed to fetch '{}'", req.website))?;

    let summary = SummaryClient::from_env().summarize(&SummaryInput {
        company_name: req.name.clone(),
        website: req.website.clone(),
        tone: req.tone.clone(),
        page_title: content.title.clone(),
        meta_description: content.meta_description.clone(),
        page_text: content.text.clone(),
    });

    let mut shot = screenshot::capture(root, &slug, &req.website);
    // A blocked or failed capture can still show something when the page
    // offered an og:image.
    if shot.is_none() && !content.og_image.is_empty() {
        shot = Some(content.og_image.clone());
    }

    let template_html = std::fs::read_to_string(template_dir.join(paths::PAGE_FILE))
        .context("failed to read template page")?;
    let html = template::render(&template_html, &req, &slug, &summary, shot.as_deref());
    io::atomic_write(&paths::company_page(root, &slug), html.as_bytes())
        .context("failed to write company page")?;

    Manifest::upsert(root, &slug, &req.name, &summary).context("failed to update sites.json")?;

    if json {
        print_json(&serde_json::json!({
            "slug": slug,
            "name": req.name,
            "summary": summary,
            "screenshot": shot,
        }))?;
    } else {
        println!("Created {slug}/ with summary and assets updates.");
        if let Some(ref s) = shot {
            println!("Screenshot: {s}");
        }
    }
    Ok(())
}
