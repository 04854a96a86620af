use crate::output::print_json;
use anyhow::Context;
use showroom_core::manifest::Manifest;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let count = Manifest::regenerate(root).context("failed to regenerate sites.json")?;

    if json {
        print_json(&serde_json::json!({ "sites": count }))?;
    } else {
        println!("Regenerated assets/sites.json with {count} site(s)");
    }
    Ok(())
}
