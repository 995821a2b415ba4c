use anyhow::{Context, Result};
use appshelf_core::Catalog;
use appshelf_generator::feedback::feedback_templates;
use std::fmt::Write;
use std::path::PathBuf;

use super::require_catalog;

/// Print the three feedback templates for one app.
///
/// `app` matches an app name (case-insensitive) or its route segment.
pub async fn run(path: PathBuf, app: String, json: bool) -> Result<()> {
    let catalog = require_catalog(&path)?;
    print!("{}", format_templates(&catalog, &app, json)?);
    Ok(())
}

fn format_templates(catalog: &Catalog, query: &str, json: bool) -> Result<String> {
    let app = catalog.find_app(query).with_context(|| {
        let names: Vec<&str> = catalog.apps.iter().map(|a| a.name.as_str()).collect();
        format!("No app matches '{}'. Known apps: {}", query, names.join(", "))
    })?;
    let templates = feedback_templates(&app.name);

    if json {
        let mut out = serde_json::to_string_pretty(&templates)?;
        out.push('\n');
        return Ok(out);
    }

    let mut out = String::new();
    for template in &templates {
        let _ = writeln!(out, "── {} ({}) ──", template.title, template.id.id());
        let _ = writeln!(out, "{}", template.template);
    }
    let _ = writeln!(out, "Paste into: {}", catalog.site.community_url);
    Ok(out)
}
