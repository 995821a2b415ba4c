use anyhow::{Context, Result};
use appshelf_generator::{generate_site, render::RenderOptions};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::require_catalog;

/// Counts reported after a build
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub generated_assets: usize,
    pub copied_assets: usize,
}

/// Build static site for deployment
pub async fn run(path: PathBuf, output: PathBuf) -> Result<()> {
    println!("🔨 Building static site...");
    println!("   Source: {}", path.display());
    println!("   Output: {}", output.display());
    println!();

    let summary = build_static_site(&path, &output, &RenderOptions::build())?;

    println!("   ✓ Rendered {} pages", summary.pages);
    println!("   ✓ Generated {} support files", summary.generated_assets);
    println!("   ✓ Copied {} asset files", summary.copied_assets);
    println!();
    println!("✅ Build complete!");
    println!("   Output: {}", output.display());
    println!();
    println!("To test locally:");
    println!("   cd {} && python3 -m http.server 8000", output.display());
    println!();

    Ok(())
}

/// Render the catalog at `path` into `output`.
pub fn build_static_site(path: &Path, output: &Path, options: &RenderOptions) -> Result<BuildSummary> {
    let catalog = require_catalog(path)?;
    tracing::debug!(apps = catalog.apps.len(), pages = catalog.pages.len(), "catalog loaded");

    let site = generate_site(&catalog, path, options)?;

    fs::create_dir_all(output).context("Failed to create output directory")?;

    for (file, html) in &site.pages {
        write_file(&output.join(file), html.as_bytes())?;
    }
    for (file, data) in &site.assets {
        write_file(&output.join(file), data)?;
    }

    let copied_assets = copy_assets(&path.join("assets"), &output.join("assets"))?;

    Ok(BuildSummary {
        pages: site.pages.len(),
        generated_assets: site.assets.len(),
        copied_assets,
    })
}

fn write_file(dest: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(dest, data).with_context(|| format!("Failed to write {}", dest.display()))
}

/// Copy `src` recursively into `dest`, returning the number of files copied.
fn copy_assets(src: &Path, dest: &Path) -> Result<usize> {
    if !src.is_dir() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(src).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(src)
            .context("Asset outside of assets directory")?;
        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)
            .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
        copied += 1;
    }

    Ok(copied)
}
