//! Pre-build checks over a catalog directory.
//!
//! Parsing enforces the hard invariants of `shelf.toml`; this crate looks at
//! everything around it: markdown sources, local images, download links and
//! SEO gaps that would still produce a working but poorer site.

use anyhow::Context;
use appshelf_core::{AppDescriptor, Catalog, parse_shelf_toml};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Catalog configuration file name
pub const CONFIG_FILE: &str = "shelf.toml";

/// Local images wider or taller than this get a warning
pub const MAX_IMAGE_DIMENSION: u32 = 4096;

const INSTALLER_EXTENSIONS: &[&str] = &["dmg", "pkg"];
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate the catalog rooted at `root` (the directory holding `shelf.toml`).
pub fn validate_catalog(root: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();

    let catalog = match parse_shelf_toml(root.join(CONFIG_FILE))
        .with_context(|| format!("Failed to load {}", root.join(CONFIG_FILE).display()))
    {
        Ok(catalog) => catalog,
        Err(err) => {
            report.errors.push(format!("{:#}", err));
            return report;
        }
    };

    report.info.push(format!(
        "{} apps, {} static pages",
        catalog.apps.len(),
        catalog.pages.len()
    ));

    for app in &catalog.apps {
        check_app(root, &catalog, app, &mut report);
    }
    check_pages(root, &catalog, &mut report);
    scan_assets(root, &mut report);

    report
}

fn check_app(root: &Path, catalog: &Catalog, app: &AppDescriptor, report: &mut ValidationReport) {
    let ctx = format!("app '{}'", app.name);

    if !app.download_url.starts_with("https://") {
        report.warnings.push(format!(
            "{}: download_url is not https: {}",
            ctx, app.download_url
        ));
    }

    let extension = Path::new(&app.download_filename)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());
    if !extension.is_some_and(|ext| INSTALLER_EXTENSIONS.contains(&ext.as_str())) {
        report.warnings.push(format!(
            "{}: download_filename '{}' is not a .dmg or .pkg installer",
            ctx, app.download_filename
        ));
    }

    if let Some(served) = appshelf_core::config::derive_download_filename(&app.download_url)
        && served != app.download_filename
    {
        report.warnings.push(format!(
            "{}: download_filename '{}' differs from the URL's file name '{}'",
            ctx, app.download_filename, served
        ));
    }

    if app.seo.canonical.is_none() {
        report
            .warnings
            .push(format!("{}: no canonical URL in [app.seo]", ctx));
    }
    if app.seo.og_image.is_none() && catalog.site.default_og_image.is_none() {
        report.warnings.push(format!(
            "{}: no og_image and no site default_og_image; link previews will have no image",
            ctx
        ));
    }

    check_image_ref(root, &app.icon, &format!("{} icon", ctx), report);
    for (i, shot) in app.screenshots.iter().enumerate() {
        check_image_ref(root, shot, &format!("{} screenshot {}", ctx, i + 1), report);
    }
}

fn check_pages(root: &Path, catalog: &Catalog, report: &mut ValidationReport) {
    for page in &catalog.pages {
        let path = root.join(&page.source);
        match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => report.warnings.push(format!(
                "{} page '{}': {} is empty",
                page.kind.label(),
                page.route,
                page.source.display()
            )),
            Ok(_) => {}
            Err(err) => report.errors.push(format!(
                "{} page '{}': cannot read {}: {}",
                page.kind.label(),
                page.route,
                path.display(),
                err
            )),
        }
    }
}

/// Remote references are left to `check-links`; local ones must exist and decode.
fn check_image_ref(root: &Path, reference: &str, what: &str, report: &mut ValidationReport) {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return;
    }
    if reference.is_empty() {
        report.errors.push(format!("{}: empty image reference", what));
        return;
    }

    let Some(path) = local_asset_path(root, reference) else {
        report.errors.push(format!(
            "{}: '{}' points outside the catalog directory",
            what, reference
        ));
        return;
    };
    if !path.is_file() {
        report
            .errors
            .push(format!("{}: file not found: {}", what, path.display()));
        return;
    }

    match image::image_dimensions(&path) {
        Ok((width, height)) => {
            if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
                report.warnings.push(format!(
                    "{}: {}x{} is larger than {}px, consider resizing",
                    what, width, height, MAX_IMAGE_DIMENSION
                ));
            }
        }
        Err(err) => report.errors.push(format!(
            "{}: cannot read image {}: {}",
            what,
            path.display(),
            err
        )),
    }
}

/// `/assets/x.png` and `assets/x.png` both resolve under the catalog root.
/// References that climb out of it with `..` resolve to `None`.
pub fn local_asset_path(root: &Path, reference: &str) -> Option<PathBuf> {
    let relative = Path::new(reference.trim_start_matches('/'));
    if relative.is_absolute()
        || relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return None;
    }
    Some(root.join(relative))
}

fn scan_assets(root: &Path, report: &mut ValidationReport) {
    let assets = root.join("assets");
    if !assets.is_dir() {
        return;
    }

    let mut files = 0;
    let mut images = 0;
    for entry in WalkDir::new(&assets)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        files += 1;
        if let Some(ext) = entry.path().extension()
            && IMAGE_EXTENSIONS.contains(&ext.to_string_lossy().to_lowercase().as_str())
        {
            images += 1;
        }
    }
    report
        .info
        .push(format!("assets/: {} files ({} images)", files, images));
}
