use anyhow::{Context, Result};
use appshelf_core::config::parse_shelf_toml_str;
use std::fs;
use std::path::{Path, PathBuf};

use super::CONFIG_FILE;

const DEFAULT_SITE_NAME: &str = "My App Shelf";
const DEFAULT_BASE_URL: &str = "https://apps.example.com";

/// Escape a string for safe inclusion in TOML per TOML v1.0.0 spec
///
/// Handles the required escape sequences for TOML basic strings:
/// - Backslash (\\) -> \\\\
/// - Quote (\") -> \\\"
/// - Backspace (\b) -> \\b
/// - Form feed (\f) -> \\f
/// - Newline (\n) -> \\n
/// - Carriage return (\r) -> \\r
/// - Tab (\t) -> \\t
///
/// See: https://toml.io/en/v1.0.0#string
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Initialize a new catalog directory.
///
/// Creates (relative to `path`):
/// - `shelf.toml` with one example app and two static pages
/// - `pages/legal.md` and `pages/terms.md`
/// - an empty `assets/` directory for icons and screenshots
///
/// # Errors
///
/// Returns an error if `shelf.toml` already exists, if `base_url` is not an
/// absolute http(s) URL, or if a file cannot be written.
pub async fn run(path: PathBuf, name: Option<String>, base_url: Option<String>) -> Result<()> {
    println!("Initializing catalog directory: {}", path.display());

    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!(
            "{} already exists at {}\nHint: Delete it first or use a different directory",
            CONFIG_FILE,
            config_path.display()
        );
    }

    scaffold(
        &path,
        name.as_deref().unwrap_or(DEFAULT_SITE_NAME),
        base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
    )?;

    println!("\n✓ Initialization complete!");
    println!("\nGenerated structure:");
    println!("  {}/", path.display());
    println!("  ├── shelf.toml           ← Describe your apps here");
    println!("  ├── assets/              ← Icons and screenshots");
    println!("  └── pages/");
    println!("      ├── legal.md");
    println!("      └── terms.md");

    println!("\nNext steps:");
    println!("  1. Edit shelf.toml (site name, apps, download links)");
    println!("  2. Fill in pages/legal.md and pages/terms.md");
    println!("  3. Check: appshelf validate {}", path.display());
    println!("  4. Preview: appshelf preview {}", path.display());

    Ok(())
}

/// Write the starter catalog into `base`. The generated `shelf.toml` is
/// parsed before anything is written.
pub(crate) fn scaffold(base: &Path, name: &str, base_url: &str) -> Result<()> {
    let toml = shelf_toml(name, base_url);
    parse_shelf_toml_str(&toml).context("Generated shelf.toml is invalid")?;

    fs::create_dir_all(base.join("assets")).context("Failed to create assets directory")?;
    fs::create_dir_all(base.join("pages")).context("Failed to create pages directory")?;

    fs::write(base.join(CONFIG_FILE), toml)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE))?;
    fs::write(base.join("pages/legal.md"), legal_template(name))
        .context("Failed to write pages/legal.md")?;
    fs::write(base.join("pages/terms.md"), terms_template(name))
        .context("Failed to write pages/terms.md")?;

    Ok(())
}

fn shelf_toml(name: &str, base_url: &str) -> String {
    let site_name = toml_escape_string(name);
    let base = toml_escape_string(base_url.trim_end_matches('/'));

    format!(
        "# Generated by appshelf init\n\
# Edit this file to describe your apps\n\
\n\
[site]\n\
name = \"{site_name}\"\n\
base_url = \"{base}\"  # TODO: Set the deployed URL\n\
community_url = \"https://t.me/+your-community\"  # TODO: Set community chat link\n\
# default_og_image = \"https://cdn.example.com/og.png\"\n\
# author = \"Your Name\"\n\
\n\
[[app]]\n\
name = \"Example App\"\n\
route = \"/example-app\"\n\
icon = \"https://cdn.example.com/example-app/icon.png\"\n\
accent_color = \"#3B82C4\"\n\
download_url = \"https://github.com/you/ExampleApp/releases/download/v1.0.0/ExampleApp.dmg\"\n\
tagline = \"One line about what it does\"\n\
category = \"Productivity\"\n\
version = \"1.0.0\"\n\
requirements = \"macOS 14 or later\"\n\
install_steps = [\n\
    \"Open ExampleApp.dmg\",\n\
    \"Drag Example App to Applications\",\n\
    \"Right-click the app and choose Open the first time\",\n\
]\n\
# screenshots = [\"/assets/example-app-1.png\"]\n\
\n\
[[app.features]]\n\
title = \"Feature one\"\n\
description = \"Describe a feature\"\n\
\n\
[app.seo]\n\
title = \"Example App for macOS\"\n\
description = \"One line about what it does\"\n\
keywords = \"Example App, macOS\"\n\
canonical = \"{base}/example-app\"\n\
\n\
[[page]]\n\
kind = \"legal\"\n\
route = \"/legal\"\n\
title = \"Legal Notice\"\n\
source = \"pages/legal.md\"\n\
\n\
[page.seo]\n\
title = \"Legal Notice\"\n\
description = \"Legal information about {site_name}\"\n\
keywords = \"legal\"\n\
\n\
[[page]]\n\
kind = \"terms\"\n\
route = \"/terms\"\n\
title = \"Terms of Use\"\n\
source = \"pages/terms.md\"\n\
\n\
[page.seo]\n\
title = \"Terms of Use\"\n\
description = \"Terms of use for {site_name}\"\n\
keywords = \"terms\"\n"
    )
}

fn legal_template(name: &str) -> String {
    format!(
        "# Legal Notice\n\n\
{name} is operated by an independent developer.\n\n\
## Contact\n\n\
TODO: Add contact details.\n\n\
## Liability\n\n\
The software is provided as is, without warranty of any kind.\n"
    )
}

fn terms_template(name: &str) -> String {
    format!(
        "# Terms of Use\n\n\
By downloading software from {name} you agree to these terms.\n\n\
## License\n\n\
TODO: Describe the license each app is distributed under.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use appshelf_core::config::parse_shelf_toml;
    use tempfile::TempDir;

    #[test]
    fn test_toml_escape_string() {
        assert_eq!(toml_escape_string(r#"Say "hi""#), r#"Say \"hi\""#);
        assert_eq!(toml_escape_string("a\\b"), "a\\\\b");
        assert_eq!(toml_escape_string("line\nbreak\t"), "line\\nbreak\\t");
    }

    #[test]
    fn test_scaffold_creates_parseable_catalog() {
        let dir = TempDir::new().unwrap();
        scaffold(dir.path(), "Indie Shelf", "https://apps.example.com/").unwrap();

        assert!(dir.path().join("assets").is_dir());
        assert!(dir.path().join("pages/legal.md").is_file());
        assert!(dir.path().join("pages/terms.md").is_file());

        let catalog = parse_shelf_toml(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(catalog.site.name, "Indie Shelf");
        assert_eq!(catalog.site.base_url, "https://apps.example.com");
        assert_eq!(catalog.apps.len(), 1);
        assert_eq!(catalog.apps[0].download_filename, "ExampleApp.dmg");
        assert_eq!(
            catalog.apps[0].seo.canonical.as_deref(),
            Some("https://apps.example.com/example-app")
        );
        assert_eq!(catalog.pages.len(), 2);
    }

    #[test]
    fn test_scaffold_escapes_site_name() {
        let dir = TempDir::new().unwrap();
        scaffold(dir.path(), r#"Jo's "Mac" Shelf"#, DEFAULT_BASE_URL).unwrap();

        let catalog = parse_shelf_toml(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(catalog.site.name, r#"Jo's "Mac" Shelf"#);
    }

    #[test]
    fn test_scaffold_rejects_relative_base_url() {
        let dir = TempDir::new().unwrap();
        let err = scaffold(dir.path(), "Shelf", "apps.example.com").unwrap_err();

        assert!(err.to_string().contains("Generated shelf.toml is invalid"));
        assert!(!dir.path().join(CONFIG_FILE).exists());
    }

    #[tokio::test]
    async fn test_run_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "").unwrap();

        let err = run(dir.path().to_path_buf(), None, None).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
