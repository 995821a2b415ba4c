// Static site generation with Leptos SSR

pub mod clipboard;
pub mod components;
pub mod feedback;
pub mod head;
pub mod render;
pub mod routes;
pub mod styles;

use anyhow::{Context, Result};
use appshelf_core::Catalog;
use render::{COPY_SCRIPT_PATH, RenderOptions, Renderer};
use routes::output_file;
use std::fmt::Write;
use std::path::Path;
use tracing::info;

pub use render::{RenderedPage, markdown_to_html, render_error_page};
pub use routes::{Page, RouteTable};

pub struct GeneratedSite {
    pub pages: Vec<(String, String)>,   // (path, html)
    pub assets: Vec<(String, Vec<u8>)>, // (path, data)
}

/// Render every route of `catalog` plus the shared assets.
///
/// Fails on the first page that cannot be rendered.
pub fn generate_site(catalog: &Catalog, root: &Path, options: &RenderOptions) -> Result<GeneratedSite> {
    let renderer = Renderer::new(catalog, root, options);

    let mut pages = Vec::with_capacity(renderer.routes().routes().len());
    for route in renderer.routes().routes() {
        let html = renderer
            .render(route.page)
            .with_context(|| format!("Failed to render {}", route.path))?;
        pages.push((output_file(&route.path), html));
    }

    let assets = vec![
        (
            styles::stylesheet_file_name(),
            styles::SITE_CSS.as_bytes().to_vec(),
        ),
        (
            COPY_SCRIPT_PATH.trim_start_matches('/').to_string(),
            clipboard::COPY_SCRIPT.as_bytes().to_vec(),
        ),
        (
            "sitemap.xml".to_string(),
            sitemap(catalog, renderer.routes(), options).into_bytes(),
        ),
        ("robots.txt".to_string(), robots(catalog).into_bytes()),
    ];

    info!(pages = pages.len(), assets = assets.len(), "site generated");
    Ok(GeneratedSite { pages, assets })
}

fn sitemap(catalog: &Catalog, routes: &RouteTable, options: &RenderOptions) -> String {
    let lastmod = options.date.format("%Y-%m-%d");
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for route in routes.indexable() {
        let _ = writeln!(
            xml,
            "  <url><loc>{}</loc><lastmod>{}</lastmod></url>",
            xml_escape(&catalog.site.absolute_url(&route.path)),
            lastmod
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

fn robots(catalog: &Catalog) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        catalog.site.absolute_url("/sitemap.xml")
    )
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use appshelf_core::config::parse_shelf_toml_str;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const SHELF: &str = r##"
[site]
name = "Indie Shelf"
base_url = "https://apps.example.com/"
community_url = "https://t.me/+example"

[[app]]
name = "MelodiQ"
route = "/"
icon = "https://cdn.example.com/melodiq.png"
accent_color = "#c42d78"
download_url = "https://github.com/example/MelodiQ/releases/download/v2.1.0/MelodiQ.dmg"
tagline = "Music quiz for your library"
category = "Music"

[app.seo]
title = "MelodiQ"
description = "Music quiz"
keywords = "music, quiz"

[[app]]
name = "DropDock"
route = "/dropdock"
icon = "https://cdn.example.com/dropdock.png"
accent_color = "#3B82C4"
download_url = "https://github.com/example/DropDock/releases/download/v1.0.0/DropDock.dmg"
tagline = "Floating shelf"
category = "Productivity"

[app.seo]
title = "DropDock"
description = "Floating shelf"
keywords = "shelf"

[[page]]
kind = "terms"
route = "/terms"
title = "Terms of Use"
source = "pages/terms.md"

[page.seo]
title = "Terms of Use"
description = "Terms"
keywords = "terms"
"##;

    fn generate(dir: &TempDir) -> Result<GeneratedSite> {
        let catalog = parse_shelf_toml_str(SHELF).unwrap();
        let options = RenderOptions {
            live_reload: false,
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        };
        generate_site(&catalog, dir.path(), &options)
    }

    #[test]
    fn test_generate_site_writes_every_route() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("pages")).unwrap();
        fs::write(dir.path().join("pages/terms.md"), "# Terms\n\nBe nice.").unwrap();

        let site = generate(&dir).unwrap();
        let paths: Vec<&str> = site.pages.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(
            paths,
            vec!["index.html", "dropdock/index.html", "terms/index.html", "404.html"]
        );

        let (_, home) = &site.pages[0];
        assert!(home.contains("<title>MelodiQ</title>"));
        assert!(home.contains("Help Us Improve MelodiQ"));
    }

    #[test]
    fn test_generate_site_assets() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("pages")).unwrap();
        fs::write(dir.path().join("pages/terms.md"), "Terms").unwrap();

        let site = generate(&dir).unwrap();
        let names: Vec<&str> = site.assets.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(names[0], styles::stylesheet_file_name());
        assert_eq!(&names[1..], &["copy.js", "sitemap.xml", "robots.txt"]);

        let sitemap = String::from_utf8(site.assets[2].1.clone()).unwrap();
        assert!(sitemap.contains("<loc>https://apps.example.com/</loc>"));
        assert!(sitemap.contains("<loc>https://apps.example.com/dropdock</loc>"));
        assert!(sitemap.contains("<lastmod>2026-03-01</lastmod>"));
        assert!(!sitemap.contains("/404"));

        let robots = String::from_utf8(site.assets[3].1.clone()).unwrap();
        assert!(robots.contains("Sitemap: https://apps.example.com/sitemap.xml"));

        let (_, home) = &site.pages[0];
        assert!(home.contains(&format!("href=\"/{}\"", styles::stylesheet_file_name())));
    }

    #[test]
    fn test_generate_site_fails_on_missing_markdown() {
        let dir = TempDir::new().unwrap();
        let err = generate(&dir).err().unwrap();
        assert!(format!("{:#}", err).contains("Failed to render /terms"));
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape("a&b<c>\"'"), "a&amp;b&lt;c&gt;&quot;&apos;");
    }
}
