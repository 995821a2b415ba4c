//! Page rendering: head state plus Leptos SSR body, assembled into a document.

use crate::components::{
    AppPageView, CatalogIndex, Chrome, ErrorView, NotFoundView, StaticPageView,
};
use crate::head::{HeadState, html_escape};
use crate::routes::{Page, RouteTable};
use crate::styles;
use anyhow::{Context, Result};
use appshelf_core::{Catalog, SeoConfig};
use chrono::{Datelike, Local, NaiveDate};
use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;
use pulldown_cmark::{Options, Parser, html};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Public path of the copy helper script
pub const COPY_SCRIPT_PATH: &str = "/copy.js";
/// Public path of the preview hot-reload script
pub const RELOAD_SCRIPT_PATH: &str = "/_reload.js";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Add the preview hot-reload script to every page
    pub live_reload: bool,
    /// Drives the footer year and sitemap dates
    pub date: NaiveDate,
}

impl RenderOptions {
    pub fn build() -> Self {
        Self {
            live_reload: false,
            date: Local::now().date_naive(),
        }
    }

    pub fn preview() -> Self {
        Self {
            live_reload: true,
            ..Self::build()
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub page: Page,
    pub html: String,
}

/// Renders pages of one catalog.
pub struct Renderer<'a> {
    catalog: &'a Catalog,
    root: PathBuf,
    routes: RouteTable,
    base_head: HeadState,
    chrome: Chrome,
    stylesheet_href: String,
}

impl<'a> Renderer<'a> {
    /// `root` is the catalog directory markdown sources are resolved against.
    pub fn new(catalog: &'a Catalog, root: impl Into<PathBuf>, options: &RenderOptions) -> Self {
        let mut scripts = vec![COPY_SCRIPT_PATH.to_string()];
        if options.live_reload {
            scripts.push(RELOAD_SCRIPT_PATH.to_string());
        }

        Self {
            catalog,
            root: root.into(),
            routes: RouteTable::build(catalog),
            base_head: HeadState::with_default_image(catalog.site.default_og_image.as_deref()),
            chrome: Chrome::new(catalog, options.date.year(), scripts),
            stylesheet_href: format!("/{}", styles::stylesheet_file_name()),
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Resolve `path` and render whatever it maps to.
    pub fn render_path(&self, path: &str) -> Result<RenderedPage> {
        let page = self.routes.resolve(path);
        debug!(path, ?page, "rendering");
        let html = self.render(page)?;
        Ok(RenderedPage { page, html })
    }

    pub fn render(&self, page: Page) -> Result<String> {
        let chrome = self.chrome.clone();
        let (seo, accent, body) = match page {
            Page::Home => (
                self.home_seo(),
                None,
                view! { <body><CatalogIndex chrome=chrome /></body> }.to_html(),
            ),
            Page::App(i) => {
                let app = self
                    .catalog
                    .apps
                    .get(i)
                    .with_context(|| format!("No app at index {}", i))?;
                (
                    app.seo.clone(),
                    Some(app.accent_color.as_str()),
                    view! { <body><AppPageView app=app.clone() chrome=chrome /></body> }.to_html(),
                )
            }
            Page::Static(i) => {
                let page = self
                    .catalog
                    .pages
                    .get(i)
                    .with_context(|| format!("No static page at index {}", i))?;
                let source = self.root.join(&page.source);
                let markdown = fs::read_to_string(&source)
                    .with_context(|| format!("Failed to read {}", source.display()))?;
                let content = markdown_to_html(&markdown);
                (
                    page.seo.clone(),
                    None,
                    view! {
                        <body>
                            <StaticPageView
                                title=page.title.clone()
                                route=page.route.clone()
                                content=content
                                chrome=chrome
                            />
                        </body>
                    }
                    .to_html(),
                )
            }
            Page::NotFound => (
                self.not_found_seo(),
                None,
                view! { <body><NotFoundView chrome=chrome /></body> }.to_html(),
            ),
        };

        let head = self.base_head.for_page(&seo);
        Ok(document(&head, &self.stylesheet_href, accent, &body))
    }

    /// Render `page`, replacing the whole document with the error page if it fails.
    pub fn render_or_error(&self, page: Page) -> std::result::Result<String, String> {
        self.render(page).map_err(|err| {
            let message = format!("{:#}", err);
            tracing::error!(?page, error = %message, "page failed to render");
            render_error_page(&self.stylesheet_href, &message)
        })
    }

    fn home_seo(&self) -> SeoConfig {
        let site = &self.catalog.site;
        site.home.clone().unwrap_or_else(|| {
            let names: Vec<&str> = self.catalog.apps.iter().map(|a| a.name.as_str()).collect();
            SeoConfig {
                og_url: Some(site.absolute_url("/")),
                canonical: Some(site.absolute_url("/")),
                ..SeoConfig::new(
                    site.name.clone(),
                    format!("Independent macOS apps: {}.", names.join(", ")),
                    format!("macOS apps, indie mac software, {}", names.join(", ")),
                )
            }
        })
    }

    fn not_found_seo(&self) -> SeoConfig {
        SeoConfig::new(
            format!("Page not found · {}", self.catalog.site.name),
            "The page you were looking for does not exist.",
            self.catalog.site.name.clone(),
        )
    }
}

/// Generic whole-page error display.
pub fn render_error_page(stylesheet_href: &str, message: &str) -> String {
    let mut head = HeadState::new();
    head.sync(&SeoConfig::new(
        "Something went wrong",
        "This page could not be displayed.",
        "error",
    ));
    let body = view! { <body><ErrorView message=message.to_string() /></body> }.to_html();
    document(&head, stylesheet_href, None, &body)
}

fn document(head: &HeadState, stylesheet_href: &str, accent: Option<&str>, body: &str) -> String {
    let theme_color = accent
        .map(|color| format!("<meta name=\"theme-color\" content=\"{}\">\n", html_escape(color)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
{}{}<link rel="stylesheet" href="{}">
</head>
{}
</html>
"#,
        head.to_html(),
        theme_color,
        html_escape(stylesheet_href),
        body
    )
}

pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Catalog directory for a `shelf.toml` path.
pub fn catalog_root(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::head::TagKey;
    use appshelf_core::config::parse_shelf_toml_str;
    use tempfile::TempDir;

    const SHELF: &str = r##"
[site]
name = "Indie Shelf"
base_url = "https://apps.example.com"
community_url = "https://t.me/+example"
default_og_image = "https://cdn.example.com/site.png"

[[app]]
name = "DropDock"
route = "/dropdock"
icon = "https://cdn.example.com/dropdock.png"
accent_color = "#3B82C4"
download_url = "https://github.com/example/DropDock/releases/download/v1.0.0/DropDock.dmg"
tagline = "Floating shelf and file organizer"
category = "Productivity"
version = "1.0.0"
requirements = "macOS 14 or later"
install_steps = ["Open the DMG", "Drag DropDock to Applications"]

[[app.features]]
title = "Drop zone"
description = "Drag files anywhere"

[app.seo]
title = "DropDock for macOS"
description = "A floating shelf"
keywords = "DropDock, macOS"
canonical = "https://apps.example.com/dropdock"

[[page]]
kind = "legal"
route = "/legal"
title = "Legal"
source = "pages/legal.md"

[page.seo]
title = "Legal notice"
description = "Legal information"
keywords = "legal"
"##;

    fn fixture() -> (TempDir, Catalog) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("pages")).unwrap();
        fs::write(
            dir.path().join("pages/legal.md"),
            "## Liability\n\nSoftware is provided *as is*.\n",
        )
        .unwrap();
        (dir, parse_shelf_toml_str(SHELF).unwrap())
    }

    fn options() -> RenderOptions {
        RenderOptions {
            live_reload: false,
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        }
    }

    #[test]
    fn test_app_page_contains_head_and_download() {
        let (dir, catalog) = fixture();
        let renderer = Renderer::new(&catalog, dir.path(), &options());
        let rendered = renderer.render_path("/dropdock").unwrap();

        assert_eq!(rendered.page, Page::App(0));
        let html = rendered.html;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>DropDock for macOS</title>"));
        assert!(html.contains(r#"<meta name="description" content="A floating shelf">"#));
        assert!(html.contains(r#"<meta property="og:type" content="website">"#));
        assert!(html.contains(
            r#"<meta property="og:image" content="https://cdn.example.com/site.png">"#
        ));
        assert!(html.contains(r#"<link rel="canonical" href="https://apps.example.com/dropdock">"#));
        assert!(html.contains(r##"<meta name="theme-color" content="#3B82C4">"##));
        assert!(html.contains(
            r#"href="https://github.com/example/DropDock/releases/download/v1.0.0/DropDock.dmg""#
        ));
        assert!(html.contains(r#"download="DropDock.dmg""#));
        assert!(html.contains("Drag DropDock to Applications"));
        assert!(html.contains("Drop zone"));
        assert!(html.contains("macOS 14 or later"));
        assert!(html.contains(r#"src="/copy.js""#));
        assert!(!html.contains(RELOAD_SCRIPT_PATH));
    }

    #[test]
    fn test_app_page_contains_feedback_block() {
        let (dir, catalog) = fixture();
        let renderer = Renderer::new(&catalog, dir.path(), &options());
        let html = renderer.render(Page::App(0)).unwrap();

        assert!(html.contains("Help Us Improve DropDock"));
        assert!(html.contains(r#"data-template="bug""#));
        assert!(html.contains(r#"data-template="feature""#));
        assert!(html.contains(r#"data-template="feedback""#));
        assert!(html.contains(r#"href="https://t.me/+example""#));
        assert!(html.contains("© 2026 Indie Shelf"));
    }

    #[test]
    fn test_home_generated_without_root_app() {
        let (dir, catalog) = fixture();
        let renderer = Renderer::new(&catalog, dir.path(), &options());
        let rendered = renderer.render_path("/").unwrap();

        assert_eq!(rendered.page, Page::Home);
        assert!(rendered.html.contains("<title>Indie Shelf</title>"));
        assert!(rendered.html.contains(r#"href="/dropdock""#));
    }

    #[test]
    fn test_static_page_renders_markdown() {
        let (dir, catalog) = fixture();
        let renderer = Renderer::new(&catalog, dir.path(), &options());
        let html = renderer.render_path("/legal").unwrap().html;

        assert!(html.contains("<title>Legal notice</title>"));
        assert!(html.contains("<h2>Liability</h2>"));
        assert!(html.contains("<em>as is</em>"));
    }

    #[test]
    fn test_unknown_path_renders_not_found() {
        let (dir, catalog) = fixture();
        let renderer = Renderer::new(&catalog, dir.path(), &options());
        let rendered = renderer.render_path("/does-not-exist").unwrap();

        assert_eq!(rendered.page, Page::NotFound);
        assert!(rendered.html.contains("Page not found"));
    }

    #[test]
    fn test_pages_do_not_leak_head_values() {
        let (dir, catalog) = fixture();
        let renderer = Renderer::new(&catalog, dir.path(), &options());

        // The app page sets a canonical link; the next page must not inherit it.
        renderer.render(Page::App(0)).unwrap();
        let legal = renderer.render(Page::Static(0)).unwrap();
        assert!(!legal.contains("rel=\"canonical\""));

        let head = HeadState::with_default_image(Some("x")).for_page(&catalog.pages[0].seo);
        assert_eq!(head.get(TagKey::CANONICAL), None);
    }

    #[test]
    fn test_missing_markdown_falls_back_to_error_page() {
        let (dir, catalog) = fixture();
        fs::remove_file(dir.path().join("pages/legal.md")).unwrap();
        let renderer = Renderer::new(&catalog, dir.path(), &options());

        assert!(renderer.render(Page::Static(0)).is_err());
        let html = renderer.render_or_error(Page::Static(0)).unwrap_err();
        assert!(html.contains("Something went wrong"));
        assert!(html.contains("Failed to read"));
        assert!(!html.contains("Help Us Improve"));
    }

    #[test]
    fn test_live_reload_script_only_in_preview() {
        let (dir, catalog) = fixture();
        let preview = RenderOptions {
            live_reload: true,
            ..options()
        };
        let renderer = Renderer::new(&catalog, dir.path(), &preview);
        let html = renderer.render(Page::NotFound).unwrap();
        assert!(html.contains(r#"src="/_reload.js""#));
    }

    #[test]
    fn test_catalog_root() {
        assert_eq!(catalog_root(Path::new("shop/shelf.toml")), PathBuf::from("shop"));
        assert_eq!(catalog_root(Path::new("shelf.toml")), PathBuf::from(""));
    }
}
