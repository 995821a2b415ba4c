use crate::error::{Error, Result};
use crate::types::*;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Raw TOML configuration structure
/// This matches the shelf.toml file structure exactly
#[derive(Debug, Deserialize)]
struct RawConfig {
    site: RawSite,
    #[serde(default)]
    app: Vec<RawApp>,
    #[serde(default)]
    page: Vec<RawPage>,
}

#[derive(Debug, Deserialize)]
struct RawSite {
    name: String,
    base_url: String,
    community_url: String,
    default_og_image: Option<String>,
    author: Option<String>,
    home: Option<SeoConfig>,
}

#[derive(Debug, Deserialize)]
struct RawApp {
    name: String,
    route: String,
    icon: String,
    accent_color: String,
    download_url: String,
    download_filename: Option<String>, // Derived from download_url when absent
    tagline: String,
    category: String,
    version: Option<String>,
    requirements: Option<String>,
    #[serde(default)]
    features: Vec<Feature>,
    #[serde(default)]
    install_steps: Vec<String>,
    #[serde(default)]
    screenshots: Vec<String>,
    seo: SeoConfig,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    kind: PageKind,
    route: String,
    title: String,
    source: String, // Convert to PathBuf
    seo: SeoConfig,
}

/// Parse shelf.toml from a file path
pub fn parse_shelf_toml<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let content = fs::read_to_string(path)?;
    parse_shelf_toml_str(&content)
}

/// Parse shelf.toml from a string (useful for testing)
pub fn parse_shelf_toml_str(content: &str) -> Result<Catalog> {
    let raw: RawConfig = toml::from_str(content)?;

    require_non_empty(&raw.site.name, "site.name")?;
    if !is_absolute_url(&raw.site.base_url) {
        return Err(Error::ConfigParse(format!(
            "site.base_url must be an absolute http(s) URL, got '{}'",
            raw.site.base_url
        )));
    }
    require_non_empty(&raw.site.community_url, "site.community_url")?;
    if let Some(home) = &raw.site.home {
        validate_seo(home, "site.home")?;
    }

    let site = SiteConfig {
        name: raw.site.name,
        base_url: raw.site.base_url.trim_end_matches('/').to_string(),
        community_url: raw.site.community_url,
        default_og_image: raw.site.default_og_image,
        author: raw.site.author,
        home: raw.site.home,
    };

    let mut names = HashSet::new();
    let mut routes = HashSet::new();
    routes.insert(NOT_FOUND_ROUTE.to_string());

    let apps: Result<Vec<AppDescriptor>> = raw
        .app
        .into_iter()
        .map(|a| {
            require_non_empty(&a.name, "app.name")?;
            let context = format!("app '{}'", a.name);
            if !names.insert(a.name.clone()) {
                return Err(Error::Duplicate {
                    field: "app name",
                    value: a.name,
                });
            }

            validate_route(&a.route, &context)?;
            if !routes.insert(a.route.clone()) {
                return Err(Error::Duplicate {
                    field: "route",
                    value: a.route,
                });
            }

            require_non_empty(&a.download_url, &format!("{} download_url", context))?;
            let download_filename = match a.download_filename {
                Some(name) => {
                    require_non_empty(&name, &format!("{} download_filename", context))?;
                    name
                }
                None => derive_download_filename(&a.download_url).ok_or_else(|| {
                    Error::ConfigParse(format!(
                        "Cannot derive download_filename for {} from '{}'; set it explicitly",
                        context, a.download_url
                    ))
                })?,
            };

            validate_accent_color(&a.accent_color, &context)?;
            validate_seo(&a.seo, &context)?;

            Ok(AppDescriptor {
                name: a.name,
                route: a.route,
                icon: a.icon,
                accent_color: a.accent_color,
                download_url: a.download_url,
                download_filename,
                tagline: a.tagline,
                category: a.category,
                version: a.version,
                requirements: a.requirements,
                features: a.features,
                install_steps: a.install_steps,
                screenshots: a.screenshots,
                seo: a.seo,
            })
        })
        .collect();
    let apps = apps?;

    let pages: Result<Vec<StaticPage>> = raw
        .page
        .into_iter()
        .map(|p| {
            let context = format!("{} page", p.kind.label().to_lowercase());
            validate_route(&p.route, &context)?;
            if !routes.insert(p.route.clone()) {
                return Err(Error::Duplicate {
                    field: "route",
                    value: p.route,
                });
            }
            validate_seo(&p.seo, &context)?;
            let source = validate_path(&p.source, "page.source")?;

            Ok(StaticPage {
                kind: p.kind,
                route: p.route,
                title: p.title,
                source,
                seo: p.seo,
            })
        })
        .collect();

    Ok(Catalog {
        site,
        apps,
        pages: pages?,
    })
}

fn require_non_empty(value: &str, field_name: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "'{}' must not be empty",
            field_name
        )));
    }
    Ok(())
}

fn validate_seo(seo: &SeoConfig, context: &str) -> Result<()> {
    require_non_empty(&seo.title, &format!("{} seo.title", context))?;
    require_non_empty(&seo.description, &format!("{} seo.description", context))?;
    require_non_empty(&seo.keywords, &format!("{} seo.keywords", context))?;
    Ok(())
}

fn is_absolute_url(s: &str) -> bool {
    Url::parse(s).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
    })
}

/// Routes are matched as exact strings, so only plain absolute paths are
/// accepted: no query, fragment, whitespace or trailing slash.
fn validate_route(route: &str, context: &str) -> Result<()> {
    if !route.starts_with('/') {
        return Err(Error::ConfigParse(format!(
            "Route for {} must start with '/': '{}'",
            context, route
        )));
    }
    if route == NOT_FOUND_ROUTE {
        return Err(Error::ConfigParse(format!(
            "Route '{}' is reserved for the not-found page ({})",
            NOT_FOUND_ROUTE, context
        )));
    }
    if route.len() > 1 && route.ends_with('/') {
        return Err(Error::ConfigParse(format!(
            "Route for {} must not end with '/': '{}'",
            context, route
        )));
    }
    if route
        .chars()
        .any(|c| c.is_whitespace() || c == '?' || c == '#')
        || route.contains("//")
        || route.split('/').any(|seg| seg == "..")
    {
        return Err(Error::ConfigParse(format!(
            "Invalid route for {}: '{}'",
            context, route
        )));
    }
    Ok(())
}

/// Accepts `#RGB` and `#RRGGBB`.
fn validate_accent_color(color: &str, context: &str) -> Result<()> {
    let valid = color
        .strip_prefix('#')
        .is_some_and(|hex| (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if !valid {
        return Err(Error::ConfigParse(format!(
            "accent_color for {} must be a hex color like #3B82C4, got '{}'",
            context, color
        )));
    }
    Ok(())
}

/// Last path segment of a download URL, percent-decoded, ignoring query and
/// fragment.
///
/// ```text
/// https://host/releases/download/v1.0.0/DropDock.dmg?raw=1  → DropDock.dmg
/// https://host/files/My%20App.dmg                           → My App.dmg
/// https://host/                                             → None
/// ```
pub fn derive_download_filename(url: &str) -> Option<String> {
    Url::parse(url).ok().as_ref().and_then(url_filename)
}

/// [`derive_download_filename`] for an already parsed URL.
pub fn url_filename(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.next_back()?;
    if segment.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode(segment)
        .map(|name| name.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    Some(decoded)
}

/// Validate and convert a path string to PathBuf.
///
/// Rejects absolute paths and parent directory references (`..`) so a
/// shelf.toml cannot pull files from outside the catalog directory.
///
/// ```text
/// validate_path("pages/legal.md", "page.source")  → Ok(PathBuf)
/// validate_path("/etc/passwd", "page.source")     → Err("Absolute paths not allowed...")
/// validate_path("../secret.md", "page.source")    → Err("Parent directory references...")
/// ```
fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    let path = Path::new(path_str);

    if path.is_absolute() {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    for component in path.components() {
        if component == std::path::Component::ParentDir {
            return Err(Error::ConfigParse(format!(
                "Parent directory references (..) not allowed in '{}': '{}'",
                field_name, path_str
            )));
        }
    }

    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    Ok(path.to_path_buf())
}
