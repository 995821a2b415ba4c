use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Route reserved for the not-found page.
pub const NOT_FOUND_ROUTE: &str = "/404";

/// Complete catalog configuration, loaded from `shelf.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub site: SiteConfig,
    pub apps: Vec<AppDescriptor>,
    pub pages: Vec<StaticPage>,
}

impl Catalog {
    pub fn app_by_name(&self, name: &str) -> Option<&AppDescriptor> {
        self.apps.iter().find(|app| app.name == name)
    }

    /// Case-insensitive lookup by name, falling back to the route segment
    /// (`dropdock` finds the app served at `/dropdock`).
    pub fn find_app(&self, query: &str) -> Option<&AppDescriptor> {
        let query = query.trim();
        self.app_by_name(query).or_else(|| {
            self.apps.iter().find(|app| {
                app.name.eq_ignore_ascii_case(query)
                    || app.route.trim_start_matches('/').eq_ignore_ascii_case(query)
            })
        })
    }

    /// Whether some app page is mounted at the site root.
    pub fn has_root_app(&self) -> bool {
        self.apps.iter().any(|app| app.route == "/")
    }
}

/// Site-wide settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    /// Absolute origin the site is published under, without trailing slash
    pub base_url: String,
    /// Invite link of the community group feedback templates are pasted into
    pub community_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_og_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// SEO for the generated catalog index (only used when no app owns `/`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<SeoConfig>,
}

impl SiteConfig {
    /// Join a route onto `base_url`.
    pub fn absolute_url(&self, route: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if route == "/" {
            format!("{}/", base)
        } else {
            format!("{}{}", base, route)
        }
    }
}

/// One advertised application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppDescriptor {
    pub name: String,
    pub route: String,
    pub icon: String,
    pub accent_color: String,
    pub download_url: String,
    pub download_filename: String,
    pub tagline: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub install_steps: Vec<String>,
    #[serde(default)]
    pub screenshots: Vec<String>,
    pub seo: SeoConfig,
}

impl AppDescriptor {
    /// Installer format shown on the download button ("DMG", "PKG", ...)
    pub fn installer_kind(&self) -> String {
        self.download_filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_uppercase())
            .unwrap_or_else(|| "Installer".to_string())
    }
}

/// A feature bullet on an app page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    pub description: String,
}

/// Per-page document metadata.
///
/// Only `title`, `description` and `keywords` are required. The optional
/// fields fall back to values derived from them when the head is synced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoConfig {
    pub title: String,
    pub description: String,
    pub keywords: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_card: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
}

impl SeoConfig {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        keywords: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            keywords: keywords.into(),
            ..Default::default()
        }
    }
}

/// Kind of non-app page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Legal,
    Terms,
}

impl PageKind {
    pub fn label(self) -> &'static str {
        match self {
            PageKind::Legal => "Legal",
            PageKind::Terms => "Terms",
        }
    }
}

/// Markdown-backed static page (legal notice, terms of use)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticPage {
    pub kind: PageKind,
    pub route: String,
    pub title: String,
    /// Markdown source, relative to the catalog directory
    pub source: PathBuf,
    pub seo: SeoConfig,
}
