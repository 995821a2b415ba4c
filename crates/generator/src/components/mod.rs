//! Leptos components for the generated pages.
//!
//! Every page body composes the same fragments around its own content:
//!
//! ```text
//! AppPageView / StaticPageView / CatalogIndex / NotFoundView
//! ├── AppNav
//! ├── (page content)
//! │   ├── DownloadButton      (app pages)
//! │   └── FeedbackSection     (app pages)
//! ├── AppFooter
//! └── PageScripts
//! ```

mod download;
mod feedback;
mod footer;
mod nav;
mod pages;

pub use download::DownloadButton;
pub use feedback::FeedbackSection;
pub use footer::AppFooter;
pub use nav::AppNav;
pub use pages::{AppPageView, CatalogIndex, ErrorView, NotFoundView, PageScripts, StaticPageView};

use appshelf_core::{AppDescriptor, Catalog};

/// Cross-link to one app, shown in the nav, footer and catalog index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub name: String,
    pub route: String,
    pub icon: String,
    pub accent: String,
    pub tagline: String,
    pub category: String,
}

impl From<&AppDescriptor> for NavEntry {
    fn from(app: &AppDescriptor) -> Self {
        Self {
            name: app.name.clone(),
            route: app.route.clone(),
            icon: app.icon.clone(),
            accent: app.accent_color.clone(),
            tagline: app.tagline.clone(),
            category: app.category.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub title: String,
    pub route: String,
}

/// Site-wide fragments shared by every page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    pub site_name: String,
    pub community_url: String,
    pub author: Option<String>,
    pub year: i32,
    pub apps: Vec<NavEntry>,
    pub pages: Vec<PageLink>,
    pub scripts: Vec<String>,
}

impl Chrome {
    pub fn new(catalog: &Catalog, year: i32, scripts: Vec<String>) -> Self {
        Self {
            site_name: catalog.site.name.clone(),
            community_url: catalog.site.community_url.clone(),
            author: catalog.site.author.clone(),
            year,
            apps: catalog.apps.iter().map(NavEntry::from).collect(),
            pages: catalog
                .pages
                .iter()
                .map(|page| PageLink {
                    title: page.title.clone(),
                    route: page.route.clone(),
                })
                .collect(),
            scripts,
        }
    }
}
