//! Exact-match route table.

use appshelf_core::{Catalog, NOT_FOUND_ROUTE};

/// What a route renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Generated catalog index, registered only when no app owns `/`
    Home,
    /// Index into `Catalog::apps`
    App(usize),
    /// Index into `Catalog::pages`
    Static(usize),
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub page: Page,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Apps in config order, then static pages, then `/404`.
    pub fn build(catalog: &Catalog) -> Self {
        let mut routes = Vec::with_capacity(catalog.apps.len() + catalog.pages.len() + 2);

        if !catalog.has_root_app() {
            routes.push(Route {
                path: "/".to_string(),
                page: Page::Home,
            });
        }
        routes.extend(catalog.apps.iter().enumerate().map(|(i, app)| Route {
            path: app.route.clone(),
            page: Page::App(i),
        }));
        routes.extend(catalog.pages.iter().enumerate().map(|(i, page)| Route {
            path: page.route.clone(),
            page: Page::Static(i),
        }));
        routes.push(Route {
            path: NOT_FOUND_ROUTE.to_string(),
            page: Page::NotFound,
        });

        Self { routes }
    }

    /// First route whose path equals `path`, else [`Page::NotFound`].
    pub fn resolve(&self, path: &str) -> Page {
        self.routes
            .iter()
            .find(|route| route.path == path)
            .map(|route| route.page)
            .unwrap_or(Page::NotFound)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Routes worth listing in a sitemap (everything except `/404`).
    pub fn indexable(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().filter(|route| route.page != Page::NotFound)
    }
}

/// File a route is written to inside the build output.
///
/// ```text
/// /          → index.html
/// /dropdock  → dropdock/index.html
/// /404       → 404.html
/// ```
pub fn output_file(path: &str) -> String {
    if path == NOT_FOUND_ROUTE {
        return "404.html".to_string();
    }
    match path.trim_matches('/') {
        "" => "index.html".to_string(),
        trimmed => format!("{}/index.html", trimmed),
    }
}
