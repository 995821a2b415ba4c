use super::{NavEntry, PageLink};
use leptos::prelude::*;

#[component]
pub fn AppFooter(
    #[prop(into)] site_name: String,
    author: Option<String>,
    year: i32,
    apps: Vec<NavEntry>,
    pages: Vec<PageLink>,
) -> impl IntoView {
    let owner = author.unwrap_or(site_name);

    view! {
        <footer class="app-footer">
            <nav class="footer-apps">
                {apps
                    .into_iter()
                    .map(|app| view! { <a href=app.route>{app.name}</a> })
                    .collect::<Vec<_>>()}
            </nav>
            <nav class="footer-legal">
                {pages
                    .into_iter()
                    .map(|page| view! { <a href=page.route>{page.title}</a> })
                    .collect::<Vec<_>>()}
            </nav>
            <p class="copyright">{format!("© {} {}. Independent macOS software.", year, owner)}</p>
        </footer>
    }
}
