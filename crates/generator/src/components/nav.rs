use super::NavEntry;
use leptos::prelude::*;

/// App switcher shown at the top of every page
#[component]
pub fn AppNav(
    #[prop(into)] site_name: String,
    apps: Vec<NavEntry>,
    /// Route of the page being rendered
    #[prop(into)]
    current: String,
) -> impl IntoView {
    let current_name = apps
        .iter()
        .find(|app| app.route == current)
        .map(|app| app.name.clone())
        .unwrap_or_else(|| "All apps".to_string());

    view! {
        <header class="app-nav">
            <a class="brand" href="/">{site_name}</a>
            <details class="app-switcher">
                <summary>{current_name}</summary>
                <ul>
                    {apps
                        .into_iter()
                        .map(|app| {
                            let class = if app.route == current { "app-link active" } else { "app-link" };
                            view! {
                                <li>
                                    <a class=class href=app.route style=format!("--accent: {}", app.accent)>
                                        <img src=app.icon alt="" width="20" height="20" loading="lazy" />
                                        <span>{app.name}</span>
                                    </a>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()}
                </ul>
            </details>
        </header>
    }
}
