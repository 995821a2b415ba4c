use super::{AppFooter, AppNav, Chrome, DownloadButton, FeedbackSection};
use appshelf_core::{AppDescriptor, Feature};
use leptos::prelude::*;

#[component]
pub fn PageScripts(scripts: Vec<String>) -> impl IntoView {
    scripts
        .into_iter()
        .map(|src| view! { <script src=src></script> })
        .collect::<Vec<_>>()
}

/// Landing page for one app
#[component]
pub fn AppPageView(app: AppDescriptor, chrome: Chrome) -> impl IntoView {
    let Chrome {
        site_name,
        community_url,
        author,
        year,
        apps,
        pages,
        scripts,
    } = chrome;

    let detail = match &app.version {
        Some(version) => format!("{} · v{}", app.installer_kind(), version),
        None => app.installer_kind(),
    };
    let requirements = app.requirements.clone();
    let features = app.features.clone();
    let screenshots = app.screenshots.clone();
    let install_steps = app.install_steps.clone();

    view! {
        <AppNav site_name=site_name.clone() apps=apps.clone() current=app.route.clone() />
        <main class="app-page" style=format!("--accent: {}", app.accent_color)>
            <section class="hero">
                <img class="app-icon" src=app.icon.clone() alt=format!("{} icon", app.name) width="128" height="128" />
                <span class="category">{app.category.clone()}</span>
                <h1>{app.name.clone()}</h1>
                <p class="tagline">{app.tagline.clone()}</p>
                <DownloadButton
                    url=app.download_url.clone()
                    filename=app.download_filename.clone()
                    label="Download for macOS"
                    detail=detail
                />
                {requirements.map(|req| view! { <p class="requirements">{req}</p> })}
            </section>

            {(!features.is_empty()).then(|| view! { <FeatureGrid features=features /> })}

            {(!screenshots.is_empty()).then(|| {
                let alt = format!("{} screenshot", app.name);
                view! {
                    <section class="screenshots">
                        {screenshots
                            .into_iter()
                            .map(|src| view! { <img src=src alt=alt.clone() loading="lazy" /> })
                            .collect::<Vec<_>>()}
                    </section>
                }
            })}

            {(!install_steps.is_empty()).then(|| view! {
                <section class="install">
                    <h2>"Installation"</h2>
                    <ol>
                        {install_steps
                            .into_iter()
                            .map(|step| view! { <li>{step}</li> })
                            .collect::<Vec<_>>()}
                    </ol>
                </section>
            })}

            <FeedbackSection
                app_name=app.name.clone()
                accent=app.accent_color.clone()
                community_url=community_url
            />
        </main>
        <AppFooter site_name=site_name author=author year=year apps=apps pages=pages />
        <PageScripts scripts=scripts />
    }
}

#[component]
fn FeatureGrid(features: Vec<Feature>) -> impl IntoView {
    view! {
        <section class="features">
            <h2>"Features"</h2>
            <div class="feature-grid">
                {features
                    .into_iter()
                    .map(|feature| view! {
                        <div class="feature">
                            <h3>{feature.title}</h3>
                            <p>{feature.description}</p>
                        </div>
                    })
                    .collect::<Vec<_>>()}
            </div>
        </section>
    }
}

/// Markdown-backed page (legal notice, terms)
#[component]
pub fn StaticPageView(
    #[prop(into)] title: String,
    #[prop(into)] route: String,
    /// Already rendered HTML
    #[prop(into)]
    content: String,
    chrome: Chrome,
) -> impl IntoView {
    view! {
        <AppNav site_name=chrome.site_name.clone() apps=chrome.apps.clone() current=route />
        <main class="static-page">
            <h1>{title}</h1>
            <article class="prose" inner_html=content></article>
        </main>
        <AppFooter
            site_name=chrome.site_name
            author=chrome.author
            year=chrome.year
            apps=chrome.apps
            pages=chrome.pages
        />
        <PageScripts scripts=chrome.scripts />
    }
}

/// Generated index listing every app
#[component]
pub fn CatalogIndex(chrome: Chrome) -> impl IntoView {
    let cards = chrome
        .apps
        .iter()
        .cloned()
        .map(|app| view! {
            <a class="app-card" href=app.route style=format!("--accent: {}", app.accent)>
                <img src=app.icon alt="" width="64" height="64" loading="lazy" />
                <span class="category">{app.category}</span>
                <h2>{app.name}</h2>
                <p>{app.tagline}</p>
            </a>
        })
        .collect::<Vec<_>>();

    view! {
        <AppNav site_name=chrome.site_name.clone() apps=chrome.apps.clone() current="/" />
        <main class="catalog">
            <h1>{chrome.site_name.clone()}</h1>
            <div class="app-grid">{cards}</div>
        </main>
        <AppFooter
            site_name=chrome.site_name
            author=chrome.author
            year=chrome.year
            apps=chrome.apps
            pages=chrome.pages
        />
        <PageScripts scripts=chrome.scripts />
    }
}

#[component]
pub fn NotFoundView(chrome: Chrome) -> impl IntoView {
    view! {
        <AppNav site_name=chrome.site_name.clone() apps=chrome.apps.clone() current="/404" />
        <main class="not-found">
            <p class="status">"404"</p>
            <h1>"Page not found"</h1>
            <p>"The page you were looking for does not exist or has moved."</p>
            <a class="back-home" href="/">"Back to all apps"</a>
        </main>
        <AppFooter
            site_name=chrome.site_name
            author=chrome.author
            year=chrome.year
            apps=chrome.apps
            pages=chrome.pages
        />
        <PageScripts scripts=chrome.scripts />
    }
}

/// Whole-page replacement shown when a page fails to render
#[component]
pub fn ErrorView(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <main class="error-page">
            <h1>"Something went wrong"</h1>
            <p>"This page could not be displayed."</p>
            <pre class="error-detail">{message}</pre>
            <a class="back-home" href="/">"Back to all apps"</a>
        </main>
    }
}
