use leptos::prelude::*;

/// Direct link to an externally hosted installer.
///
/// The release host serves the file with a proper filename, so the link only
/// carries a `download` hint and never proxies the artifact.
#[component]
pub fn DownloadButton(
    #[prop(into)] url: String,
    #[prop(into)] filename: String,
    #[prop(into)] label: String,
    #[prop(into)] detail: String,
) -> impl IntoView {
    view! {
        <a class="download-button" href=url download=filename rel="noopener">
            <span class="download-label">{label}</span>
            <span class="download-detail">{detail}</span>
        </a>
    }
}
