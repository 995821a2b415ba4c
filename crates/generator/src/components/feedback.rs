use crate::feedback::{FeedbackTemplate, feedback_templates, preview};
use leptos::prelude::*;

const PREVIEW_CHARS: usize = 160;

/// Community block: the three copyable templates and the group link.
#[component]
pub fn FeedbackSection(
    #[prop(into)] app_name: String,
    #[prop(into)] accent: String,
    #[prop(into)] community_url: String,
) -> impl IntoView {
    let cards = feedback_templates(&app_name)
        .into_iter()
        .map(|template| view! { <TemplateCard template=template /> })
        .collect::<Vec<_>>();

    view! {
        <section class="feedback" id="feedback" style=format!("--accent: {}", accent)>
            <div class="feedback-intro">
                <span class="eyebrow">"Community"</span>
                <h2>{format!("Help Us Improve {}", app_name)}</h2>
                <p>
                    "Found a bug? Have a feature idea? We'd love to hear from you. Copy a template below, then drop it in our community group."
                </p>
            </div>
            <div class="feedback-grid">{cards}</div>
            <div class="feedback-cta">
                <a class="community-link" href=community_url target="_blank" rel="noopener noreferrer">
                    "Join Our Community Group"
                </a>
                <p class="hint">"Copy a template above, then paste it in the group."</p>
            </div>
        </section>
    }
}

#[component]
fn TemplateCard(template: FeedbackTemplate) -> impl IntoView {
    let FeedbackTemplate {
        id,
        title,
        description,
        template,
        color,
    } = template;
    let snippet = preview(&template, PREVIEW_CHARS);

    view! {
        <div class="template-card" data-template=id.id() style=format!("--card-color: {}", color)>
            <h3>{title}</h3>
            <p>{description}</p>
            <pre class="template-preview">{snippet}</pre>
            <button type="button" class="copy-button" data-copy=template>
                <span data-copy-label="">"Copy Template"</span>
            </button>
        </div>
    }
}
