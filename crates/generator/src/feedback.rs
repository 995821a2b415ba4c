//! Community feedback templates.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Bug,
    Feature,
    Feedback,
}

impl FeedbackKind {
    pub const ALL: [FeedbackKind; 3] = [FeedbackKind::Bug, FeedbackKind::Feature, FeedbackKind::Feedback];

    pub fn id(self) -> &'static str {
        match self {
            FeedbackKind::Bug => "bug",
            FeedbackKind::Feature => "feature",
            FeedbackKind::Feedback => "feedback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackTemplate {
    pub id: FeedbackKind,
    pub title: &'static str,
    pub description: &'static str,
    pub template: String,
    pub color: &'static str,
}

/// The bug, feature and feedback templates for `app_name`, in that order.
///
/// The name is inserted verbatim.
pub fn feedback_templates(app_name: &str) -> [FeedbackTemplate; 3] {
    FeedbackKind::ALL.map(|kind| template_for(kind, app_name))
}

pub fn template_for(kind: FeedbackKind, app_name: &str) -> FeedbackTemplate {
    match kind {
        FeedbackKind::Bug => FeedbackTemplate {
            id: kind,
            title: "Report a Bug",
            description: "Found something broken? Let us know so we can fix it.",
            template: format!(
                "🐛 Bug Report — {app_name}\n\nmacOS Version: \nApp Version: \n\nWhat happened:\n\n\nSteps to reproduce:\n1. \n2. \n3. \n\nExpected behavior:\n\n\nAdditional info (screenshots, logs, etc.):\n"
            ),
            color: "#EF4444",
        },
        FeedbackKind::Feature => FeedbackTemplate {
            id: kind,
            title: "Request a Feature",
            description: "Have an idea that would make the app better? We're listening.",
            template: format!(
                "💡 Feature Request — {app_name}\n\nDescribe the feature:\n\n\nWhy would this be useful:\n\n\nAny examples or references:\n"
            ),
            color: "#F59E0B",
        },
        FeedbackKind::Feedback => FeedbackTemplate {
            id: kind,
            title: "General Feedback",
            description: "Share your thoughts, suggestions, or just say hello.",
            template: format!("💬 Feedback — {app_name}\n\nYour message:\n\n"),
            color: "#3B82F6",
        },
    }
}

/// First `max_chars` characters of a template body followed by `...`, for the
/// card preview. The ellipsis is appended even when nothing was cut.
pub fn preview(template: &str, max_chars: usize) -> String {
    let head: String = template.chars().take(max_chars).collect();
    format!("{}...", head)
}
