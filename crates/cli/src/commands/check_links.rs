use anyhow::{Context, Result};
use appshelf_core::AppDescriptor;
use appshelf_core::config::url_filename;
use futures::stream::{self, StreamExt};
use reqwest::{Client, Url, header::CONTENT_DISPOSITION};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use super::require_catalog;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug)]
pub struct LinkReport {
    pub app: String,
    pub url: String,
    pub expected_filename: String,
    pub outcome: LinkOutcome,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Final response after redirects
    Reachable {
        status: u16,
        served_filename: Option<String>,
    },
    Unreachable(String),
}

impl LinkReport {
    /// Reachable with a 2xx status and the file name the page advertises.
    pub fn is_ok(&self) -> bool {
        match &self.outcome {
            LinkOutcome::Reachable {
                status,
                served_filename,
            } => {
                (200..300).contains(status)
                    && served_filename.as_deref() == Some(self.expected_filename.as_str())
            }
            LinkOutcome::Unreachable(_) => false,
        }
    }
}

/// HEAD every download URL in the catalog.
pub async fn run(path: PathBuf, concurrency: usize) -> Result<()> {
    let catalog = require_catalog(&path)?;
    println!(
        "🔗 Checking {} download link(s) ({} at a time)...",
        catalog.apps.len(),
        concurrency.max(1)
    );

    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("appshelf/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let reports = check_links(&client, &catalog.apps, concurrency).await;

    let mut failures = 0;
    for report in &reports {
        let mark = if report.is_ok() { "✓" } else { "✗" };
        match &report.outcome {
            LinkOutcome::Reachable {
                status,
                served_filename,
            } => println!(
                "   {} {}: HTTP {} serving '{}' (expected '{}')",
                mark,
                report.app,
                status,
                served_filename.as_deref().unwrap_or("?"),
                report.expected_filename
            ),
            LinkOutcome::Unreachable(err) => {
                println!("   {} {}: {} ({})", mark, report.app, err, report.url)
            }
        }
        if !report.is_ok() {
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} download link(s) failed", failures, reports.len());
    }
    println!("\n✅ All download links look good");
    Ok(())
}

/// Check `apps` with at most `concurrency` requests in flight. Reports come
/// back in catalog order.
pub async fn check_links(client: &Client, apps: &[AppDescriptor], concurrency: usize) -> Vec<LinkReport> {
    let mut indexed: Vec<(usize, LinkReport)> = stream::iter(apps.iter().enumerate())
        .map(|(i, app)| async move { (i, check_link(client, app).await) })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;
    indexed.sort_by_key(|(i, _)| *i);
    indexed.into_iter().map(|(_, report)| report).collect()
}

async fn check_link(client: &Client, app: &AppDescriptor) -> LinkReport {
    debug!(app = %app.name, url = %app.download_url, "HEAD");
    let outcome = match client.head(&app.download_url).send().await {
        Ok(response) => {
            let disposition = response
                .headers()
                .get(CONTENT_DISPOSITION)
                .and_then(|v| v.to_str().ok());
            LinkOutcome::Reachable {
                status: response.status().as_u16(),
                served_filename: served_filename(disposition, response.url()),
            }
        }
        Err(err) => LinkOutcome::Unreachable(err.to_string()),
    };

    LinkReport {
        app: app.name.clone(),
        url: app.download_url.clone(),
        expected_filename: app.download_filename.clone(),
        outcome,
    }
}

/// File name a browser would save: `Content-Disposition` first, then the last
/// segment of the final URL.
pub fn served_filename(content_disposition: Option<&str>, final_url: &Url) -> Option<String> {
    content_disposition
        .and_then(disposition_filename)
        .or_else(|| url_filename(final_url))
}

fn disposition_filename(header: &str) -> Option<String> {
    let params: Vec<(&str, &str)> = header
        .split(';')
        .filter_map(|part| part.trim().split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .collect();

    // RFC 6266: filename* wins over filename
    if let Some((_, value)) = params
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("filename*"))
        && let Some((_, encoded)) = value.split_once("''")
        && let Ok(decoded) = urlencoding::decode(encoded)
    {
        return Some(decoded.into_owned());
    }

    params
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("filename"))
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}
