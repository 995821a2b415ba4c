use anyhow::{Context, Result};
use appshelf_core::config::parse_shelf_toml;
use appshelf_generator::render::{RenderOptions, Renderer, render_error_page};
use appshelf_generator::{Page, clipboard, styles};
use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri, header},
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use std::{net::SocketAddr, path::PathBuf};
use tokio::sync::broadcast;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{debug, error, warn};

use super::{CONFIG_FILE, require_catalog};

/// Browser side of hot reload: reload the page on every server event.
const RELOAD_SCRIPT: &str = r#"(() => {
  const source = new EventSource('/_reload');
  source.onmessage = () => location.reload();
  source.onerror = () => source.close();
})();
"#;

#[derive(Clone)]
struct AppState {
    root: PathBuf,
    reload_tx: broadcast::Sender<()>,
}

/// Start preview server with hot reload for local development.
///
/// Every request re-reads `shelf.toml` and renders the page its path
/// resolves to, so edits show up without restarting.
pub async fn run(path: PathBuf, port: u16) -> Result<()> {
    println!("🛍  Starting preview server...");
    println!("   Catalog: {}", path.display());

    let catalog = require_catalog(&path)?;

    println!("   ✓ Loaded: {}", catalog.site.name);
    println!("   ✓ Apps: {}", catalog.apps.len());
    println!("   ✓ Pages: {}", catalog.pages.len());

    let (reload_tx, _) = broadcast::channel::<()>(100);

    let state = AppState {
        root: path.clone(),
        reload_tx: reload_tx.clone(),
    };

    let watcher_path = path.clone();
    tokio::spawn(async move {
        if let Err(e) = watch_files(watcher_path, reload_tx).await {
            error!("File watcher error: {:#}", e);
        }
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Preview ready at: http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to port {}", port))?;

    axum::serve(listener, router(state))
        .await
        .context("Server error")?;

    Ok(())
}

fn router(state: AppState) -> Router {
    let stylesheet = format!("/{}", styles::stylesheet_file_name());

    Router::new()
        .route("/_reload", get(sse_handler))
        .route("/_reload.js", get(|| async { javascript(RELOAD_SCRIPT) }))
        .route("/copy.js", get(|| async { javascript(clipboard::COPY_SCRIPT) }))
        .route(
            &stylesheet,
            get(|| async { ([(header::CONTENT_TYPE, "text/css")], styles::SITE_CSS) }),
        )
        .nest_service("/assets", ServeDir::new(state.root.join("assets")))
        .fallback(page_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn javascript(body: &'static str) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript")], body)
}

/// Watch for file changes and trigger reload
async fn watch_files(path: PathBuf, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut watcher =
        notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })?;

    watcher.watch(&path, RecursiveMode::Recursive)?;

    while let Some(event) = rx.recv().await {
        match event.kind {
            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) => {
                // Skip editor swap and hidden files
                if event.paths.iter().any(|p| {
                    let filename = p.file_name().unwrap_or_default().to_string_lossy();
                    !filename.starts_with('.') && !filename.ends_with('~')
                }) {
                    println!("   📝 File changed, reloading...");
                    debug!(paths = ?event.paths, "change detected");
                    let _ = reload_tx.send(());
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// SSE endpoint for hot reload
async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let mut rx = state.reload_tx.subscribe();

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(()) => yield Ok(Event::default().data("reload")),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Render whatever the request path resolves to.
async fn page_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let stylesheet = format!("/{}", styles::stylesheet_file_name());

    let catalog = match parse_shelf_toml(state.root.join(CONFIG_FILE)) {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!("Failed to load {}: {}", CONFIG_FILE, e);
            let message = format!("Failed to load {}: {}", CONFIG_FILE, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_error_page(&stylesheet, &message)),
            )
                .into_response();
        }
    };

    let renderer = Renderer::new(&catalog, &state.root, &RenderOptions::preview());
    let page = renderer.routes().resolve(uri.path());
    match renderer.render_or_error(page) {
        Ok(html) if page == Page::NotFound => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Ok(html) => Html(html).into_response(),
        Err(error_page) => (StatusCode::INTERNAL_SERVER_ERROR, Html(error_page)).into_response(),
    }
}
