use sha2::{Digest, Sha256};

/// First 8 hex chars of the SHA-256 of `data`, used to cache-bust asset names.
pub fn fingerprint(data: &[u8]) -> String {
    let digest = format!("{:x}", Sha256::digest(data));
    digest[..8].to_string()
}

/// Fingerprinted file name of the site stylesheet, e.g. `styles.1a2b3c4d.css`
pub fn stylesheet_file_name() -> String {
    format!("styles.{}.css", fingerprint(SITE_CSS.as_bytes()))
}

/// Shared stylesheet. Pages set `--accent` on their root elements.
pub const SITE_CSS: &str = r#"/* Theme - Dark editorial */
:root {
    --bg: #0a0a0b;
    --surface: rgba(255, 255, 255, 0.02);
    --surface-hover: rgba(255, 255, 255, 0.04);
    --border: rgba(255, 255, 255, 0.06);
    --text: #e8e4df;
    --text-muted: rgba(232, 228, 223, 0.45);
    --accent: #c42d78;
    --radius: 12px;
}

* { margin: 0; padding: 0; box-sizing: border-box; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    line-height: 1.6;
    color: var(--text);
    background: var(--bg);
    min-height: 100vh;
}

a { color: inherit; }

main { max-width: 1080px; margin: 0 auto; padding: 2rem 1.5rem 4rem; }

/* Navigation */
.app-nav {
    position: sticky;
    top: 0;
    z-index: 10;
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 0.75rem 1.5rem;
    background: rgba(10, 10, 11, 0.85);
    backdrop-filter: blur(12px);
    border-bottom: 1px solid var(--border);
}
.brand { font-weight: 700; text-decoration: none; }
.app-switcher { position: relative; }
.app-switcher summary { cursor: pointer; list-style: none; color: var(--text-muted); }
.app-switcher ul {
    position: absolute;
    right: 0;
    margin-top: 0.5rem;
    min-width: 220px;
    list-style: none;
    background: #111113;
    border: 1px solid var(--border);
    border-radius: var(--radius);
    padding: 0.5rem;
}
.app-link {
    display: flex;
    gap: 0.6rem;
    align-items: center;
    padding: 0.45rem 0.6rem;
    border-radius: 8px;
    text-decoration: none;
}
.app-link:hover, .app-link.active { background: var(--surface-hover); color: var(--accent); }

/* Hero */
.hero { text-align: center; padding: 4rem 0 3rem; }
.app-icon { border-radius: 28px; box-shadow: 0 12px 40px rgba(0, 0, 0, 0.5); }
.category {
    display: inline-block;
    margin: 1.5rem 0 0.5rem;
    font-size: 0.7rem;
    letter-spacing: 0.2em;
    text-transform: uppercase;
    color: var(--text-muted);
}
.hero h1 { font-size: 3rem; line-height: 1.1; }
.tagline { margin: 1rem auto 2rem; max-width: 36rem; color: var(--text-muted); }
.requirements { margin-top: 1rem; font-size: 0.8rem; color: var(--text-muted); }

.download-button {
    display: inline-flex;
    flex-direction: column;
    align-items: center;
    padding: 0.9rem 2rem;
    border-radius: var(--radius);
    background: var(--accent);
    color: #fff;
    text-decoration: none;
    font-weight: 600;
}
.download-detail { font-size: 0.7rem; font-weight: 400; opacity: 0.8; }

/* Sections */
section + section { margin-top: 4rem; }
section h2 { font-size: 1.6rem; margin-bottom: 1.5rem; }
.feature-grid, .app-grid, .feedback-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
    gap: 1rem;
}
.feature, .template-card, .app-card {
    padding: 1.25rem;
    border: 1px solid var(--border);
    border-radius: var(--radius);
    background: var(--surface);
}
.feature h3 { font-size: 1rem; color: var(--accent); }
.feature p, .template-card p, .app-card p { font-size: 0.85rem; color: var(--text-muted); }
.screenshots { display: grid; gap: 1.5rem; }
.screenshots img { width: 100%; border-radius: var(--radius); border: 1px solid var(--border); }
.install ol { padding-left: 1.25rem; }
.install li + li { margin-top: 0.5rem; }

/* Catalog */
.catalog h1 { margin-bottom: 2rem; }
.app-card { text-decoration: none; }
.app-card:hover { background: var(--surface-hover); border-color: var(--accent); }
.app-card h2 { font-size: 1.1rem; margin: 0.25rem 0; }
.app-card .category { margin: 0.75rem 0 0; }

/* Feedback */
.feedback { text-align: center; }
.eyebrow { font-size: 0.65rem; letter-spacing: 0.2em; text-transform: uppercase; color: var(--text-muted); }
.feedback-intro p { max-width: 32rem; margin: 0 auto 2rem; font-size: 0.85rem; color: var(--text-muted); }
.template-card { text-align: left; }
.template-card h3 { font-size: 0.9rem; color: var(--card-color); }
.template-preview {
    margin: 1rem 0;
    padding: 0.75rem;
    max-height: 7rem;
    overflow: hidden;
    font-size: 0.65rem;
    white-space: pre-wrap;
    color: var(--text-muted);
    background: rgba(0, 0, 0, 0.3);
    border-radius: 8px;
}
.copy-button {
    width: 100%;
    padding: 0.6rem;
    border-radius: 8px;
    border: 1px solid var(--border);
    background: var(--surface-hover);
    color: var(--text-muted);
    cursor: pointer;
}
.copy-button[data-state="copied"] { color: var(--card-color); border-color: var(--card-color); }
.copy-button[data-state="failed"] { color: #ef4444; border-color: #ef4444; }
.feedback-cta { margin-top: 2rem; }
.community-link {
    display: inline-block;
    padding: 0.75rem 1.5rem;
    border-radius: var(--radius);
    background: linear-gradient(135deg, #0088cc, #0099dd);
    color: #fff;
    text-decoration: none;
}
.hint { margin-top: 0.75rem; font-size: 0.7rem; color: var(--text-muted); }

/* Static, not found, error */
.prose { max-width: 44rem; }
.prose h2 { margin: 2rem 0 0.75rem; font-size: 1.25rem; }
.prose p, .prose li { color: var(--text-muted); margin-bottom: 0.75rem; }
.not-found, .error-page { text-align: center; padding-top: 6rem; }
.status { font-size: 5rem; font-weight: 800; color: var(--accent); }
.back-home { display: inline-block; margin-top: 2rem; }
.error-detail { margin: 2rem auto; max-width: 40rem; text-align: left; white-space: pre-wrap; color: #ef4444; }

/* Footer */
.app-footer {
    border-top: 1px solid var(--border);
    padding: 2rem 1.5rem;
    text-align: center;
    font-size: 0.8rem;
    color: var(--text-muted);
}
.app-footer nav { display: flex; flex-wrap: wrap; justify-content: center; gap: 1rem; margin-bottom: 0.75rem; }

@media (max-width: 640px) {
    .hero h1 { font-size: 2.2rem; }
}
"#;
