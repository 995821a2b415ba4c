pub mod build;
pub mod check_links;
pub mod feedback;
pub mod init;
pub mod preview;
pub mod validate;

use anyhow::{Context, Result};
use appshelf_core::{Catalog, parse_shelf_toml};
use std::path::Path;

pub use appshelf_validator::CONFIG_FILE;

/// Load `shelf.toml` from a catalog directory, with hints when it is missing.
pub(crate) fn require_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        anyhow::bail!(
            "Catalog directory does not exist: {}\nRun 'appshelf init {}' first",
            path.display(),
            path.display()
        );
    }

    let config_path = path.join(CONFIG_FILE);
    if !config_path.exists() {
        anyhow::bail!(
            "{} not found in {}\nRun 'appshelf init {}' first",
            CONFIG_FILE,
            path.display(),
            path.display()
        );
    }

    parse_shelf_toml(&config_path).with_context(|| format!("Failed to parse {}", CONFIG_FILE))
}
