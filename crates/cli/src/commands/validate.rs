use appshelf_validator::validate_catalog;
use std::path::PathBuf;

pub async fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating catalog at: {}", path.display());

    let report = validate_catalog(&path);

    for line in &report.info {
        println!("  ℹ {}", line);
    }
    for warning in &report.warnings {
        println!("  ⚠ {}", warning);
    }
    for error in &report.errors {
        eprintln!("  ✗ {}", error);
    }

    if !report.is_ok() {
        anyhow::bail!(
            "Validation failed: {} error(s), {} warning(s)",
            report.errors.len(),
            report.warnings.len()
        );
    }

    println!(
        "\n✓ Catalog valid ({} warning(s))",
        report.warnings.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init::scaffold;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_scaffolded_catalog_validates() {
        let dir = TempDir::new().unwrap();
        scaffold(dir.path(), "Indie Shelf", "https://apps.example.com").unwrap();
        run(dir.path().to_path_buf()).await.unwrap();
    }

    #[tokio::test]
    async fn test_errors_fail_the_command() {
        let dir = TempDir::new().unwrap();
        let err = run(dir.path().to_path_buf()).await.unwrap_err();
        assert!(err.to_string().contains("Validation failed: 1 error(s)"));
    }
}
