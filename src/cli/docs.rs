//! `skald docs` command
//!
//! Outline-driven documentation generation.
//!
//! # Usage
//! ```bash
//! skald docs init                      # Write a starter .skald/outline.yml
//! skald docs generate                  # Generate docs into the current directory
//! skald docs generate -c proj -o site  # Explicit config and output roots
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::config::ConfigStore;
use crate::core::outline::Outline;
use crate::core::pipeline::{self, DocBackend};
use crate::remote::SkaldClient;

const STARTER_OUTLINE: &str = r#"# auto-generated example file
api:
  _docs:
    - name: authentication.md
      title: Authentication
      description: API authentication guide
  reference:
    _docs:
      - name: user.md
        title: User API
        description: User endpoints
      - name: organization.md
        title: Organization API
        description: Organization endpoints

features:
  _docs:
    - name: features.md
      title: Features Overview
      description: Overview of all features
  feat1:
    _docs:
      - name: feat1-overview.md
        title: Feature 1 Overview
        description: Detailed overview of feature 1
"#;

#[derive(Args, Debug)]
pub struct DocsArgs {
    #[command(subcommand)]
    pub command: DocsCommands,
}

#[derive(Subcommand, Debug)]
pub enum DocsCommands {
    /// Generate documentation
    Generate {
        /// Path to the directory holding .skald/outline.yml
        #[arg(short, long, default_value = ".")]
        config_path: PathBuf,

        /// Output directory for generated files
        #[arg(short, long, default_value = ".")]
        output_path: PathBuf,
    },

    /// Initialize documentation structure with an example outline.yml
    Init {
        /// Path to the directory holding .skald/outline.yml
        #[arg(short, long, default_value = ".")]
        config_path: PathBuf,
    },
}

/// Execute docs command
pub async fn execute(args: DocsArgs, store: &ConfigStore) -> Result<()> {
    match args.command {
        DocsCommands::Generate {
            config_path,
            output_path,
        } => {
            let api_key = store.require_auth("skald docs generate")?;
            let client = SkaldClient::new(api_key)?;
            generate_docs(&client, &config_path, &output_path).await
        }
        DocsCommands::Init { config_path } => init_docs(&config_path),
    }
}

/// Location of the outline file under a config root
fn outline_path(config_path: &Path) -> PathBuf {
    config_path.join(".skald").join("outline.yml")
}

/// Parse the outline and run the batch pipeline
///
/// A missing outline falls back to writing the starter file instead of
/// generating; a malformed outline is fatal.
pub async fn generate_docs(
    backend: &dyn DocBackend,
    config_path: &Path,
    output_path: &Path,
) -> Result<()> {
    let outline_yml = outline_path(config_path);

    if !outline_yml.exists() {
        println!(
            "Initializing skald docs outline at .skald/outline.yml. \
             Update the file according to your needs to start generating docs."
        );
        return init_docs(config_path);
    }

    let content = std::fs::read_to_string(&outline_yml)
        .with_context(|| format!("Failed to read {}", outline_yml.display()))?;
    let outline = Outline::parse(&content).context("Error parsing outline.yml")?;
    println!("📋 Parsed outline structure");

    println!("📚 Generating documentation...");
    println!("Config path: {}", config_path.display());
    println!("Output path: {}", output_path.display());
    println!("Outline file: {}", outline_yml.display());

    let tasks = outline.flatten(output_path);
    println!("📄 Found {} documentation files to generate", tasks.len());

    pipeline::run(backend, &tasks).await;

    println!("{}", "✅ Documentation generated successfully!".green());

    Ok(())
}

/// Write the starter outline, never overwriting an existing one
pub fn init_docs(config_path: &Path) -> Result<()> {
    let skald_dir = config_path.join(".skald");
    let outline_yml = skald_dir.join("outline.yml");

    if !skald_dir.exists() {
        std::fs::create_dir_all(&skald_dir)
            .with_context(|| format!("Failed to create {}", skald_dir.display()))?;
        println!("📁 Created directory: {}", skald_dir.display());
    }

    if outline_yml.exists() {
        println!("⚠️  outline.yml already exists at: {}", outline_yml.display());
        println!("Skipping creation to avoid overwriting existing file.");
        return Ok(());
    }

    std::fs::write(&outline_yml, STARTER_OUTLINE)
        .with_context(|| format!("Failed to write {}", outline_yml.display()))?;
    println!("✅ Created example outline.yml at: {}", outline_yml.display());
    println!("📝 Edit this file to customize your documentation structure.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use async_trait::async_trait;

    struct FixedBackend(&'static str);

    #[async_trait]
    impl DocBackend for FixedBackend {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl DocBackend for FailingBackend {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            bail!("remote unavailable")
        }
    }

    #[test]
    fn test_init_creates_outline() {
        let tmp = tempfile::tempdir().unwrap();

        init_docs(tmp.path()).unwrap();

        let written = std::fs::read_to_string(outline_path(tmp.path())).unwrap();
        assert_eq!(written, STARTER_OUTLINE);
    }

    #[test]
    fn test_init_preserves_existing_outline() {
        let tmp = tempfile::tempdir().unwrap();
        let path = outline_path(tmp.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "custom: {}\n").unwrap();

        init_docs(tmp.path()).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "custom: {}\n");
    }

    #[test]
    fn test_starter_outline_parses() {
        let outline = Outline::parse(STARTER_OUTLINE).unwrap();
        assert_eq!(outline.flatten(Path::new("out")).len(), 5);
    }

    #[tokio::test]
    async fn test_generate_missing_outline_falls_back_to_init() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");

        generate_docs(&FixedBackend("text"), tmp.path(), &out)
            .await
            .unwrap();

        assert!(outline_path(tmp.path()).exists());
        // No generation happened.
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_generate_malformed_outline_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let path = outline_path(tmp.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "api: [unclosed\n").unwrap();

        let err = generate_docs(&FixedBackend("text"), tmp.path(), tmp.path())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("outline.yml"));
    }

    #[tokio::test]
    async fn test_generate_writes_files() {
        let tmp = tempfile::tempdir().unwrap();
        let path = outline_path(tmp.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "api:\n  _docs:\n    - name: a.md\n      title: A\n").unwrap();
        let out = tmp.path().join("out");

        generate_docs(&FixedBackend("# A"), tmp.path(), &out)
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(out.join("api/a.md")).unwrap(),
            "# A"
        );
    }

    #[tokio::test]
    async fn test_generate_survives_backend_failures() {
        let tmp = tempfile::tempdir().unwrap();
        let path = outline_path(tmp.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "api:\n  _docs:\n    - name: a.md\n      title: A\n").unwrap();
        let out = tmp.path().join("out");

        // Per-task failures are contained; the command still completes.
        generate_docs(&FailingBackend, tmp.path(), &out)
            .await
            .unwrap();

        assert!(!out.join("api/a.md").exists());
    }
}
