//! `skald memo` command
//!
//! # Usage
//! ```bash
//! skald memo add --title "Release notes" --file-path notes.md --tags release,notes
//! skald memo write --tags scratch
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use dialoguer::Input;

use crate::config::ConfigStore;
use crate::remote::{CreateMemoRequest, MemoMetadata, SkaldClient};

#[derive(Args, Debug)]
pub struct MemoArgs {
    #[command(subcommand)]
    pub command: MemoCommands,
}

#[derive(Subcommand, Debug)]
pub enum MemoCommands {
    /// Add a new memo from a file
    Add {
        /// Title of the memo
        #[arg(short, long)]
        title: String,

        /// Path to the file containing memo content
        #[arg(short, long)]
        file_path: PathBuf,

        /// Comma-separated tags for the memo
        #[arg(long)]
        tags: Option<String>,

        /// Source of the memo (e.g., "cli", "notion")
        #[arg(long, default_value = "cli")]
        source: String,

        /// External reference ID for the memo
        #[arg(long)]
        reference_id: Option<String>,
    },

    /// Write a new memo using your text editor
    Write {
        /// Comma-separated tags for the memo
        #[arg(long)]
        tags: Option<String>,

        /// Source of the memo (e.g., "cli", "notion")
        #[arg(long, default_value = "cli")]
        source: String,

        /// External reference ID for the memo
        #[arg(long)]
        reference_id: Option<String>,
    },
}

/// Execute memo command
pub async fn execute(args: MemoArgs, store: &ConfigStore) -> Result<()> {
    match args.command {
        MemoCommands::Add {
            title,
            file_path,
            tags,
            source,
            reference_id,
        } => add(store, title, &file_path, tags, source, reference_id).await,
        MemoCommands::Write {
            tags,
            source,
            reference_id,
        } => write(store, tags, source, reference_id).await,
    }
}

/// Split a comma-separated tag option into trimmed tags
fn parse_tags(tags: Option<String>) -> Vec<String> {
    tags.map(|t| {
        t.split(',')
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

async fn add(
    store: &ConfigStore,
    title: String,
    file_path: &Path,
    tags: Option<String>,
    source: String,
    reference_id: Option<String>,
) -> Result<()> {
    let api_key = store.require_auth("skald memo add")?;
    let client = SkaldClient::new(api_key)?;

    if !file_path.exists() {
        bail!("File not found: {}", file_path.display());
    }

    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;

    if content.trim().is_empty() {
        bail!("File is empty: {}", file_path.display());
    }

    let tags = parse_tags(tags);

    let absolute = std::fs::canonicalize(file_path).unwrap_or_else(|_| file_path.to_path_buf());
    let metadata = MemoMetadata {
        source: source.clone(),
        file_path: Some(absolute.display().to_string()),
        created_via: "skald-cli".to_string(),
        editor: None,
    };

    println!("📝 Creating memo: \"{}\"", title);
    println!("📁 From file: {}", file_path.display());
    if !tags.is_empty() {
        println!("🏷️  Tags: {}", tags.join(", "));
    }

    let result = client
        .create_memo(CreateMemoRequest {
            title,
            content,
            metadata,
            reference_id,
            tags,
            source,
        })
        .await?;

    match result.memo_uuid {
        Some(uuid) => println!("✅ Memo created successfully! UUID: {}", uuid.bold()),
        None => bail!("Failed to create memo"),
    }

    Ok(())
}

async fn write(
    store: &ConfigStore,
    tags: Option<String>,
    source: String,
    reference_id: Option<String>,
) -> Result<()> {
    let api_key = store.require_auth("skald memo write")?;
    let client = SkaldClient::new(api_key)?;

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    // Scoped temp file: removed on drop whichever exit path is taken.
    let temp_file = tempfile::Builder::new()
        .prefix("skald-memo-")
        .suffix(".md")
        .tempfile()
        .context("Failed to create temporary file")?;

    println!("📝 Opening {} editor...", editor);
    println!("💡 Write your memo content and save to continue");
    println!("💡 If you want to cancel, quit without writing any content");

    let status = match Command::new(&editor).arg(temp_file.path()).status() {
        Ok(status) => status,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            bail!(
                "{} editor not found. Please install it or set $EDITOR to use this command.\n\
                 💡 Alternative: Use \"skald memo add\" with a file instead.",
                editor
            );
        }
        Err(err) => return Err(err).context("Failed to launch editor"),
    };

    // Editors exit 1 on some normal save-and-quit paths; only other
    // statuses count as failure.
    if !matches!(status.code(), Some(0) | Some(1)) {
        bail!("{} exited with status {}", editor, status);
    }

    let content = match std::fs::read_to_string(temp_file.path()) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("❌ Error reading temporary file: {}", err);
            return Ok(());
        }
    };

    if content.trim().is_empty() {
        eprintln!("❌ No content written. Memo creation cancelled.");
        return Ok(());
    }

    let title: String = match Input::new()
        .with_prompt("Enter memo title")
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("Title cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()
    {
        Ok(title) => title,
        Err(_) => {
            println!("❌ Memo creation cancelled.");
            return Ok(());
        }
    };

    let tags = parse_tags(tags);

    let metadata = MemoMetadata {
        source: source.clone(),
        file_path: None,
        created_via: "skald-cli-write".to_string(),
        editor: Some(editor),
    };

    println!("📝 Creating memo: \"{}\"", title);
    if !tags.is_empty() {
        println!("🏷️  Tags: {}", tags.join(", "));
    }

    let result = client
        .create_memo(CreateMemoRequest {
            title,
            content,
            metadata,
            reference_id,
            tags,
            source,
        })
        .await?;

    match result.memo_uuid {
        Some(_) => println!("{}", "✅ Memo created successfully!".green()),
        None => bail!("Failed to create memo"),
    }

    Ok(())
}
