//! Batch documentation generation
//!
//! Turns a flat list of `DocTask`s into written files, one remote generation
//! call per task, bounded to a fixed concurrency window. Batches run strictly
//! in sequence; tasks within a batch run concurrently and settle
//! independently.

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::future::join_all;

use super::outline::DocTask;
use crate::remote::SkaldClient;

/// Tasks dispatched concurrently per batch
pub const BATCH_SIZE: usize = 10;

const DOC_GENERATION_PROMPT: &str = "Based on the provided title and description, \
search the knowledge base for relevant information and produce a markdown file \
with documentation covering the provided information. Be concise and professional, \
but not formal.";

/// Generation backend
///
/// Seam between the pipeline and the remote service, so tests can substitute
/// a mock for the live API.
#[async_trait]
pub trait DocBackend: Send + Sync {
    /// Produce document text for a generation prompt
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
impl DocBackend for SkaldClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.chat(prompt).await.map(|r| r.response)
    }
}

/// Run every task to completion, batch by batch
///
/// A failed task is logged and skipped; it never aborts its siblings or
/// later batches, and nothing is retried. Side effects are the written
/// files and console progress lines.
pub async fn run(backend: &dyn DocBackend, tasks: &[DocTask]) {
    let total_batches = tasks.len().div_ceil(BATCH_SIZE);

    for (index, batch) in tasks.chunks(BATCH_SIZE).enumerate() {
        println!(
            "🔄 Processing batch {}/{} ({} files)",
            index + 1,
            total_batches,
            batch.len()
        );

        let outcomes = join_all(batch.iter().map(|task| generate_one(backend, task))).await;

        for (task, outcome) in batch.iter().zip(outcomes) {
            match outcome {
                Ok(()) => println!("✅ Generated: {}", task.output_path.display()),
                Err(err) => {
                    tracing::debug!(path = %task.output_path.display(), "generation failed");
                    eprintln!("❌ Error generating {}: {:#}", task.output_path.display(), err);
                }
            }
        }
    }
}

/// Prompt for one task: fixed instruction template plus title and description
fn build_prompt(task: &DocTask) -> String {
    format!(
        "{}\n\nTitle: {}\nDescription: {}",
        DOC_GENERATION_PROMPT,
        task.title,
        task.description
            .as_deref()
            .unwrap_or("No description provided")
    )
}

async fn generate_one(backend: &dyn DocBackend, task: &DocTask) -> Result<()> {
    let content = backend.generate(&build_prompt(task)).await?;

    if let Some(parent) = task.output_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&task.output_path, content)
        .with_context(|| format!("Failed to write {}", task.output_path.display()))?;

    Ok(())
}
