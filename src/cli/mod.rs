//! CLI module - Command definitions and handlers

use clap::{Parser, Subcommand};

pub mod auth;
pub mod chat;
pub mod docs;
pub mod memo;

/// skald - CLI for the Skald knowledge base
///
/// Authenticate once, then ask questions, add memos, and generate
/// documentation from your knowledge base.
#[derive(Parser, Debug)]
#[command(name = "skald")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate with your Skald project API key
    Auth,

    /// Chat with your knowledge base
    Chat(chat::ChatArgs),

    /// Memo management commands
    Memo(memo::MemoArgs),

    /// Generate documentation from your knowledge base
    Docs(docs::DocsArgs),
}
