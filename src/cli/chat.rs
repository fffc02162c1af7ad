//! `skald chat` command
//!
//! # Usage
//! ```bash
//! skald chat ask "How does billing work?"
//! ```

use std::io::Write;

use anyhow::Result;
use clap::{Args, Subcommand};
use futures::{pin_mut, StreamExt};

use crate::config::ConfigStore;
use crate::remote::{ChatEvent, SkaldClient};

#[derive(Args, Debug)]
pub struct ChatArgs {
    #[command(subcommand)]
    pub command: ChatCommands,
}

#[derive(Subcommand, Debug)]
pub enum ChatCommands {
    /// Ask a question to your knowledge base
    Ask {
        /// The question to ask
        question: String,
    },
}

/// Execute chat command
pub async fn execute(args: ChatArgs, store: &ConfigStore) -> Result<()> {
    match args.command {
        ChatCommands::Ask { question } => ask(store, &question).await,
    }
}

/// Stream an answer, printing each token as it arrives
async fn ask(store: &ConfigStore, question: &str) -> Result<()> {
    let api_key = store.require_auth("skald chat ask")?;
    let client = SkaldClient::new(api_key)?;

    println!("🤔 Thinking...\n");

    let stream = client.streamed_chat(question).await?;
    pin_mut!(stream);

    while let Some(event) = stream.next().await {
        match event? {
            ChatEvent::Token {
                content: Some(content),
            } => {
                print!("{}", content);
                std::io::stdout().flush()?;
            }
            ChatEvent::Token { content: None } => {}
            ChatEvent::Done => {
                println!("\n\n✅ Done!");
                break;
            }
        }
    }

    Ok(())
}
