//! skald - CLI for the Skald knowledge base
//!
//! A thin client over the remote Skald API: authenticate with a project API
//! key, then ask questions, add memos, and generate documentation from an
//! outline.
//!
//! ## Key Concepts
//!
//! - **Credential record**: a single JSON file at `~/.skald/config`, loaded
//!   once per invocation and passed into command handlers.
//! - **Outline**: `.skald/outline.yml` describes the documentation tree; the
//!   reserved `_docs` key lists the files to generate per directory.
//! - **Batch pipeline**: generation requests run ten at a time; batches run
//!   strictly in sequence and per-task failures are contained.

pub mod cli;
pub mod config;
pub mod core;
pub mod remote;

pub use config::{ConfigStore, Credential};
pub use core::outline::{DocSpec, DocTask, Outline, OutlineNode, ParseError};
pub use core::pipeline::DocBackend;
pub use remote::SkaldClient;
