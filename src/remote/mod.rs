//! Skald API client module
//!
//! HTTP facade over the remote knowledge-base service.

mod client;
mod types;

pub use client::SkaldClient;
pub use types::*;
