//! Skald API types
//!
//! DTOs for the knowledge-base service.

use serde::{Deserialize, Serialize};

// ============== Chat Types ==============

/// Request for a chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

/// Single-shot chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Event on a streamed chat
///
/// A stream is a finite sequence of `Token` events terminated by exactly
/// one `Done`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChatEvent {
    Token {
        #[serde(default)]
        content: Option<String>,
    },
    Done,
}

// ============== Memo Types ==============

/// Client-side metadata attached to a memo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoMetadata {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    pub created_via: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
}

/// Request to create a memo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMemoRequest {
    pub title: String,
    pub content: String,
    pub metadata: MemoMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    pub tags: Vec<String>,
    pub source: String,
}

/// Response from memo creation
///
/// A missing `memo_uuid` signals failure even on a 2xx status; callers must
/// surface it as an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMemoResponse {
    #[serde(default)]
    pub memo_uuid: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ============== Error Types ==============

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(default)]
    pub details: Option<String>,
}
