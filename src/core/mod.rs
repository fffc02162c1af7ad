//! Core logic: outline parsing and the batch generation pipeline

pub mod outline;
pub mod pipeline;
