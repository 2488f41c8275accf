//! Briefly - short structured summaries for text and chat transcripts
//!
//! This crate provides an HTTP service with a single `/analyze` endpoint that
//! asks a generative-language API for a title and bullet summary, and falls
//! back to a local heuristic summarizer when no provider is configured.

pub mod analyze;
pub mod config;
pub mod error;
pub mod provider;
pub mod server;
pub mod summarizer;
pub mod testing;

pub use error::BrieflyError;
