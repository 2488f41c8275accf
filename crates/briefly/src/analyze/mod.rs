//! The `/analyze` pipeline
//!
//! normalize → (provider call → extract → JSON-block parse) or local
//! summarize → [`AnalyzeResult`].

mod extract;
mod json_block;
mod normalize;
mod pipeline;
mod prompts;
mod types;

pub use extract::extract_response_text;
pub use json_block::{parse_json_block, structured_summary};
pub use normalize::{MAX_INPUT_CHARS, normalize_input};
pub use pipeline::{Analyzer, summarize_locally, summarize_provider_output};
pub use prompts::{SUMMARY_INSTRUCTION, build_summary_prompt};
pub use types::{AnalyzeError, AnalyzeRequest, AnalyzeResult, Summary};
