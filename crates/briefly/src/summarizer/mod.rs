//! Local heuristic summarizer
//!
//! Pure string functions used both as the no-provider fallback and to give
//! structure to unstructured model output.

mod local;

pub use local::{
    BULLET_MAX_CHARS, MAX_BULLETS, MIN_SENTENCE_CHARS, NAIVE_MAX_SENTENCES, TITLE_MAX_CHARS,
    extract_title, generate_bullets, naive_summarize, split_sentences, truncate_line,
};
