//! Prompt template for summary generation

/// Instruction sent ahead of the text.
///
/// The `\n` sequences are literal backslash-n characters, not newlines.
pub const SUMMARY_INSTRUCTION: &str = "You are an assistant that extracts the important information and provides a short, \
clear summary (3-6 bullets) and a 1-line title. Format output as JSON with keys: \
\"title\" and \"bullets\" (array of strings).\\n\\n";

/// Build the summary prompt for `text`.
pub fn build_summary_prompt(text: &str) -> String {
    format!("{SUMMARY_INSTRUCTION}Text to summarize:\\n{text}")
}
