use serde_json::Value;

use super::types::{AnalyzeError, AnalyzeRequest};

/// Joined transcripts are capped at this many characters
pub const MAX_INPUT_CHARS: usize = 20_000;

/// Turn a request into the single string that gets summarized.
///
/// Non-empty `text` is used verbatim and uncapped. Otherwise non-empty
/// `messages` are rendered one per line and cut to [`MAX_INPUT_CHARS`].
pub fn normalize_input(request: &AnalyzeRequest) -> Result<String, AnalyzeError> {
    if let Some(text) = request.text.as_deref().filter(|t| !t.is_empty()) {
        return Ok(text.to_string());
    }

    match request.messages.as_deref() {
        Some(messages) if !messages.is_empty() => {
            let joined = messages
                .iter()
                .map(render_message)
                .collect::<Vec<_>>()
                .join("\n");
            Ok(take_chars(joined, MAX_INPUT_CHARS))
        }
        _ => Err(AnalyzeError::InvalidInput),
    }
}

/// Strings render as themselves, everything else as compact JSON.
fn render_message(message: &Value) -> String {
    match message {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn take_chars(mut s: String, max_chars: usize) -> String {
    if let Some((end, _)) = s.char_indices().nth(max_chars) {
        s.truncate(end);
    }
    s
}
