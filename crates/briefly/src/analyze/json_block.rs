//! Best-effort JSON recovery from model output
//!
//! Takes the span from the first `{` to the last `}` and tries to parse it,
//! then tries the whole string. The greedy span misfires when unrelated
//! braces surround the intended object.

use serde_json::{Map, Value};

use super::extract::is_truthy;

/// Parse an embedded JSON object out of `text`, or `text` itself.
pub fn parse_json_block(text: &str) -> Option<Value> {
    if text.is_empty() {
        return None;
    }

    if let Some(block) = outermost_brace_span(text) {
        if let Ok(value) = serde_json::from_str(block) {
            return Some(value);
        }
    }

    serde_json::from_str(text).ok()
}

/// Accept a parsed value as a final summary when it is an object with a
/// non-empty `title` and non-empty `bullets`.
pub fn structured_summary(value: Value) -> Option<Map<String, Value>> {
    let Value::Object(map) = value else {
        return None;
    };

    let complete = ["title", "bullets"]
        .iter()
        .all(|key| map.get(*key).is_some_and(is_truthy));

    complete.then_some(map)
}

fn outermost_brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
