//! Locate the model's text inside an arbitrary provider response
//!
//! Providers disagree on where the generated text lives. The probes below run
//! in a fixed order and the first one that yields something wins:
//!
//! 1. `choices[0].text`, `choices[0].message` (string), `choices[0].message.content`
//! 2. `candidates[0].content`
//! 3. `output[0].content` / `output[0].text`, or `output.content` / `output.text`
//! 4. top-level `text`, `summary`, `result`
//! 5. the whole body as compact JSON
//!
//! Wrong types and missing fields never fail; they fall through to the next probe.

use serde_json::Value;

/// Top-level fields probed after the provider-specific shapes
const TOP_LEVEL_FIELDS: &[&str] = &["text", "summary", "result"];

/// Extract the best guess at the model's text from `body`.
pub fn extract_response_text(body: &Value) -> String {
    from_choices(body)
        .or_else(|| from_candidates(body))
        .or_else(|| from_output(body))
        .or_else(|| {
            TOP_LEVEL_FIELDS
                .iter()
                .find_map(|field| body.get(field).and_then(readable))
        })
        // Compact separators; this string can become the derived title
        .unwrap_or_else(|| body.to_string())
}

fn from_choices(body: &Value) -> Option<String> {
    let first = body.get("choices")?.as_array()?.first()?;
    if !first.is_object() {
        return None;
    }

    first
        .get("text")
        .and_then(readable)
        .or_else(|| {
            first
                .get("message")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .or_else(|| first.get("message")?.get("content").and_then(readable))
}

fn from_candidates(body: &Value) -> Option<String> {
    let first = body.get("candidates")?.as_array()?.first()?;
    if !first.is_object() {
        return None;
    }
    first.get("content").and_then(readable)
}

fn from_output(body: &Value) -> Option<String> {
    let output = match body.get("output")? {
        Value::Array(items) => items.first().filter(|item| item.is_object())?,
        obj @ Value::Object(_) => obj,
        _ => return None,
    };

    output
        .get("content")
        .and_then(readable)
        .or_else(|| output.get("text").and_then(readable))
}

/// Render a truthy value as text.
///
/// Strings are used as-is. A Gemini content object (`{"parts": [{"text": ..}]}`)
/// yields its concatenated part texts. Anything else truthy is serialized.
fn readable(value: &Value) -> Option<String> {
    if !is_truthy(value) {
        return None;
    }

    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => {
            let text: String = map
                .get("parts")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect();
            if text.is_empty() {
                Some(value.to_string())
            } else {
                Some(text)
            }
        }
        other => Some(other.to_string()),
    }
}

/// Emptiness test shared by the extractor and the summary check:
/// null, false, zero, and empty strings/arrays/objects are all "absent".
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
