use std::cmp::Reverse;

/// Maximum number of bullets produced from free text
pub const MAX_BULLETS: usize = 5;
/// Maximum characters per bullet before truncation
pub const BULLET_MAX_CHARS: usize = 240;
/// Maximum characters in a title before truncation
pub const TITLE_MAX_CHARS: usize = 80;
/// Sentences kept by [`naive_summarize`]
pub const NAIVE_MAX_SENTENCES: usize = 4;
/// Sentences must be strictly longer than this to become bullets
pub const MIN_SENTENCE_CHARS: usize = 20;

const ELLIPSIS: &str = "...";

/// Split text into sentences at whitespace that follows `.`, `!` or `?`.
///
/// The input is trimmed first. No abbreviation handling: "e.g. this" splits.
/// Empty input yields a single empty sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let text = text.trim();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if ch.is_whitespace() && matches!(prev, Some('.' | '!' | '?')) {
            sentences.push(&text[start..idx]);

            let mut end = idx + ch.len_utf8();
            while let Some(&(next_idx, next)) = chars.peek() {
                if !next.is_whitespace() {
                    break;
                }
                end = next_idx + next.len_utf8();
                chars.next();
            }
            start = end;
            prev = None;
            continue;
        }
        prev = Some(ch);
    }

    sentences.push(&text[start..]);
    sentences
}

/// Pick up to `max_bullets` of the longest sentences as bullets.
///
/// Sentences of [`MIN_SENTENCE_CHARS`] characters or fewer are dropped. Ties
/// keep their original order.
pub fn generate_bullets(text: &str, max_bullets: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut sentences: Vec<&str> = split_sentences(text)
        .into_iter()
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .collect();

    sentences.sort_by_key(|s| Reverse(s.chars().count()));

    sentences
        .into_iter()
        .take(max_bullets)
        .map(|s| truncate_line(s, BULLET_MAX_CHARS))
        .collect()
}

/// First line of the trimmed text, truncated to [`TITLE_MAX_CHARS`].
pub fn extract_title(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    let first = text.trim().split('\n').next().unwrap_or_default();
    Some(truncate_line(first, TITLE_MAX_CHARS))
}

/// Shorten `line` to at most `max_chars` characters plus an ellipsis.
///
/// Cuts back to the last space inside the first `max_chars` characters. When
/// that prefix has no space the cut is made at `max_chars` exactly.
pub fn truncate_line(line: &str, max_chars: usize) -> String {
    let Some((end, _)) = line.char_indices().nth(max_chars) else {
        return line.to_string();
    };

    let prefix = &line[..end];
    let kept = match prefix.rfind(' ') {
        Some(space) => &prefix[..space],
        None => prefix,
    };
    format!("{kept}{ELLIPSIS}")
}

/// Keep the first `max_sentences` sentences, joined by single spaces.
pub fn naive_summarize(text: &str, max_sentences: usize) -> String {
    split_sentences(text)
        .into_iter()
        .take(max_sentences)
        .collect::<Vec<_>>()
        .join(" ")
}
