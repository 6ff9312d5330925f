//! Textual renaming of object keys in JSON documents.
//!
//! Generic JSON tooling tends to treat `$ref` as a graph directive rather
//! than a property, so the reader renames the key to `$$ref` before
//! deserializing and the writer renames it back. Only object keys are
//! touched; string values keep their text.

/// Renames every object key equal to `from` into `to`.
///
/// A string literal counts as a key when the next non-whitespace character
/// after it is a colon. Escapes inside literals are honored, so a value
/// like `"not a \"$ref\" key"` passes through unchanged.
pub(crate) fn rename_keys(text: &str, from: &str, to: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices();

    while let Some((start, ch)) = chars.next() {
        if ch != '"' {
            out.push(ch);
            continue;
        }

        let mut escaped = false;
        let mut end = None;
        for (idx, ch) in chars.by_ref() {
            if escaped {
                escaped = false;
                continue;
            }
            match ch {
                '\\' => escaped = true,
                '"' => {
                    end = Some(idx);
                    break;
                }
                _ => {}
            }
        }

        // unterminated literal; serde reports the malformed text later
        let Some(end) = end else {
            out.push_str(&text[start..]);
            break;
        };

        let content = &text[start + 1..end];
        let is_key = text[end + 1..].trim_start().starts_with(':');

        if is_key && content == from {
            out.push('"');
            out.push_str(to);
            out.push('"');
        } else {
            out.push_str(&text[start..=end]);
        }
    }

    out
}
