//! Whitespace normalization for raw OCR text.

/// Trim the text and collapse every whitespace run to a single space.
///
/// Absent input stays absent.
pub fn normalize(text: Option<&str>) -> Option<String> {
    text.map(normalize_str)
}

/// Non-optional form of [`normalize`].
pub fn normalize_str(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }

    out
}
