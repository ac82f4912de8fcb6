//! Reveal markers in model replies.
//!
//! A marker is a bracketed run of uppercase letters, digits and underscores
//! ending in `_TAG`, e.g. `[GOV_TYPE_TAG]`. The persona places one right
//! after each fact it discloses.

/// Byte range of each marker in `text`, brackets included.
fn marker_spans(text: &str) -> Vec<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'[' {
            i += 1;
            continue;
        }
        let body_start = i + 1;
        let mut j = body_start;
        while j < bytes.len() && (bytes[j].is_ascii_uppercase() || bytes[j].is_ascii_digit() || bytes[j] == b'_') {
            j += 1;
        }
        let body = &text[body_start..j];
        if j < bytes.len() && bytes[j] == b']' && body.len() > "_TAG".len() && body.ends_with("_TAG") {
            spans.push((i, j + 1));
            i = j + 1;
        } else {
            i = body_start;
        }
    }
    spans
}

/// Every marker in order of appearance, duplicates included.
pub fn extract_tags(text: &str) -> Vec<String> {
    marker_spans(text)
        .into_iter()
        .map(|(start, end)| text[start..end].to_string())
        .collect()
}

/// Remove markers, collapse runs of whitespace and drop the space left
/// before punctuation.
pub fn strip_tags(text: &str) -> String {
    let mut spaced = String::with_capacity(text.len());
    let mut last = 0;
    for (start, end) in marker_spans(text) {
        spaced.push_str(&text[last..start]);
        spaced.push(' ');
        last = end;
    }
    spaced.push_str(&text[last..]);

    let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out = String::with_capacity(collapsed.len());
    for c in collapsed.chars() {
        if matches!(c, ',' | '.' | '!' | '?' | ':' | ';') && out.ends_with(' ') {
            out.pop();
        }
        out.push(c);
    }
    out.trim().to_string()
}
