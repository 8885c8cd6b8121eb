//! Escapes characters LaTeX cannot take verbatim.

/// Replacement table, applied in order.
///
/// No replacement contains another rule's input, so the order only matters
/// for readability.
pub const REPLACEMENTS: [(&str, &str); 12] = [
    ("é", "\\'{e}"),
    ("è", "\\`{e}"),
    ("%", "\\%"),
    ("˚", "\\degree{}"),
    ("½", "\\sfrac{1}{2}"),
    ("⅓", "\\sfrac{1}{3}"),
    ("⅔", "\\sfrac{2}{3}"),
    ("¼", "\\sfrac{1}{4}"),
    ("¾", "\\sfrac{3}{4}"),
    ("–", "---"),
    ("—", "---"),
    ("°", "\\degree{}"),
];

/// Apply every replacement in [`REPLACEMENTS`] to `text`.
///
/// Occurrences already escaped by a backslash are left alone, so a
/// template's own `\%` survives and running the pass twice changes nothing.
/// A preceding `\\` is a line break, not an escape.
pub fn sanitize(text: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| replace_unescaped(&acc, from, to))
}

fn replace_unescaped(text: &str, from: &str, to: &str) -> String {
    if !text.contains(from) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (start, matched) in text.match_indices(from) {
        out.push_str(&text[last..start]);
        if is_escaped(&text[..start]) {
            out.push_str(matched);
        } else {
            out.push_str(to);
        }
        last = start + matched.len();
    }
    out.push_str(&text[last..]);
    out
}

// An odd run of trailing backslashes escapes what follows.
fn is_escaped(before: &str) -> bool {
    before.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}
