// src/core/html.rs
// Markup helpers for single <p> fragments as emitted by the crawler.
// Case-insensitive on ASCII tag names only.

/// Closing tags the ministry site uses to bold the speaker prefix of a turn.
const EMPHASIS_CLOSERS: [&str; 2] = ["</b>", "</strong>"];

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// True when the fragment closes a bold/strong run anywhere.
pub fn has_emphasis_marker(s: &str) -> bool {
    let lc = to_lower(s);
    EMPHASIS_CLOSERS.iter().any(|tag| lc.contains(tag))
}

/// Remove every `<...>` tag together with its attributes.
///
/// A `<` with no `>` after it, or a `>` with no opening `<`, is dropped on its
/// own and the surrounding text is kept. The result never contains `<` or `>`.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(open) = rest.find(['<', '>']) {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        if rest.as_bytes()[open] == b'<' {
            match after.find('>') {
                // skip "<...>" as a whole tag
                Some(close) => rest = &after[close + 1..],
                // unterminated: drop only the bracket
                None => rest = after,
            }
        } else {
            rest = after;
        }
    }
    out.push_str(rest);
    out
}
