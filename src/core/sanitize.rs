// src/core/sanitize.rs

use super::html;

/// One `<p>` fragment after markup and invisible-space cleanup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedLine {
    pub text: String,
    /// Set when the source fragment closed a `<b>`/`<strong>` run.
    pub has_emphasis_marker: bool,
}

impl NormalizedLine {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// `&nbsp;` and U+00A0 become a plain space; U+3000 is removed outright.
pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace('\u{a0}', " ")
        .replace('\u{3000}', "")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Raw crawler fragment → [`NormalizedLine`].
///
/// The emphasis flag is read before anything is stripped, since the tags
/// that carry it are removed by the later steps.
pub fn normalize_line(raw: &str) -> NormalizedLine {
    let has_emphasis_marker = html::has_emphasis_marker(raw);
    let text = normalize_ws(&html::strip_tags(normalize_entities(raw)));
    NormalizedLine { text, has_emphasis_marker }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invisible_spaces_are_normalized() {
        let line = normalize_line("<p>\u{3000}\u{3000}记者：你好。</p>");
        assert_eq!(line.text, "记者：你好。");
        assert!(!line.has_emphasis_marker);

        let line = normalize_line("<p>Q:&nbsp;Hello\u{a0}there</p>");
        assert_eq!(line.text, "Q: Hello there");
    }

    #[test]
    fn emphasis_survives_stripping() {
        let line = normalize_line("<p><strong>Reuters:</strong> A question.</p>");
        assert_eq!(line.text, "Reuters: A question.");
        assert!(line.has_emphasis_marker);
    }

    #[test]
    fn output_is_free_of_brackets_and_special_spaces() {
        let samples = [
            "<p>a<b>b</b>c</p>",
            "<<>>",
            "3 > 2 < 4",
            "\u{3000}<span>\u{a0}x&nbsp;</span>",
            "<p attr='>'>tail",
        ];
        for raw in samples {
            let line = normalize_line(raw);
            assert!(
                !line.text.contains(['<', '>', '\u{a0}', '\u{3000}']),
                "{raw:?} -> {:?}",
                line.text
            );
        }
    }

    #[test]
    fn blank_after_stripping() {
        assert!(normalize_line("<p>&nbsp;</p>").is_blank());
        assert!(normalize_line("<p>\u{3000}</p>").is_blank());
        assert!(!normalize_line("<p>x</p>").is_blank());
    }

    #[test]
    fn normalize_ws_collapses_runs() {
        assert_eq!(normalize_ws("  a \n\t b  "), "a b");
    }

    #[test]
    fn line_whitespace_is_collapsed_and_trimmed() {
        let line = normalize_line("<p>  Q:   two\tspaces  </p>");
        assert_eq!(line.text, "Q: two spaces");
    }
}
