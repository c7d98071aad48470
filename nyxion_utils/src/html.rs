//! Escaping of untrusted text before it is interpolated into HTML.

/// Replace the characters `& < > " '` with their HTML entities.
///
/// Every other character is copied unchanged, so escaping is applied exactly
/// once per input character: `<` always becomes `&lt;` and an existing
/// `&lt;` becomes `&amp;lt;`.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_special_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape_html("Hola, ¿qué tal?"), "Hola, ¿qué tal?");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn less_than_becomes_single_entity() {
        for (input, expected) in [
            ("<", "&lt;"),
            ("<<", "&lt;&lt;"),
            ("&lt;", "&amp;lt;"),
            ("a<b", "a&lt;b"),
        ] {
            assert_eq!(escape_html(input), expected);
        }
    }
}
