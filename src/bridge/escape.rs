//! Outbound text escaping and sanitizing.
//!
//! Player names often contain underscores, which Discord renders as italics.
//! `escape_display_name` backslash-escapes exactly the underscores that would
//! trigger that, leaving runs of two or more alone (those render literally).

use fancy_regex::Regex;

/// Escape standalone underscores in a display name for Discord markdown.
///
/// A single left-to-right scan: each underscore is classified by its
/// immediate neighbors only. Underscores adjacent to another underscore are
/// left untouched; every other underscore gets a `\` prefix. All other
/// characters pass through unchanged.
pub fn escape_display_name(name: &str) -> String {
    if name.is_empty() || !name.contains('_') {
        return name.to_string();
    }

    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            let prev_is_underscore = i > 0 && chars[i - 1] == '_';
            let next_is_underscore = chars.get(i + 1) == Some(&'_');
            if !prev_is_underscore && !next_is_underscore {
                out.push('\\');
            }
        }
        out.push(c);
    }
    out
}

/// Strips game-side markup from chat before it is relayed to Discord.
///
/// Removes legacy `&x` color codes and `<...>` formatting tags, which carry
/// no meaning outside the game client.
#[derive(Debug, Clone)]
pub struct ChatSanitizer {
    color_codes: Regex,
    markup_tags: Regex,
}

impl ChatSanitizer {
    pub fn new() -> Result<Self, fancy_regex::Error> {
        Ok(Self {
            color_codes: Regex::new("&[a-zA-Z0-9]")?,
            markup_tags: Regex::new("<[^>]*>")?,
        })
    }

    /// Strip markup and trim surrounding whitespace.
    pub fn sanitize(&self, message: &str) -> String {
        let stripped = self.color_codes.replace_all(message, "").into_owned();
        let stripped = self.markup_tags.replace_all(&stripped, "");
        stripped.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_underscore_unchanged() {
        for s in ["", "hello", "Notch", "player name", "a-b-c"] {
            assert_eq!(escape_display_name(s), s);
        }
    }

    #[test]
    fn test_standalone_underscores_escaped() {
        assert_eq!(escape_display_name("_hello"), "\\_hello");
        assert_eq!(escape_display_name("hello_"), "hello\\_");
        assert_eq!(escape_display_name("hello_world"), "hello\\_world");
        assert_eq!(escape_display_name("a_b_c"), "a\\_b\\_c");
        assert_eq!(escape_display_name("_a_"), "\\_a\\_");
    }

    #[test]
    fn test_underscore_runs_untouched() {
        assert_eq!(escape_display_name("hello__world"), "hello__world");
        assert_eq!(escape_display_name("hello___world"), "hello___world");
        assert_eq!(escape_display_name("____"), "____");
    }

    #[test]
    fn test_mixed_run_and_standalone() {
        // Only the trailing standalone underscore is escaped.
        assert_eq!(escape_display_name("__a_"), "__a\\_");
        assert_eq!(escape_display_name("_a__b_"), "\\_a__b\\_");
    }

    #[test]
    fn test_sanitize_color_codes() {
        let sanitizer = ChatSanitizer::new().expect("patterns compile");
        assert_eq!(sanitizer.sanitize("&ahello &bworld"), "hello world");
        assert_eq!(sanitizer.sanitize("plain text"), "plain text");
    }

    #[test]
    fn test_sanitize_markup_tags() {
        let sanitizer = ChatSanitizer::new().expect("patterns compile");
        assert_eq!(sanitizer.sanitize("<red>danger</red>"), "danger");
        assert_eq!(sanitizer.sanitize("  <b>hi</b>  "), "hi");
    }

    #[test]
    fn test_sanitize_keeps_unclosed_angle() {
        let sanitizer = ChatSanitizer::new().expect("patterns compile");
        assert_eq!(sanitizer.sanitize("1 < 2"), "1 < 2");
    }
}
