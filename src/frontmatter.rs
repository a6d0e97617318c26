//! Pandoc-style metadata block at the top of a post.
//!
//! ```text
//! ---
//! title: Hello
//! tags: a, b
//! ---
//! Body text
//! ```

use std::{collections::HashMap, sync::LazyLock};

use regex::{Regex, RegexBuilder};

static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n(.*)|\z)")
        .dot_matches_new_line(true)
        .build()
        .unwrap()
});

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct FrontMatter<'a> {
    pub fields: HashMap<String, String>,
    pub body: &'a str,
}

/// Splits `content` into its header fields and the trimmed body.
///
/// Content without a header is returned whole (trimmed) with no fields.
pub(crate) fn parse(content: &str) -> FrontMatter<'_> {
    let Some(caps) = HEADER_PATTERN.captures(content) else {
        return FrontMatter {
            fields: HashMap::new(),
            body: content.trim(),
        };
    };

    let mut fields = HashMap::new();
    if let Some(header) = caps.get(1) {
        for line in header.as_str().lines() {
            if let Some((key, value)) = parse_line(line) {
                // later occurrences override earlier ones
                fields.insert(key.to_string(), value.to_string());
            }
        }
    }

    FrontMatter {
        fields,
        body: caps.get(2).map_or("", |m| m.as_str().trim()),
    }
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, unquote(value.trim())))
}

/// Strips one pair of matching surrounding quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn field<'a>(fm: &'a FrontMatter, key: &str) -> Option<&'a str> {
        fm.fields.get(key).map(String::as_str)
    }

    #[test]
    fn test_parse_basic_header() {
        let fm = parse("---\ntitle: Hello\ntags: a, b\n---\nBody text");
        assert_eq!(field(&fm, "title"), Some("Hello"));
        assert_eq!(field(&fm, "tags"), Some("a, b"));
        assert_eq!(fm.body, "Body text");
        assert_eq!(fm.fields.len(), 2);
    }

    #[test]
    fn test_no_header_returns_trimmed_body() {
        let fm = parse("\n  # Just a post\n\nwith text  \n");
        assert!(fm.fields.is_empty());
        assert_eq!(fm.body, "# Just a post\n\nwith text");
    }

    #[test]
    fn test_unterminated_header_is_body() {
        let content = "---\ntitle: Hello\nno closing marker";
        let fm = parse(content);
        assert!(fm.fields.is_empty());
        assert_eq!(fm.body, content);
    }

    #[test]
    fn test_value_keeps_extra_colons() {
        let fm = parse("---\nlink: https://example.com:8080/a\ntime: 12:30:00\n---\n");
        assert_eq!(field(&fm, "link"), Some("https://example.com:8080/a"));
        assert_eq!(field(&fm, "time"), Some("12:30:00"));
        assert_eq!(fm.body, "");
    }

    #[test]
    fn test_surrounding_quotes_stripped() {
        let fm = parse("---\ntitle: \"Quoted: yes\"\nexcerpt: 'it''s'\n---\nx");
        assert_eq!(field(&fm, "title"), Some("Quoted: yes"));
        assert_eq!(field(&fm, "excerpt"), Some("it''s"));
    }

    #[test]
    fn test_inner_quotes_kept() {
        let fm = parse("---\nexcerpt: \"He said 'hi'\"\ntitle: It's 'fine'\nmixed: \"odd'\nlone: \"\n---\nx");
        assert_eq!(field(&fm, "excerpt"), Some("He said 'hi'"));
        assert_eq!(field(&fm, "title"), Some("It's 'fine'"));
        assert_eq!(field(&fm, "mixed"), Some("\"odd'"));
        assert_eq!(field(&fm, "lone"), Some("\""));
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let fm = parse("---\ntitle: first\ntitle: second\n---\nbody");
        assert_eq!(field(&fm, "title"), Some("second"));
    }

    #[test]
    fn test_lines_without_colon_ignored() {
        let fm = parse("---\njust words\n\n: no key\ntitle: ok\n---\nbody");
        assert_eq!(fm.fields.len(), 1);
        assert_eq!(field(&fm, "title"), Some("ok"));
    }

    #[test]
    fn test_crlf_and_empty_header() {
        let fm = parse("---\r\ntitle: Windows\r\n---\r\nBody\r\n");
        assert_eq!(field(&fm, "title"), Some("Windows"));
        assert_eq!(fm.body, "Body");

        let fm = parse("---\n---\nonly body");
        assert!(fm.fields.is_empty());
        assert_eq!(fm.body, "only body");
    }

    #[test]
    fn test_marker_must_be_alone_on_its_line() {
        let fm = parse("---\ntitle: x\n--- not a marker\nmore: y\n---\nbody");
        assert_eq!(field(&fm, "title"), Some("x"));
        assert_eq!(field(&fm, "more"), Some("y"));
        assert_eq!(fm.body, "body");
    }

    #[test]
    fn test_declared_pairs_survive_untouched() {
        let pairs = [
            ("title", "A title with spaces"),
            ("date", "2024-03-01"),
            ("tags", "rust, web"),
            ("excerpt", "Short: summary"),
            ("custom", "kept as is"),
        ];
        let header: String = pairs.iter().map(|(k, v)| format!("{k}: {v}\n")).collect();
        let content = format!("---\n{header}---\nbody");
        let fm = parse(&content);

        let mut parsed: Vec<(&str, &str)> = fm
            .fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        parsed.sort();
        let mut expected = pairs.to_vec();
        expected.sort();
        assert_eq!(parsed, expected);
    }
}
