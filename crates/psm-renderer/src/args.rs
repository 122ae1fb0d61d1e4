//! Directive line parsing.
//!
//! Splits a single-line directive such as
//! `#IMG logo.png "Company logo" width=120 fit=cover` into its tag, its
//! source token and the remaining arguments.

use std::collections::HashMap;

/// Parsed arguments following a directive's source token.
///
/// Arguments come in three shapes:
/// - quoted strings: `"About Us"` or `'About Us'`
/// - attributes: `key=value`, `key="quoted value"`, `key='quoted value'`
/// - bare words: anything else, split on whitespace
///
/// # Example
///
/// ```
/// use psm_renderer::DirectiveArgs;
///
/// let args = DirectiveArgs::parse(r#""Home page" lg-es="Página de inicio" target=_top"#);
/// assert_eq!(args.first_quoted(), Some("Home page"));
/// assert_eq!(args.get("lg-es"), Some("Página de inicio"));
/// assert_eq!(args.get("target"), Some("_top"));
/// ```
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Quoted strings, in source order, without their quotes.
    pub quoted: Vec<String>,
    /// Bare words, in source order.
    pub words: Vec<String>,
    /// Key-value attributes. A repeated key keeps its last value.
    pub attrs: HashMap<String, String>,
}

impl DirectiveArgs {
    /// Parse an argument string.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut args = Self::default();
        let mut remaining = input.trim();

        while !remaining.is_empty() {
            if let Some((value, rest)) = parse_quoted(remaining) {
                args.quoted.push(value.to_owned());
                remaining = rest;
            } else if let Some((key, value, rest)) = parse_key_value(remaining) {
                args.attrs.insert(key.to_owned(), value.to_owned());
                remaining = rest;
            } else {
                let (word, rest) = split_token(remaining);
                args.words.push(word.to_owned());
                remaining = rest;
            }
            remaining = remaining.trim_start();
        }

        args
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Get an attribute value, or the empty string when absent.
    #[must_use]
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    /// First quoted string, if any.
    #[must_use]
    pub fn first_quoted(&self) -> Option<&str> {
        self.quoted.first().map(String::as_str)
    }

    /// Whether any attribute key starts with `prefix`.
    #[must_use]
    pub fn has_attr_prefix(&self, prefix: &str) -> bool {
        self.attrs.keys().any(|key| key.starts_with(prefix))
    }
}

/// A single-line directive split into tag, source and arguments.
#[derive(Debug, PartialEq, Eq)]
pub struct DirectiveLine<'a> {
    /// Directive token as written (e.g. `#img`).
    pub tag: &'a str,
    /// First token after the tag (path, URL or `youtube=<id>`).
    pub source: Option<&'a str>,
    /// Everything after the source token.
    pub args: DirectiveArgs,
}

impl<'a> DirectiveLine<'a> {
    /// Parse the first line of `text` as a directive line.
    #[must_use]
    pub fn parse(text: &'a str) -> Self {
        let line = text.lines().next().unwrap_or_default().trim();
        let (tag, rest) = split_token(line);
        let (source, rest) = split_token(rest.trim_start());

        Self {
            tag,
            source: (!source.is_empty()).then_some(source),
            args: DirectiveArgs::parse(rest),
        }
    }
}

/// Split off the leading whitespace-delimited token.
pub(crate) fn split_token(s: &str) -> (&str, &str) {
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    (&s[..end], &s[end..])
}

/// Parse a quoted string at the start of `s`.
///
/// Returns `None` when `s` does not start with a quote or the quote is
/// never closed.
fn parse_quoted(s: &str) -> Option<(&str, &str)> {
    let quote = s.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let body = &s[1..];
    let end = body.find(quote)?;
    Some((&body[..end], &body[end + 1..]))
}

/// Parse a key-value pair from the start of `s`.
///
/// Supports: `key="value"`, `key='value'`, `key=value`. The key must sit in
/// the leading token.
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let (token, _) = split_token(s);
    let eq_pos = token.find('=')?;
    let key = &s[..eq_pos];

    if key.is_empty() || key.starts_with(['"', '\'']) {
        return None;
    }

    let after_eq = &s[eq_pos + 1..];

    if let Some(stripped) = after_eq.strip_prefix('"') {
        let end_quote = stripped.find('"')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else if let Some(stripped) = after_eq.strip_prefix('\'') {
        let end_quote = stripped.find('\'')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else {
        let (value, rest) = split_token(after_eq);
        Some((key, value, rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_args() {
        let args = DirectiveArgs::parse("");
        assert!(args.quoted.is_empty());
        assert!(args.words.is_empty());
        assert!(args.attrs.is_empty());
    }

    #[test]
    fn test_double_and_single_quotes() {
        let args = DirectiveArgs::parse(r#""About Us" 'Team page'"#);
        assert_eq!(args.quoted, vec!["About Us", "Team page"]);
    }

    #[test]
    fn test_unquoted_value() {
        let args = DirectiveArgs::parse("width=560 height=315");
        assert_eq!(args.get("width"), Some("560"));
        assert_eq!(args.get("height"), Some("315"));
    }

    #[test]
    fn test_quoted_value_with_spaces() {
        let args = DirectiveArgs::parse(r#"lg-es="Gestión Ciudad" lg-en='City Management'"#);
        assert_eq!(args.get("lg-es"), Some("Gestión Ciudad"));
        assert_eq!(args.get("lg-en"), Some("City Management"));
        assert!(args.has_attr_prefix("lg-"));
    }

    #[test]
    fn test_empty_quoted_value() {
        let args = DirectiveArgs::parse(r#"alt="""#);
        assert_eq!(args.get("alt"), Some(""));
    }

    #[test]
    fn test_bare_words() {
        let args = DirectiveArgs::parse("cover  wide");
        assert_eq!(args.words, vec!["cover", "wide"]);
    }

    #[test]
    fn test_unterminated_quote_is_a_word() {
        let args = DirectiveArgs::parse(r#""Never closed"#);
        assert!(args.quoted.is_empty());
        assert_eq!(args.words, vec![r#""Never"#, "closed"]);
    }

    #[test]
    fn test_get_or_empty() {
        let args = DirectiveArgs::parse("fit=cover");
        assert_eq!(args.get_or_empty("fit"), "cover");
        assert_eq!(args.get_or_empty("width"), "");
    }

    #[test]
    fn test_directive_line() {
        let line = DirectiveLine::parse(r#"#IMG logo.png "Logo" width=100"#);
        assert_eq!(line.tag, "#IMG");
        assert_eq!(line.source, Some("logo.png"));
        assert_eq!(line.args.first_quoted(), Some("Logo"));
        assert_eq!(line.args.get("width"), Some("100"));
    }

    #[test]
    fn test_directive_line_without_source() {
        let line = DirectiveLine::parse("#EL");
        assert_eq!(line.tag, "#EL");
        assert_eq!(line.source, None);
    }

    #[test]
    fn test_directive_line_reads_first_line_only() {
        let line = DirectiveLine::parse("#PDF doc.pdf\nwidth=10");
        assert_eq!(line.source, Some("doc.pdf"));
        assert_eq!(line.args.get("width"), None);
    }
}
