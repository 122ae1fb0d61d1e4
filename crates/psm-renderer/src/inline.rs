//! Inline formatting: emphasis toggles and embedded links.
//!
//! Each marker character toggles its own span independently:
//!
//! | Marker | Element    |
//! |--------|------------|
//! | `*`    | `<b>`      |
//! | `_`    | `<i>`      |
//! | `~`    | `<strike>` |
//! | `` ` ``| `<code>`   |
//!
//! There is no nesting stack. Unbalanced or interleaved markers produce
//! unbalanced or interleaved tags, and nothing is closed automatically.

use crate::link::link_html;

/// Open/closed state of the four inline toggles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InlineState {
    pub bold: bool,
    pub italic: bool,
    pub strike: bool,
    pub code: bool,
}

impl InlineState {
    /// Flip the toggle for `marker` and return the tag to emit.
    ///
    /// Returns `None` for characters that are not markers.
    pub fn toggle(&mut self, marker: char) -> Option<&'static str> {
        let (open, start, end) = match marker {
            '*' => (&mut self.bold, "<b>", "</b>"),
            '_' => (&mut self.italic, "<i>", "</i>"),
            '~' => (&mut self.strike, "<strike>", "</strike>"),
            '`' => (&mut self.code, "<code>", "</code>"),
            _ => return None,
        };
        *open = !*open;
        Some(if *open { start } else { end })
    }

    /// Whether any span is left open.
    #[must_use]
    pub fn any_open(self) -> bool {
        self.bold || self.italic || self.strike || self.code
    }
}

/// Format one block's text as inline HTML.
///
/// `#IL`/`#EL` directives found in the text run to the end of their line and
/// are replaced by the resolved anchor padded with `&nbsp;`. All other
/// characters, including raw HTML, are copied verbatim.
///
/// # Example
///
/// ```
/// use psm_renderer::format_inline;
///
/// assert_eq!(
///     format_inline("Today is a *good* day", "en"),
///     "Today is a <b>good</b> day"
/// );
/// ```
#[must_use]
pub fn format_inline(text: &str, locale: &str) -> String {
    format_inline_into(text, locale, &mut Vec::new())
}

/// Format inline text, recording link failures in `warnings`.
pub(crate) fn format_inline_into(text: &str, locale: &str, warnings: &mut Vec<String>) -> String {
    let mut html = String::with_capacity(text.len() + 16);
    let mut state = InlineState::default();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if c == '#' && starts_link(&rest[1..]) {
            let end = rest.find('\n').unwrap_or(rest.len());
            html.push_str("&nbsp;");
            html.push_str(&link_html(&rest[..end], locale, warnings));
            html.push_str("&nbsp;");
            // The line break ending the link is consumed with it.
            rest = rest.get(end + 1..).unwrap_or_default();
            continue;
        }

        match state.toggle(c) {
            Some(tag) => html.push_str(tag),
            None => html.push(c),
        }
        rest = &rest[c.len_utf8()..];
    }

    if state.any_open() {
        tracing::debug!(?state, "Inline span left open");
    }

    html
}

fn starts_link(s: &str) -> bool {
    s.starts_with("IL") || s.starts_with("EL")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(format_inline("Hello, world", "en"), "Hello, world");
    }

    #[test]
    fn test_bold() {
        assert_eq!(
            format_inline("Today is a *good* day", "en"),
            "Today is a <b>good</b> day"
        );
    }

    #[test]
    fn test_all_markers() {
        assert_eq!(
            format_inline("a *walk* _swim_ ~run~ `ride.sh`", "en"),
            "a <b>walk</b> <i>swim</i> <strike>run</strike> <code>ride.sh</code>"
        );
    }

    #[test]
    fn test_combined_markers() {
        assert_eq!(
            format_inline("*~good~*", "en"),
            "<b><strike>good</strike></b>"
        );
    }

    #[test]
    fn test_interleaved_markers_are_not_renested() {
        assert_eq!(
            format_inline("*~`good~`*", "en"),
            "<b><strike><code>good</strike></code></b>"
        );
    }

    #[test]
    fn test_unmatched_marker_stays_open() {
        assert_eq!(
            format_inline("*bold without close", "en"),
            "<b>bold without close"
        );
    }

    #[test]
    fn test_raw_html_is_not_escaped() {
        assert_eq!(
            format_inline("<span class=\"x\">a & b</span>", "en"),
            "<span class=\"x\">a & b</span>"
        );
    }

    #[test]
    fn test_hash_without_link_passes_through() {
        assert_eq!(format_inline("issue #42", "en"), "issue #42");
    }

    #[test]
    fn test_embedded_link() {
        assert_eq!(
            format_inline("Visit #IL about.psmdoc \"About\"\nthen leave", "en"),
            "Visit &nbsp;<a href=\"about.html\" target=\"_self\">About</a>&nbsp;then leave"
        );
    }

    #[test]
    fn test_embedded_link_at_end_of_text() {
        assert_eq!(
            format_inline("See #EL https://x.org \"X\"", "en"),
            "See &nbsp;<a href=\"https://x.org\" target=\"_blank\">X</a>&nbsp;"
        );
    }

    #[test]
    fn test_embedded_link_uses_locale() {
        let text = "#EL https://x.org lg-es=\"Equis\" lg-en=\"Ex\"";
        assert!(format_inline(text, "es").contains(">Equis</a>"));
    }

    #[test]
    fn test_embedded_link_markers_are_not_toggled() {
        assert_eq!(
            format_inline("#IL my_page.psmdoc", "en"),
            "&nbsp;<a href=\"my_page.html\" target=\"_self\">my_page.html</a>&nbsp;"
        );
    }

    #[test]
    fn test_toggle_state() {
        let mut state = InlineState::default();
        assert_eq!(state.toggle('*'), Some("<b>"));
        assert!(state.bold);
        assert_eq!(state.toggle('_'), Some("<i>"));
        assert_eq!(state.toggle('*'), Some("</b>"));
        assert!(!state.bold);
        assert!(state.any_open());
        assert_eq!(state.toggle('a'), None);
    }
}
