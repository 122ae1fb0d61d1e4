//! Link directive resolution.
//!
//! Handles `#IL` (internal) and `#EL` (external) directives:
//!
//! ```text
//! #IL intro/about.psmdoc "About us" target=_top
//! #EL https://example.com lg-es="Ejemplo" lg-en="Example"
//! ```

use crate::args::DirectiveLine;

/// Extension of markup source documents.
pub const SOURCE_EXTENSION: &str = ".psmdoc";

/// Extension of rendered pages.
pub const OUTPUT_EXTENSION: &str = ".html";

/// Whether a link points inside or outside the site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
    /// `#IL`: page of the same site.
    Internal,
    /// `#EL`: any other URL.
    External,
}

impl LinkKind {
    /// Target used when the directive has no `target=` attribute.
    #[must_use]
    pub fn default_target(self) -> &'static str {
        match self {
            Self::Internal => "_self",
            Self::External => "_blank",
        }
    }
}

/// Resolved link directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub kind: LinkKind,
    /// Link destination with the source extension rewritten.
    pub href: String,
    /// Display text for the active locale.
    pub text: String,
    /// Value of the anchor's `target` attribute.
    pub target: String,
}

impl Link {
    /// Render as an anchor element.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            r#"<a href="{}" target="{}">{}</a>"#,
            self.href, self.target, self.text
        )
    }
}

/// Error returned for a malformed link directive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// The directive has no path token.
    #[error("link directive `{0}` has no path")]
    MissingPath(String),
}

/// Parse a link directive line.
///
/// Display text precedence:
/// 1. with `lg-<code>=` attributes, the one whose code equals `locale`
/// 2. without them, the first quoted string
/// 3. the resolved href
///
/// # Example
///
/// ```
/// use psm_renderer::{LinkKind, parse_link};
///
/// let link = parse_link(r#"#IL about.psmdoc "About Us""#, "en").unwrap();
/// assert_eq!(link.kind, LinkKind::Internal);
/// assert_eq!(link.href, "about.html");
/// assert_eq!(link.text, "About Us");
/// ```
pub fn parse_link(line: &str, locale: &str) -> Result<Link, LinkError> {
    let directive = DirectiveLine::parse(line);
    let Some(source) = directive.source else {
        return Err(LinkError::MissingPath(line.trim().to_owned()));
    };

    let kind = if directive
        .tag
        .get(..3)
        .is_some_and(|t| t.eq_ignore_ascii_case("#EL"))
    {
        LinkKind::External
    } else {
        LinkKind::Internal
    };

    let href = source.replacen(SOURCE_EXTENSION, OUTPUT_EXTENSION, 1);

    let args = &directive.args;
    let text = if args.has_attr_prefix("lg-") {
        args.get(&format!("lg-{locale}")).unwrap_or_default()
    } else {
        args.first_quoted().unwrap_or_default()
    };
    let text = if text.trim().is_empty() {
        href.as_str()
    } else {
        text
    };

    let target = args
        .get("target")
        .map_or(kind.default_target(), strip_quotes);

    Ok(Link {
        kind,
        text: strip_quotes(text.trim()).to_owned(),
        target: target.to_owned(),
        href,
    })
}

/// Resolve a link directive line to anchor markup.
///
/// Malformed directives resolve to an empty string and a logged warning.
#[must_use]
pub fn resolve_link(line: &str, locale: &str) -> String {
    link_html(line, locale, &mut Vec::new())
}

/// Resolve a link directive, recording failures in `warnings`.
pub(crate) fn link_html(line: &str, locale: &str, warnings: &mut Vec<String>) -> String {
    match parse_link(line, locale) {
        Ok(link) => link.to_html(),
        Err(e) => {
            tracing::warn!(error = %e, "Skipping malformed link");
            warnings.push(e.to_string());
            String::new()
        }
    }
}

/// Strip one leading and one trailing quote character.
fn strip_quotes(s: &str) -> &str {
    let s = s.strip_prefix(['"', '\'']).unwrap_or(s);
    s.strip_suffix(['"', '\'']).unwrap_or(s)
}
