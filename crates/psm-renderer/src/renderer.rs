//! Block dispatcher.

use std::fmt::Write;

use crate::accordion::render_accordion;
use crate::block::{BlockCursor, Directive, directive_body};
use crate::ids::IdRegistry;
use crate::inline::format_inline_into;
use crate::link::link_html;
use crate::media::render_media;
use crate::table::Table;

/// Locale used when the caller does not pass one.
pub const DEFAULT_LOCALE: &str = "en";

/// Separator inserted between consecutive block fragments.
const FRAGMENT_SEPARATOR: &str = "<br>\n";

/// Octicon link glyph appended to heading anchors.
const HEADING_LINK_ICON: &str = r#"<svg aria-hidden="true" focusable="false" class="octicon-link" viewBox="0 0 16 16" width="16" height="16" fill="currentColor"><path d="m7.775 3.275 1.25-1.25a3.5 3.5 0 1 1 4.95 4.95l-2.5 2.5a3.5 3.5 0 0 1-4.95 0 .751.751 0 0 1 .018-1.042.751.751 0 0 1 1.042-.018 1.998 1.998 0 0 0 2.83 0l2.5-2.5a2.002 2.002 0 0 0-2.83-2.83l-1.25 1.25a.751.751 0 0 1-1.042-.018.751.751 0 0 1-.018-1.042Zm-4.69 9.64a1.998 1.998 0 0 0 2.83 0l1.25-1.25a.751.751 0 0 1 1.042.018.751.751 0 0 1 .018 1.042l-1.25 1.25a3.5 3.5 0 1 1-4.95-4.95l2.5-2.5a3.5 3.5 0 0 1 4.95 0 .751.751 0 0 1-.018 1.042.751.751 0 0 1-1.042.018 1.998 1.998 0 0 0-2.83 0l-2.5 2.5a1.998 1.998 0 0 0 0 2.83Z"></path></svg>"#;

/// Result of rendering a document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Diagnostics for blocks that were skipped or rendered empty,
    /// including those of nested accordion bodies.
    pub warnings: Vec<String>,
}

/// One-shot document renderer.
///
/// Holds the state of a single render call: the locale, the heading and
/// accordion option id registries, and collected warnings. [`render`]
/// consumes the renderer, so no state survives between documents.
///
/// [`render`]: Self::render
///
/// # Example
///
/// ```
/// use psm_renderer::Renderer;
///
/// let result = Renderer::new("en").render("#H1 Welcome\n\nHello *there*");
/// assert!(result.html.contains(r#"<h1 id="welcome">"#));
/// assert!(result.html.contains("<p>Hello <b>there</b></p>"));
/// assert!(result.warnings.is_empty());
/// ```
#[derive(Debug)]
pub struct Renderer {
    locale: String,
    heading_ids: IdRegistry,
    option_ids: IdRegistry,
    warnings: Vec<String>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

impl Renderer {
    /// Create a renderer for `locale` with empty id registries.
    #[must_use]
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            heading_ids: IdRegistry::new(),
            option_ids: IdRegistry::new(),
            warnings: Vec::new(),
        }
    }

    /// Locale used to pick `lg-<code>` link text.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Render a document into an HTML fragment.
    #[must_use]
    pub fn render(mut self, document: &str) -> RenderResult {
        let mut cursor = BlockCursor::new(document);
        let mut fragments = Vec::new();

        while let Some(raw) = cursor.next_raw() {
            let block = raw.trim();
            if block.is_empty() {
                continue;
            }
            let fragment = self.render_block(block, &mut cursor);
            if !fragment.is_empty() {
                fragments.push(fragment);
            }
        }

        RenderResult {
            html: fragments.join(FRAGMENT_SEPARATOR),
            warnings: self.warnings,
        }
    }

    fn render_block<'a>(&mut self, block: &'a str, cursor: &mut BlockCursor<'a>) -> String {
        let Some(directive) = Directive::parse(block) else {
            return if block.starts_with('-') {
                self.list(block)
            } else {
                self.paragraph(block)
            };
        };

        match directive {
            Directive::Heading { level, id } => self.heading(block, level, id),
            Directive::Rule => "<hr>\n".to_owned(),
            Directive::Code => code(block, cursor),
            Directive::Quote => self.quote(block, cursor),
            Directive::InternalLink | Directive::ExternalLink => {
                let first_line = block.lines().next().unwrap_or_default();
                let html = link_html(first_line, &self.locale, &mut self.warnings);
                if html.is_empty() { html } else { html + "\n" }
            }
            Directive::Table => Table::parse(block).render(&self.locale, &mut self.warnings),
            Directive::Media(kind) => match render_media(kind, block) {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping media block");
                    self.warnings.push(e.to_string());
                    String::new()
                }
            },
            Directive::Accordion => render_accordion(
                block,
                cursor,
                &mut self.option_ids,
                &self.locale,
                &mut self.warnings,
            ),
            Directive::EndAccordion => {
                tracing::debug!("Ignoring #ENDACCORDION outside of an accordion");
                String::new()
            }
            Directive::Unknown(tag) => {
                tracing::debug!(tag, "Ignoring unknown directive");
                String::new()
            }
        }
    }

    fn inline(&mut self, text: &str) -> String {
        format_inline_into(text, &self.locale, &mut self.warnings)
    }

    fn heading(&mut self, block: &str, level: u8, explicit_id: Option<&str>) -> String {
        let title = block
            .split_once(char::is_whitespace)
            .map_or("", |(_, title)| title.trim_start());
        let id = self.heading_ids.issue(explicit_id.unwrap_or(title));
        let content = self.inline(title);
        format!(
            "<h{level} id=\"{id}\">\n<a href=\"#{id}\">{content}{HEADING_LINK_ICON}</a>\n</h{level}>\n"
        )
    }

    fn paragraph(&mut self, block: &str) -> String {
        format!("<p>{}</p>\n", self.inline(block))
    }

    fn list(&mut self, block: &str) -> String {
        let mut html = String::from("<ul>\n");
        for item in block.split('-').map(str::trim).filter(|s| !s.is_empty()) {
            let item = self.inline(item);
            let _ = writeln!(html, "<li>{item}</li>");
        }
        html.push_str("</ul>\n");
        html
    }

    fn quote<'a>(&mut self, block: &'a str, cursor: &mut BlockCursor<'a>) -> String {
        let text = multi_block_body(block, cursor)
            .iter()
            .map(|part| part.trim())
            .collect::<Vec<_>>()
            .join("\n");
        format!("<blockquote>\n{}\n</blockquote>\n", self.inline(&text))
    }
}

/// `#CODE` body, emitted verbatim.
fn code<'a>(block: &'a str, cursor: &mut BlockCursor<'a>) -> String {
    let body = multi_block_body(block, cursor).join("\n\n");
    format!("<pre><code>\n{body}\n</code></pre>\n")
}

/// Body of `#CODE`/`#QUOTE`: the rest of the directive block, then following
/// blocks up to the next empty block.
fn multi_block_body<'a>(block: &'a str, cursor: &mut BlockCursor<'a>) -> Vec<&'a str> {
    let first = directive_body(block);
    let mut parts: Vec<&str> = Vec::new();
    if !first.trim().is_empty() {
        parts.push(first);
    }
    parts.extend(cursor.take_until_empty());
    parts
}
