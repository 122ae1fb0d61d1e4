//! `#ACCORDION` directive.
//!
//! ```text
//! #ACCORDION Payment methods
//! #O Credit card
//!    Visa, Mastercard or American Express.
//! #O PayPal
//!    Pay with your PayPal account.
//!
//!    - Requires an account.
//! #ENDACCORDION
//! ```
//!
//! The accordion spans blocks: everything up to `#ENDACCORDION` is
//! collected, then split into options at each `#O` marker. Each option body
//! is a sub-document rendered by a fresh [`Renderer`].

use std::fmt::Write;

use crate::block::{BlockCursor, directive_body, directive_title};
use crate::ids::IdRegistry;
use crate::renderer::Renderer;

const END_TAG: &str = "#ENDACCORDION";
const OPTION_TAG: &str = "#O";

/// One collapsible section of an accordion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccordionOption {
    /// Unique id within the accordion option registry.
    pub id: String,
    pub title: String,
    /// Raw markup of the option body.
    pub body: String,
}

/// Parsed accordion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Accordion {
    pub title: String,
    pub options: Vec<AccordionOption>,
}

/// Outcome of collecting an accordion's content from the block sequence.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Collected {
    pub content: String,
    /// Whether `#ENDACCORDION` was found before end of input.
    pub closed: bool,
}

impl Accordion {
    /// Parse accordion content (the text between the `#ACCORDION` line and
    /// `#ENDACCORDION`), issuing option ids from `ids`.
    ///
    /// Content is split at lines whose first token is `#O`. The first line
    /// of each segment is the option title; segments without a title are
    /// skipped.
    pub fn parse(title: &str, content: &str, ids: &mut IdRegistry) -> Self {
        let options = split_segments(content)
            .into_iter()
            .filter(|(title, _)| !title.is_empty())
            .map(|(title, body)| AccordionOption {
                id: ids.issue(&title),
                title,
                body,
            })
            .collect();

        Self {
            title: title.to_owned(),
            options,
        }
    }

    /// Render the accordion; option bodies are rendered recursively.
    #[must_use]
    pub fn to_html(&self, locale: &str) -> String {
        self.render(locale, &mut Vec::new())
    }

    pub(crate) fn render(&self, locale: &str, warnings: &mut Vec<String>) -> String {
        let options: Vec<String> = self
            .options
            .iter()
            .map(|option| {
                let body = Renderer::new(locale).render(&option.body);
                warnings.extend(body.warnings);
                render_option(option, &body.html)
            })
            .collect();

        let mut html = String::with_capacity(512);
        html.push_str("<div class=\"psm-accordion-wrapper\">\n<details open>\n");
        let _ = writeln!(html, "<summary>{}</summary>", self.title);
        html.push_str(&options.join("\n"));
        html.push_str("</details>\n</div>\n");
        html
    }
}

fn render_option(option: &AccordionOption, body: &str) -> String {
    let id = &option.id;
    let title_id = format!("psm-accordion-option-title-{id}");
    let content_id = format!("psm-accordion-option-{id}-content");
    format!(
        "<div class=\"psm-accordion-option\" id=\"psm-accordion-{id}\">\n\
         <div class=\"psm-accordion-option-title\" id=\"{title_id}\" \
         onclick=\"document.getElementById('{content_id}').classList.toggle('active');\
         document.getElementById('{title_id}').classList.toggle('active');\">{}</div>\n\
         <div class=\"psm-accordion-option-content\" id=\"{content_id}\">\n\
         {body}</div>\n\
         </div>\n",
        option.title
    )
}

/// Render an accordion starting at `block`, pulling following blocks from
/// `cursor` until `#ENDACCORDION`.
pub(crate) fn render_accordion<'a>(
    block: &'a str,
    cursor: &mut BlockCursor<'a>,
    ids: &mut IdRegistry,
    locale: &str,
    warnings: &mut Vec<String>,
) -> String {
    let collected = collect(block, cursor);
    if !collected.closed {
        tracing::debug!("Accordion without {END_TAG}, consumed to end of input");
    }
    Accordion::parse(&directive_title(block), &collected.content, ids).render(locale, warnings)
}

/// Collect accordion content across blocks.
///
/// Blocks are re-joined with a blank line. Text that follows the terminator
/// inside the same block is handed back to the cursor.
pub(crate) fn collect<'a>(block: &'a str, cursor: &mut BlockCursor<'a>) -> Collected {
    let mut content = String::new();
    let mut text = Some(directive_body(block));

    while let Some(current) = text {
        if let Some(tail) = take_until_end(current, &mut content) {
            if !tail.trim().is_empty() {
                cursor.push_front(tail);
            }
            return Collected {
                content,
                closed: true,
            };
        }
        text = cursor.next_raw();
        if text.is_some() {
            content.push_str("\n\n");
        }
    }

    Collected {
        content,
        closed: false,
    }
}

/// Append `text` to `content` up to the terminator.
///
/// The terminator counts anywhere in a line, in any case. Returns the text
/// after it, or `None` if there is none.
fn take_until_end<'a>(text: &'a str, content: &mut String) -> Option<&'a str> {
    // ASCII uppercasing keeps byte offsets.
    let Some(pos) = text.to_ascii_uppercase().find(END_TAG) else {
        content.push_str(text);
        return None;
    };
    content.push_str(&text[..pos]);
    Some(&text[pos + END_TAG.len()..])
}

/// Split content into `(title, body)` segments at every `#O` marker.
///
/// The text after a marker up to the line break is the title. Text before
/// the first marker forms a segment of its own, titled by its first line.
fn split_segments(content: &str) -> Vec<(String, String)> {
    content
        .split(OPTION_TAG)
        .map(|segment| {
            let (title, body) = segment.split_once('\n').unwrap_or((segment, ""));
            (title.trim().to_owned(), body.trim_end().to_owned())
        })
        .collect()
}
