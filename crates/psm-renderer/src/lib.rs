//! Rendering engine for the psmdoc markup language.
//!
//! A psmdoc document is a sequence of blocks separated by blank lines. A
//! block either starts with a directive (`#H1`, `#TABLE`, `#ACCORDION`, ...)
//! selecting its renderer, or is plain text rendered as a paragraph (or as a
//! list when it starts with `-`).
//!
//! # Architecture
//!
//! - [`split_blocks`] and [`Directive`]: block segmentation and classification
//! - [`Renderer`]: dispatches blocks and joins their fragments
//! - [`format_inline`]: `*bold*`, `_italic_`, `~strike~`, `` `code` `` and
//!   embedded `#IL`/`#EL` links
//! - [`parse_link`]: link directives with per-locale display text
//! - [`IdRegistry`]: unique heading and accordion option ids
//! - [`Table`], [`Accordion`], [`render_media`]: directive renderers
//!
//! Every call starts from empty id registries and keeps no global state, so
//! documents can be rendered concurrently.
//!
//! # Example
//!
//! ```
//! use psm_renderer::render;
//!
//! let html = render("#H2 Intro\n\nToday is a *good* day", None);
//! assert!(html.contains(r#"<h2 id="intro">"#));
//! assert!(html.contains("<p>Today is a <b>good</b> day</p>"));
//! ```

mod accordion;
mod args;
mod block;
mod ids;
mod inline;
mod link;
mod media;
mod renderer;
mod table;

pub use accordion::{Accordion, AccordionOption};
pub use args::{DirectiveArgs, DirectiveLine};
pub use block::{Directive, split_blocks};
pub use ids::{IdRegistry, slugify};
pub use inline::{InlineState, format_inline};
pub use link::{
    Link, LinkError, LinkKind, OUTPUT_EXTENSION, SOURCE_EXTENSION, parse_link, resolve_link,
};
pub use media::{MediaError, MediaKind, render_media};
pub use renderer::{DEFAULT_LOCALE, RenderResult, Renderer};
pub use table::Table;

/// Render a document into an HTML fragment.
///
/// `locale` selects `lg-<code>` link text and defaults to
/// [`DEFAULT_LOCALE`]. Diagnostics are logged through `tracing`; use
/// [`Renderer::render`] to receive them as values.
#[must_use]
pub fn render(document: &str, locale: Option<&str>) -> String {
    Renderer::new(locale.unwrap_or(DEFAULT_LOCALE))
        .render(document)
        .html
}
