//! Block segmentation and directive classification.

use std::sync::LazyLock;

use regex::Regex;

use crate::media::MediaKind;

/// Blank line between blocks, CRLF or LF.
static BLOCK_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n\r?\n").unwrap());

/// Split a document into raw, untrimmed blocks.
///
/// Runs of more than one blank line produce empty blocks. Those are kept:
/// they terminate the body of `#CODE` and `#QUOTE`.
#[must_use]
pub fn split_blocks(document: &str) -> Vec<&str> {
    BLOCK_SEPARATOR.split(document).collect()
}

/// Forward-only cursor over the blocks of one document.
///
/// Multi-line directives pull further blocks through the cursor, so the
/// dispatcher never sees what they consumed.
pub(crate) struct BlockCursor<'a> {
    blocks: Vec<&'a str>,
    pos: usize,
    pending: Option<&'a str>,
}

impl<'a> BlockCursor<'a> {
    pub(crate) fn new(document: &'a str) -> Self {
        Self {
            blocks: split_blocks(document),
            pos: 0,
            pending: None,
        }
    }

    /// Next raw block, if any.
    pub(crate) fn next_raw(&mut self) -> Option<&'a str> {
        if let Some(pending) = self.pending.take() {
            return Some(pending);
        }
        let block = self.blocks.get(self.pos).copied()?;
        self.pos += 1;
        Some(block)
    }

    /// Return the unconsumed tail of a block so it is dispatched next.
    pub(crate) fn push_front(&mut self, tail: &'a str) {
        debug_assert!(self.pending.is_none());
        self.pending = Some(tail);
    }

    /// Consume blocks up to and including the next empty raw block.
    ///
    /// Stops at end of input when no empty block follows.
    pub(crate) fn take_until_empty(&mut self) -> Vec<&'a str> {
        let mut taken = Vec::new();
        while let Some(block) = self.next_raw() {
            if block.is_empty() {
                break;
            }
            taken.push(block);
        }
        taken
    }
}

/// Leading directive of a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `#H1`..`#H6`, optionally followed by an explicit id (`#H2setup`).
    Heading { level: u8, id: Option<&'a str> },
    /// `#HR`
    Rule,
    /// `#CODE`
    Code,
    /// `#QUOTE`
    Quote,
    /// `#IL`
    InternalLink,
    /// `#EL`
    ExternalLink,
    /// `#TABLE`
    Table,
    /// `#IMG`, `#VIDEO`, `#AUDIO`, `#PDF`, `#SVG`, `#MAP`
    Media(MediaKind),
    /// `#ACCORDION`
    Accordion,
    /// `#ENDACCORDION` outside of an accordion.
    EndAccordion,
    /// Any other `#` token.
    Unknown(&'a str),
}

impl<'a> Directive<'a> {
    /// Classify a trimmed block by its leading token.
    ///
    /// Returns `None` when the block does not start with `#`. Tags are
    /// matched case-insensitively.
    #[must_use]
    pub fn parse(block: &'a str) -> Option<Self> {
        if !block.starts_with('#') {
            return None;
        }

        let tag = block.split_whitespace().next().unwrap_or(block);
        let directive = match tag.to_ascii_uppercase().as_str() {
            "#HR" => Self::Rule,
            "#CODE" => Self::Code,
            "#QUOTE" => Self::Quote,
            "#IL" => Self::InternalLink,
            "#EL" => Self::ExternalLink,
            "#TABLE" => Self::Table,
            "#IMG" => Self::Media(MediaKind::Image),
            "#VIDEO" => Self::Media(MediaKind::Video),
            "#AUDIO" => Self::Media(MediaKind::Audio),
            "#PDF" => Self::Media(MediaKind::Pdf),
            "#SVG" => Self::Media(MediaKind::Svg),
            "#MAP" => Self::Media(MediaKind::Map),
            "#ACCORDION" => Self::Accordion,
            "#ENDACCORDION" => Self::EndAccordion,
            _ => parse_heading(tag).unwrap_or(Self::Unknown(tag)),
        };
        Some(directive)
    }
}

/// Parse `#H<level>[id]`.
fn parse_heading(tag: &str) -> Option<Directive<'_>> {
    let rest = tag.get(1..)?.strip_prefix(['H', 'h'])?;
    let level = rest.chars().next()?.to_digit(10)?;
    if !(1..=6).contains(&level) {
        return None;
    }
    let id = &rest[1..];
    Some(Directive::Heading {
        level: u8::try_from(level).ok()?,
        id: (!id.is_empty()).then_some(id),
    })
}

/// Text of the first line after the directive tag, whitespace collapsed.
pub(crate) fn directive_title(block: &str) -> String {
    let first_line = block.lines().next().unwrap_or_default();
    first_line
        .split_whitespace()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lines of a block after its directive line.
pub(crate) fn directive_body(block: &str) -> &str {
    block.split_once('\n').map_or("", |(_, body)| body)
}
