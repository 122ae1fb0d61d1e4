//! `#TABLE` directive.
//!
//! ```text
//! #TABLE Payment methods
//! | Method | Description |
//! | --- | --- |
//! | Card | Visa or *Mastercard* |
//! ```

use std::fmt::Write;

use crate::block::directive_title;
use crate::inline::format_inline_into;

/// Parsed table: a caption and rows of cells, the first row being the header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub caption: String,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Parse a `#TABLE` block.
    ///
    /// Blank lines and markdown-style separator rows (`| --- | :-: |`) are
    /// skipped.
    #[must_use]
    pub fn parse(block: &str) -> Self {
        let rows = block
            .lines()
            .skip(1)
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(split_row)
            .filter(|cells| !is_separator_row(cells))
            .collect();

        Self {
            caption: directive_title(block),
            rows,
        }
    }

    /// Header cells, if the table has any row.
    #[must_use]
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Body rows (everything after the header).
    #[must_use]
    pub fn body(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or_default()
    }

    /// Render with inline formatting applied to every cell.
    #[must_use]
    pub fn to_html(&self, locale: &str) -> String {
        self.render(locale, &mut Vec::new())
    }

    pub(crate) fn render(&self, locale: &str, warnings: &mut Vec<String>) -> String {
        let mut html = String::with_capacity(256);
        html.push_str("<div class=\"psm-table-wrapper\">\n<table role=\"table\">\n");
        let _ = writeln!(html, "<caption role=\"caption\">{}</caption>", self.caption);

        for (index, row) in self.rows.iter().enumerate() {
            html.push_str("<tr role=\"row\">\n");
            for cell in row {
                let cell = format_inline_into(cell, locale, warnings);
                if index == 0 {
                    let _ = writeln!(html, "<th scope=\"col\" role=\"columnheader\">{cell}</th>");
                } else {
                    let _ = writeln!(html, "<td role=\"cell\">{cell}</td>");
                }
            }
            html.push_str("</tr>\n");
        }

        html.push_str("</table>\n</div>\n");
        html
    }
}

/// Split `| a | b |` into trimmed cells.
fn split_row(line: &str) -> Vec<String> {
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);
    line.split('|').map(|cell| cell.trim().to_owned()).collect()
}

fn is_separator_row(cells: &[String]) -> bool {
    cells.iter().all(|cell| {
        cell.contains('-') && cell.chars().all(|c| c == '-' || c == ':')
    })
}
