//! Per-page `##` metadata headers.
//!
//! A document may start with a single header line:
//!
//! ```text
//! ## title="Payments" label="Pay" description="How to pay" languages="es,en"
//! ```
//!
//! Values override the site configuration for that page only.

use psm_renderer::DirectiveArgs;

use crate::SiteConfig;

const HEADER_PREFIX: &str = "##";

/// Metadata declared in a document's `##` header line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageHeader {
    pub title: Option<String>,
    /// Menu label (defaults to the file stem).
    pub label: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub author: Option<String>,
    pub robots: Option<String>,
    pub font: Option<String>,
    pub languages: Option<Vec<String>>,
    pub version: Option<String>,
}

impl PageHeader {
    /// Split a document into its header and body.
    ///
    /// Documents without a `##` first line yield an empty header and the
    /// whole document as body.
    #[must_use]
    pub fn parse(document: &str) -> (Self, &str) {
        let Some(rest) = document.strip_prefix(HEADER_PREFIX) else {
            return (Self::default(), document);
        };
        let (line, body) = rest.split_once('\n').unwrap_or((rest, ""));

        let args = DirectiveArgs::parse(line);
        let mut header = Self::default();
        for (key, value) in args.attrs {
            match key.as_str() {
                "title" => header.title = Some(value),
                "label" => header.label = Some(value),
                "description" => header.description = Some(value),
                "keywords" => header.keywords = Some(value),
                "author" => header.author = Some(value),
                "robots" => header.robots = Some(value),
                "font" => header.font = Some(value),
                "languages" => {
                    header.languages = Some(
                        value
                            .split(',')
                            .map(str::trim)
                            .filter(|lang| !lang.is_empty())
                            .map(str::to_owned)
                            .collect(),
                    );
                }
                "version" => header.version = Some(value),
                _ => tracing::debug!(key = %key, "Ignoring unknown page header key"),
            }
        }

        (header, body)
    }

    /// Whether the header sets nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Effective metadata of one page: site configuration overridden by the
/// page header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub site_title: String,
    pub title: Option<String>,
    pub label: String,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub author: Option<String>,
    pub robots: Option<String>,
    pub font: Option<String>,
    pub languages: Vec<String>,
    pub version: Option<String>,
}

impl PageMeta {
    /// Merge site configuration with a page header.
    ///
    /// Page values win. `default_label` is used when the header has no
    /// `label`.
    #[must_use]
    pub fn merge(site: &SiteConfig, header: &PageHeader, default_label: &str) -> Self {
        let pick = |page: &Option<String>, site: &Option<String>| page.clone().or_else(|| site.clone());

        Self {
            site_title: site.title.clone(),
            title: header.title.clone(),
            label: header
                .label
                .clone()
                .unwrap_or_else(|| default_label.to_owned()),
            description: pick(&header.description, &site.description),
            keywords: pick(&header.keywords, &site.keywords),
            author: pick(&header.author, &site.author),
            robots: pick(&header.robots, &site.robots),
            font: pick(&header.font, &site.font),
            languages: header
                .languages
                .clone()
                .unwrap_or_else(|| site.languages.clone()),
            version: pick(&header.version, &site.version),
        }
    }

    /// Text of the `<title>` element: `"<site> | <page>"`.
    #[must_use]
    pub fn page_title(&self) -> String {
        match &self.title {
            Some(title) if !self.site_title.is_empty() => format!("{} | {title}", self.site_title),
            Some(title) => title.clone(),
            None => self.site_title.clone(),
        }
    }
}
