//! Static site builder.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use psm_config::{PageHeader, PageMeta, SiteConfig};
use psm_renderer::{DEFAULT_LOCALE, Renderer};
use rayon::prelude::*;

use crate::assets::write_assets;
use crate::scanner::{Scanner, SourcePage};
use crate::template::{MenuItem, PageData, render_page};

/// Error returned by the site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Summary of a finished build.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Number of pages written.
    pub pages: usize,
    /// Number of asset files written.
    pub assets: usize,
    /// Render warnings, prefixed with the page they come from.
    pub warnings: Vec<String>,
}

/// A page read from disk with its metadata resolved.
struct LoadedPage {
    url_path: String,
    meta: PageMeta,
    body: String,
}

/// Builds a static site from a tree of `.psmdoc` files.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use psm_config::SiteConfig;
/// use psm_site::SiteBuilder;
///
/// let config = SiteConfig::load(Path::new("docs/site.json"))?;
/// let output = config.default_output_dir();
/// let report = SiteBuilder::new(config).build(&output)?;
/// println!("{} pages", report.pages);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct SiteBuilder {
    config: SiteConfig,
    locale: Option<String>,
}

impl SiteBuilder {
    /// Create a builder reading sources from the configuration's directory.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            locale: None,
        }
    }

    /// Render every page with `locale`.
    ///
    /// Without it each page uses its first configured language, falling back
    /// to [`DEFAULT_LOCALE`].
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Build the site into `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if a source file cannot be read or an output file
    /// cannot be written.
    pub fn build(&self, output_dir: &Path) -> Result<BuildReport, BuildError> {
        fs::create_dir_all(output_dir).map_err(|source| BuildError::Write {
            path: output_dir.to_path_buf(),
            source,
        })?;
        let tree = Scanner::new(self.config.source_dir.clone())
            .exclude(output_dir)
            .scan();
        if tree.pages.is_empty() {
            tracing::warn!(path = %self.config.source_dir.display(), "No .psmdoc pages found");
        }

        let pages = tree
            .pages
            .iter()
            .map(|page| self.load_page(page))
            .collect::<Result<Vec<_>, _>>()?;
        let menu: Vec<MenuItem> = pages
            .iter()
            .map(|page| MenuItem {
                label: page.meta.label.clone(),
                url_path: page.url_path.clone(),
            })
            .collect();

        let site_locale = self
            .locale
            .as_deref()
            .or_else(|| self.config.default_locale())
            .unwrap_or(DEFAULT_LOCALE);
        let mut warnings = Vec::new();
        let header = self.render_fragment(tree.header.as_deref(), site_locale, &mut warnings)?;
        let footer = self.render_fragment(tree.footer.as_deref(), site_locale, &mut warnings)?;

        let assets = write_assets(output_dir).map_err(|source| BuildError::Write {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let body_style = self.config.body_style();
        let shared = Shared {
            output_dir,
            header: &header,
            footer: &footer,
            menu: &menu,
            logo: self.config.logo.as_deref(),
            body_style: &body_style,
            generated_at: Utc::now(),
        };
        let page_warnings = pages
            .par_iter()
            .map(|page| self.write_page(page, &shared))
            .collect::<Result<Vec<_>, _>>()?;
        warnings.extend(page_warnings.into_iter().flatten());

        tracing::info!(
            pages = pages.len(),
            assets,
            warnings = warnings.len(),
            output = %output_dir.display(),
            "Site built"
        );

        Ok(BuildReport {
            pages: pages.len(),
            assets,
            warnings,
        })
    }

    fn load_page(&self, page: &SourcePage) -> Result<LoadedPage, BuildError> {
        let document = read_source(&page.path)?;
        let (header, body) = PageHeader::parse(&document);
        let meta = PageMeta::merge(&self.config, &header, &page.stem);
        Ok(LoadedPage {
            url_path: page.url_path.clone(),
            meta,
            body: body.to_owned(),
        })
    }

    /// Render a shared header or footer file.
    fn render_fragment(
        &self,
        path: Option<&Path>,
        locale: &str,
        warnings: &mut Vec<String>,
    ) -> Result<String, BuildError> {
        let Some(path) = path else {
            return Ok(String::new());
        };
        let document = read_source(path)?;
        let (_, body) = PageHeader::parse(&document);
        let result = Renderer::new(locale).render(body);
        let name = path
            .strip_prefix(&self.config.source_dir)
            .unwrap_or(path)
            .display()
            .to_string();
        warnings.extend(result.warnings.into_iter().map(|w| format!("{name}: {w}")));
        Ok(result.html)
    }

    fn write_page(&self, page: &LoadedPage, shared: &Shared<'_>) -> Result<Vec<String>, BuildError> {
        let locale = self
            .locale
            .as_deref()
            .or_else(|| page.meta.languages.first().map(String::as_str))
            .unwrap_or(DEFAULT_LOCALE);
        let result = Renderer::new(locale).render(&page.body);

        let html = render_page(&PageData {
            lang: locale,
            meta: &page.meta,
            url_path: &page.url_path,
            content: &result.html,
            header: shared.header,
            footer: shared.footer,
            menu: shared.menu,
            logo: shared.logo,
            body_style: shared.body_style,
            generated_at: shared.generated_at,
        });

        let target = shared.output_dir.join(&page.url_path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| BuildError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&target, html).map_err(|source| BuildError::Write {
            path: target.clone(),
            source,
        })?;
        tracing::info!(path = %target.display(), "Wrote page");

        for warning in &result.warnings {
            tracing::warn!(page = %page.url_path, warning = %warning, "Render warning");
        }
        Ok(result
            .warnings
            .into_iter()
            .map(|w| format!("{}: {w}", page.url_path))
            .collect())
    }
}

/// Inputs identical for every page of one build.
struct Shared<'a> {
    output_dir: &'a Path,
    header: &'a str,
    footer: &'a str,
    menu: &'a [MenuItem],
    logo: Option<&'a str>,
    body_style: &'a str,
    generated_at: DateTime<Utc>,
}

fn read_source(path: &Path) -> Result<String, BuildError> {
    fs::read_to_string(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })
}
