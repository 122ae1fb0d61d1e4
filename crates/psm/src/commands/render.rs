//! `psm render` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use console::Term;
use psm_config::PageHeader;
use psm_renderer::{DEFAULT_LOCALE, RenderResult, Renderer};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Document to render.
    file: PathBuf,

    /// Locale for `lg-<code>` link text (default: the page's first language, then `en`).
    #[arg(short, long)]
    locale: Option<String>,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let result = render_file(&self.file, self.locale.as_deref())?;

        for warning in &result.warnings {
            output.warning(warning);
        }
        Term::stdout().write_str(&result.html)?;
        Ok(())
    }
}

/// Render a document file, dropping its `##` header line.
fn render_file(path: &Path, locale: Option<&str>) -> Result<RenderResult, CliError> {
    if !path.is_file() {
        return Err(CliError::Validation(format!(
            "File not found: {}",
            path.display()
        )));
    }
    let document = std::fs::read_to_string(path)?;
    let (header, body) = PageHeader::parse(&document);
    let locale = locale
        .or_else(|| {
            header
                .languages
                .as_ref()
                .and_then(|languages| languages.first())
                .map(String::as_str)
        })
        .unwrap_or(DEFAULT_LOCALE);
    tracing::debug!(path = %path.display(), locale, "Rendering document");
    Ok(Renderer::new(locale).render(body))
}
