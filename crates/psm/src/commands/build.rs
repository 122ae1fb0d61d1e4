//! `psm build` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use psm_config::SiteConfig;
use psm_site::{BuildReport, SiteBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Site configuration JSON. Its directory is the source root.
    site: PathBuf,

    /// Output directory (default: `build/html` next to the site JSON).
    output_dir: Option<PathBuf>,

    /// Locale for `lg-<code>` link text (default: each page's first language).
    #[arg(short, long)]
    locale: Option<String>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = SiteConfig::load(&self.site)?;
        let output_dir = self
            .output_dir
            .unwrap_or_else(|| config.default_output_dir());

        output.info(&format!("Source: {}", config.source_dir.display()));
        output.info(&format!("Output: {}", output_dir.display()));

        let report = build_site(config, self.locale, &output_dir)?;
        for warning in &report.warnings {
            output.warning(warning);
        }

        output.success(&format!(
            "Built {} pages to {}",
            report.pages,
            output_dir.display()
        ));
        Ok(())
    }
}

fn build_site(
    config: SiteConfig,
    locale: Option<String>,
    output_dir: &Path,
) -> Result<BuildReport, CliError> {
    let mut builder = SiteBuilder::new(config);
    if let Some(locale) = locale {
        builder = builder.with_locale(locale);
    }
    Ok(builder.build(output_dir)?)
}
