//! Site configuration and page metadata for psmdoc.
//!
//! A site is described by a JSON file placed at the root of the source
//! tree:
//!
//! ```json
//! {
//!     "title": "Gestión Ciudad",
//!     "description": "Municipal management software",
//!     "author": "Gestión Ciudad",
//!     "font": "https://fonts.googleapis.com/css?family=Roboto:400,700&display=swap",
//!     "style": { "background": "#f5f5f5", "color": "#333" },
//!     "languages": ["es", "en"],
//!     "version": "3.2.0"
//! }
//! ```
//!
//! Each document may override page-level values with a `##` header line,
//! see [`PageHeader`]. [`PageMeta::merge`] combines both for one page.

mod header;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use header::{PageHeader, PageMeta};

/// Directory, relative to the source root, that receives the built site
/// unless another one is given.
const DEFAULT_OUTPUT_DIR: &str = "build/html";

/// Site-wide configuration.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title, prefixed to every page title.
    pub title: String,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub author: Option<String>,
    /// Value of the robots meta tag.
    pub robots: Option<String>,
    /// Stylesheet URL for web fonts.
    pub font: Option<String>,
    /// Logo shown in the mobile menu. Relative paths are rooted at `/`.
    pub logo: Option<String>,
    /// CSS declarations applied to the page body.
    pub style: BTreeMap<String, String>,
    /// Site languages. The first one is the default render locale.
    pub languages: Vec<String>,
    pub version: Option<String>,

    /// Directory holding the configuration file (set after loading).
    #[serde(skip)]
    pub source_dir: PathBuf,
}

/// Error returned when the site configuration cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SiteConfig {
    /// Load the configuration file at `path`.
    ///
    /// The directory containing the file becomes the source root.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_json(&content)?;
        config.source_dir = source_root(path);
        tracing::debug!(path = %path.display(), title = %config.title, "Loaded site configuration");
        Ok(config)
    }

    /// Parse configuration from JSON text.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(content)?;
        config.root_logo();
        Ok(config)
    }

    /// Output directory used when none is given: `<source_dir>/build/html`.
    #[must_use]
    pub fn default_output_dir(&self) -> PathBuf {
        self.source_dir.join(DEFAULT_OUTPUT_DIR)
    }

    /// Default render locale: the first configured language, if any.
    #[must_use]
    pub fn default_locale(&self) -> Option<&str> {
        self.languages.first().map(String::as_str)
    }

    /// Body style declarations as a single CSS declaration list.
    #[must_use]
    pub fn body_style(&self) -> String {
        self.style
            .iter()
            .map(|(property, value)| format!("{property}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn root_logo(&mut self) {
        if let Some(logo) = &mut self.logo
            && !logo.starts_with("http")
            && !logo.starts_with('/')
        {
            logo.insert(0, '/');
        }
    }
}

/// Directory holding the configuration file; `.` for a bare file name.
fn source_root(path: &Path) -> PathBuf {
    path.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
