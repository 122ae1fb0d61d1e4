//! Source discovery by filesystem walking.
//!
//! The scanner only locates files. Reading and rendering happen in the
//! builder.

use std::fs;
use std::path::{Path, PathBuf};

use psm_renderer::{OUTPUT_EXTENSION, SOURCE_EXTENSION};

/// Shared fragment rendered above every page.
const HEADER_FILE: &str = "header.psmdoc";
/// Shared fragment rendered below every page.
const FOOTER_FILE: &str = "footer.psmdoc";

/// A document that becomes one output page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePage {
    /// Path to the `.psmdoc` file.
    pub path: PathBuf,
    /// Output path relative to the site root (e.g. `intro/about.html`).
    pub url_path: String,
    /// File stem, used as the menu label unless the page header sets one.
    pub stem: String,
}

/// Everything found under a source root.
#[derive(Debug, Default)]
pub struct SourceTree {
    /// Pages in deterministic order (sorted by path, files before subdirectories
    /// at the same level).
    pub pages: Vec<SourcePage>,
    pub header: Option<PathBuf>,
    pub footer: Option<PathBuf>,
}

/// Walks a source root collecting `.psmdoc` files.
pub(crate) struct Scanner {
    source_dir: PathBuf,
    exclude: Option<PathBuf>,
}

impl Scanner {
    pub fn new(source_dir: PathBuf) -> Self {
        Self {
            source_dir,
            exclude: None,
        }
    }

    /// Skip `dir` while walking (the output directory when it lives inside
    /// the source root).
    ///
    /// Paths are compared in canonical form, so relative and absolute
    /// spellings of the same directory match. A directory that does not
    /// exist yet cannot be inside the tree and is ignored.
    pub fn exclude(mut self, dir: &Path) -> Self {
        self.exclude = fs::canonicalize(dir).ok();
        self
    }

    /// Scan the source root.
    ///
    /// Returns an empty tree if the directory doesn't exist.
    pub fn scan(&self) -> SourceTree {
        let mut tree = SourceTree::default();
        if self.source_dir.exists() {
            self.scan_directory(&self.source_dir, "", &mut tree);
        }
        tree
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.exclude
            .as_deref()
            .is_some_and(|exclude| fs::canonicalize(path).is_ok_and(|p| p == exclude))
    }

    fn scan_directory(&self, dir_path: &Path, url_prefix: &str, tree: &mut SourceTree) {
        let Ok(entries) = fs::read_dir(dir_path) else {
            tracing::warn!(path = %dir_path.display(), "Cannot read directory");
            return;
        };

        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                let name = e.file_name().to_string_lossy().into_owned();
                (e, is_dir, name)
            })
            .filter(|(_, _, name)| !name.starts_with('.'))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.2.cmp(&b.2)));

        let is_root = url_prefix.is_empty();

        for (entry, is_dir, name) in entries {
            let path = entry.path();

            if is_dir {
                if self.is_excluded(&path) {
                    tracing::debug!(path = %path.display(), "Skipping output directory");
                    continue;
                }
                let child_url = if is_root {
                    name
                } else {
                    format!("{url_prefix}/{name}")
                };
                self.scan_directory(&path, &child_url, tree);
            } else if let Some(stem) = name.strip_suffix(SOURCE_EXTENSION) {
                if is_root && name == HEADER_FILE {
                    tree.header = Some(path);
                } else if is_root && name == FOOTER_FILE {
                    tree.footer = Some(path);
                } else {
                    tracing::debug!(path = %path.display(), "Found page");
                    tree.pages.push(SourcePage {
                        url_path: source_name_to_url(&name, url_prefix),
                        stem: stem.to_owned(),
                        path,
                    });
                }
            }
        }
    }
}

/// Convert a source file name to its output URL path.
///
/// - `index.psmdoc` -> `index.html`
/// - `about.psmdoc`, base `intro` -> `intro/about.html`
pub(crate) fn source_name_to_url(file_name: &str, base: &str) -> String {
    let stem = file_name
        .strip_suffix(SOURCE_EXTENSION)
        .unwrap_or(file_name);
    if base.is_empty() {
        format!("{stem}{OUTPUT_EXTENSION}")
    } else {
        format!("{base}/{stem}{OUTPUT_EXTENSION}")
    }
}
