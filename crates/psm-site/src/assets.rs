//! Default stylesheet and script, compiled into the binary.

use std::fs;
use std::io;
use std::path::Path;

/// Stylesheet path relative to the site root.
pub(crate) const STYLESHEET_PATH: &str = "css/psmdoc.css";
/// Script path relative to the site root.
pub(crate) const SCRIPT_PATH: &str = "js/psmdoc.js";

#[derive(rust_embed::RustEmbed)]
#[folder = "assets/"]
struct Assets;

/// Write every embedded asset under `output_dir`, keeping its relative path.
///
/// Returns the number of files written.
pub(crate) fn write_assets(output_dir: &Path) -> io::Result<usize> {
    let mut written = 0;
    for path in Assets::iter() {
        let Some(file) = Assets::get(&path) else {
            continue;
        };
        let target = output_dir.join(path.as_ref());
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, file.data.as_ref())?;
        tracing::debug!(path = %target.display(), "Wrote asset");
        written += 1;
    }
    Ok(written)
}
