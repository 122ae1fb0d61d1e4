//! Static site generation from psmdoc sources.
//!
//! Walks a source directory for `.psmdoc` files, renders each one with
//! [`psm_renderer`], wraps it in the site layout and writes the result next
//! to the default stylesheet and script.

mod assets;
mod builder;
mod scanner;
mod template;
mod util;

pub use builder::{BuildError, BuildReport, SiteBuilder};
pub use scanner::{SourcePage, SourceTree};
pub use template::{MenuItem, PageData, render_page};
