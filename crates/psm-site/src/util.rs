//! URL helpers.

/// Compute a relative URL from one page to another file of the site.
///
/// Both arguments are paths relative to the site root without a leading
/// slash. The last segment of `from` is the current page, so the base
/// directory is everything before it.
///
/// ```text
/// relative_url("index.html", "css/psmdoc.css")        -> "css/psmdoc.css"
/// relative_url("intro/about.html", "css/psmdoc.css")  -> "../css/psmdoc.css"
/// relative_url("intro/about.html", "intro/faq.html")  -> "faq.html"
/// ```
pub(crate) fn relative_url(from: &str, to: &str) -> String {
    let from_segs: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to_segs: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    let from_dir = from_segs.split_last().map_or(&[][..], |(_, dir)| dir);

    let common = from_dir
        .iter()
        .zip(&to_segs)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = "../".repeat(from_dir.len() - common);
    let down = to_segs[common..].join("/");
    format!("{ups}{down}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_url_from_root() {
        assert_eq!(relative_url("index.html", "css/psmdoc.css"), "css/psmdoc.css");
        assert_eq!(relative_url("index.html", "about.html"), "about.html");
    }

    #[test]
    fn test_relative_url_from_nested_page() {
        assert_eq!(
            relative_url("intro/about.html", "css/psmdoc.css"),
            "../css/psmdoc.css"
        );
        assert_eq!(
            relative_url("a/b/c.html", "index.html"),
            "../../index.html"
        );
    }

    #[test]
    fn test_relative_url_sibling() {
        assert_eq!(relative_url("intro/about.html", "intro/faq.html"), "faq.html");
        assert_eq!(relative_url("intro/about.html", "intro/about.html"), "about.html");
    }

    #[test]
    fn test_relative_url_across_branches() {
        assert_eq!(
            relative_url("guide/setup.html", "reference/api.html"),
            "../reference/api.html"
        );
    }
}
