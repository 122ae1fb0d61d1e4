//! HTML page template for static site generation.
//!
//! Wraps a rendered document with the shared layout: head metadata, mobile
//! menu, header fragment, sidebar menu, footer fragment and copyright line.

use std::fmt::Write;

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use psm_config::PageMeta;

use crate::assets::{SCRIPT_PATH, STYLESHEET_PATH};
use crate::util::relative_url;

/// Entry of the site menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    /// Page path relative to the site root (e.g. `intro/about.html`).
    pub url_path: String,
}

/// All data needed to render a page.
pub struct PageData<'a> {
    /// Value of the `lang` attribute.
    pub lang: &'a str,
    pub meta: &'a PageMeta,
    /// Path of this page relative to the site root.
    pub url_path: &'a str,
    /// Rendered document fragment.
    pub content: &'a str,
    /// Rendered shared header fragment.
    pub header: &'a str,
    /// Rendered shared footer fragment.
    pub footer: &'a str,
    pub menu: &'a [MenuItem],
    pub logo: Option<&'a str>,
    /// CSS declarations for the `<body>` element.
    pub body_style: &'a str,
    pub generated_at: DateTime<Utc>,
}

/// Render a complete HTML page.
pub fn render_page(page: &PageData<'_>) -> String {
    let mut html = String::with_capacity(8192 + page.content.len());
    let meta = page.meta;

    html.push_str(
        "<!-- This file was generated by psmdoc, a tool to create html files from .psmdoc files -->\n",
    );
    html.push_str("<!-- Do not edit this file, it will be overwritten -->\n");
    let _ = writeln!(
        html,
        "<!-- Generated at {} -->",
        page.generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    );

    // Head
    let _ = writeln!(html, "<!DOCTYPE html>\n<html lang=\"{}\">", escape(page.lang));
    html.push_str("<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str("<meta http-equiv=\"X-UA-Compatible\" content=\"IE=edge\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape(&meta.page_title()));
    for (name, value) in [
        ("description", &meta.description),
        ("keywords", &meta.keywords),
        ("author", &meta.author),
        ("robots", &meta.robots),
        ("version", &meta.version),
    ] {
        if let Some(value) = value {
            let _ = writeln!(html, "<meta name=\"{name}\" content=\"{}\">", escape(value));
        }
    }
    if let Some(font) = &meta.font {
        let _ = writeln!(html, "<link rel=\"stylesheet\" href=\"{}\">", escape(font));
    }
    let _ = writeln!(
        html,
        "<link rel=\"stylesheet\" href=\"{}\">",
        relative_url(page.url_path, STYLESHEET_PATH)
    );
    html.push_str("</head>\n");

    // Body
    if page.body_style.is_empty() {
        html.push_str("<body>\n");
    } else {
        let _ = writeln!(html, "<body style=\"{}\">", escape(page.body_style));
    }
    html.push_str("<main>\n");
    render_mobile_menu(&mut html, page);

    html.push_str("<header>\n<div class=\"psm-row\">\n");
    html.push_str(page.header);
    html.push_str("</div>\n</header>\n");

    html.push_str("<div class=\"psm-row\">\n<div class=\"psm-content\">\n");
    html.push_str(page.content);
    html.push_str("</div>\n<div class=\"psm-sidebar\">\n<h2>Menu</h2>\n");
    render_menu(&mut html, page);
    html.push_str("</div>\n</div>\n");

    html.push_str("<div class=\"psm-row\">\n");
    html.push_str(page.footer);
    html.push_str("</div>\n</main>\n");

    let _ = writeln!(
        html,
        "<footer>\n<p>&copy; {} {}</p>\n</footer>",
        escape(&meta.site_title),
        page.generated_at.year()
    );
    let _ = writeln!(
        html,
        "<script src=\"{}\"></script>",
        relative_url(page.url_path, SCRIPT_PATH)
    );
    html.push_str("</body>\n</html>\n");
    html
}

fn render_mobile_menu(html: &mut String, page: &PageData<'_>) {
    html.push_str("<div class=\"psm-mobile-menu\" id=\"psm-mobile-menu\">\n");
    let _ = write!(
        html,
        "<div class=\"psm-mobile-menu-button\">&#9776; {}",
        escape(&page.meta.site_title)
    );
    if let Some(logo) = page.logo {
        let _ = write!(
            html,
            " <img src=\"{}\" alt=\"{}\" width=\"50\" height=\"50\">",
            escape(logo),
            escape(&page.meta.site_title)
        );
    }
    html.push_str("</div>\n<div class=\"psm-mobile-menu-content\">\n");
    render_menu(html, page);
    html.push_str("</div>\n</div>\n");
}

fn render_menu(html: &mut String, page: &PageData<'_>) {
    html.push_str("<ul>\n");
    for item in page.menu {
        let class = if item.url_path == page.url_path {
            " class=\"psm-active\""
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<li{class}><a href=\"{}\">{}</a></li>",
            escape(&relative_url(page.url_path, &item.url_path)),
            escape(&item.label)
        );
    }
    html.push_str("</ul>\n");
}

/// Escape HTML special characters.
fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn meta() -> PageMeta {
        PageMeta {
            site_title: "City".to_owned(),
            title: Some("About".to_owned()),
            label: "About".to_owned(),
            description: Some("About the city".to_owned()),
            font: Some("https://fonts.example/css?family=Roboto&display=swap".to_owned()),
            ..PageMeta::default()
        }
    }

    fn menu() -> Vec<MenuItem> {
        vec![
            MenuItem {
                label: "Home".to_owned(),
                url_path: "index.html".to_owned(),
            },
            MenuItem {
                label: "About".to_owned(),
                url_path: "intro/about.html".to_owned(),
            },
        ]
    }

    fn page<'a>(meta: &'a PageMeta, menu: &'a [MenuItem], url_path: &'a str) -> PageData<'a> {
        PageData {
            lang: "es",
            meta,
            url_path,
            content: "<p>Hello</p>\n",
            header: "<p>Top</p>\n",
            footer: "<p>Bottom</p>\n",
            menu,
            logo: None,
            body_style: "",
            generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_render_page_head() {
        let meta = meta();
        let menu = menu();
        let html = render_page(&page(&meta, &menu, "index.html"));

        assert!(html.starts_with("<!-- This file was generated by psmdoc"));
        assert!(html.contains("<!-- Generated at 2024-05-01T12:00:00.000Z -->"));
        assert!(html.contains("<html lang=\"es\">"));
        assert!(html.contains("<title>City | About</title>"));
        assert!(html.contains("<meta name=\"description\" content=\"About the city\">"));
        assert!(!html.contains("name=\"keywords\""));
        assert!(html.contains("href=\"https://fonts.example/css?family=Roboto&amp;display=swap\""));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"css/psmdoc.css\">"));
        assert!(html.contains("<script src=\"js/psmdoc.js\"></script>"));
    }

    #[test]
    fn test_render_page_layout() {
        let meta = meta();
        let menu = menu();
        let html = render_page(&page(&meta, &menu, "index.html"));

        let header = html.find("<p>Top</p>").unwrap();
        let content = html.find("<p>Hello</p>").unwrap();
        let sidebar = html.find("<h2>Menu</h2>").unwrap();
        let footer = html.find("<p>Bottom</p>").unwrap();
        assert!(header < content && content < sidebar && sidebar < footer);
        assert!(html.contains("<p>&copy; City 2024</p>"));
        // Mobile menu and sidebar both list every page.
        assert_eq!(html.matches("<a href=\"intro/about.html\">About</a>").count(), 2);
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_nested_page_uses_relative_links() {
        let meta = meta();
        let menu = menu();
        let html = render_page(&page(&meta, &menu, "intro/about.html"));

        assert!(html.contains("href=\"../css/psmdoc.css\""));
        assert!(html.contains("src=\"../js/psmdoc.js\""));
        assert!(html.contains("<li><a href=\"../index.html\">Home</a></li>"));
        assert!(html.contains("<li class=\"psm-active\"><a href=\"about.html\">About</a></li>"));
    }

    #[test]
    fn test_logo_and_body_style() {
        let meta = meta();
        let menu = menu();
        let mut data = page(&meta, &menu, "index.html");
        data.logo = Some("/img/logo.png");
        data.body_style = "color: #333;";
        let html = render_page(&data);

        assert!(html.contains("<img src=\"/img/logo.png\" alt=\"City\" width=\"50\" height=\"50\">"));
        assert!(html.contains("<body style=\"color: #333;\">"));
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape("<script>"), "&lt;script&gt;");
        assert_eq!(escape("a&b"), "a&amp;b");
        assert_eq!(escape("\"hello\""), "&quot;hello&quot;");
    }
}
