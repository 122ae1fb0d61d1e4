//! End-to-end rendering of whole documents.

use pretty_assertions::assert_eq;
use psm_renderer::{Renderer, render};

const FAQ: &str = "#H1 Help

#ACCORDION FAQ
#O Shipping
   Orders ship in *two* days.

#O Returns
   #H2 Policy

   - Within 30 days
   - Unused items
#ENDACCORDION

#H2 Contact

Write to `help@example.com`.";

fn ids(html: &str) -> Vec<&str> {
    html.match_indices("id=\"")
        .map(|(start, _)| {
            let rest = &html[start + 4..];
            &rest[..rest.find('"').unwrap()]
        })
        .collect()
}

#[test]
fn test_rendering_is_deterministic() {
    let first = render(FAQ, Some("en"));
    let second = render(FAQ, Some("en"));
    assert_eq!(first, second);
}

#[test]
fn test_default_locale_is_english() {
    let doc = "#EL https://x.org lg-es=\"Equis\" lg-en=\"Ex\"";
    assert_eq!(render(doc, None), render(doc, Some("en")));
}

#[test]
fn test_heading_ids_are_unique() {
    let html = render("#H2 Intro\n\n#H2 Intro\n\n#H3 Intro", None);
    assert_eq!(ids(&html), vec!["intro", "intro1", "intro2"]);
}

#[test]
fn test_accented_heading_id() {
    let html = render("#H1 Gestión", None);
    assert!(html.starts_with("<h1 id=\"gestion\">"));
}

#[test]
fn test_inline_toggles() {
    assert_eq!(
        render("Today is a *good* day", None),
        "<p>Today is a <b>good</b> day</p>\n"
    );
    assert_eq!(
        render("*bold without close", None),
        "<p><b>bold without close</p>\n"
    );
}

#[test]
fn test_internal_link() {
    assert_eq!(
        render("#IL about.psmdoc \"About Us\"", Some("en")),
        "<a href=\"about.html\" target=\"_self\">About Us</a>\n"
    );
}

#[test]
fn test_table() {
    let html = render("#TABLE Pricing\n| Plan | Price |\n| Free | $0 |", None);
    assert!(html.contains("<caption role=\"caption\">Pricing</caption>"));
    assert!(html.contains("<th scope=\"col\" role=\"columnheader\">Plan</th>"));
    assert!(html.contains("<th scope=\"col\" role=\"columnheader\">Price</th>"));
    assert!(html.contains("<td role=\"cell\">Free</td>"));
    assert!(html.contains("<td role=\"cell\">$0</td>"));
    assert_eq!(html.matches("<tr role=\"row\">").count(), 2);
}

#[test]
fn test_accordion_sections_and_resume() {
    let html = render(FAQ, None);

    assert_eq!(html.matches("<details open>").count(), 1);
    assert!(html.contains("<summary>FAQ</summary>"));
    assert!(html.contains("id=\"psm-accordion-shipping\""));
    assert!(html.contains("id=\"psm-accordion-returns\""));
    assert!(html.contains("<p>Orders ship in <b>two</b> days.</p>"));
    assert!(html.contains("<li>Within 30 days</li>"));

    // Content after the accordion is processed normally, once.
    assert_eq!(html.matches("<h2 id=\"contact\">").count(), 1);
    assert!(html.ends_with("<p>Write to <code>help@example.com</code>.</p>\n"));
    assert!(!html.contains("#ENDACCORDION"));
    assert!(!html.contains("<p>#O"));
}

#[test]
fn test_accordion_bodies_use_fresh_registries() {
    let doc = "#H2 Policy\n\n#ACCORDION A\n#O One\n#H2 Policy\n#ENDACCORDION";
    let html = render(doc, None);
    // The nested heading does not see the outer registry.
    assert_eq!(html.matches("<h2 id=\"policy\">").count(), 2);
}

#[test]
fn test_accordion_terminator_at_end_of_line() {
    let html = render("#ACCORDION FAQ\n#O One\nbody text #ENDACCORDION\n\nAfter", None);
    assert!(html.contains("<p>body text</p>"));
    assert!(!html.contains("#ENDACCORDION"));
    assert!(html.ends_with("</details>\n</div>\n<br>\n<p>After</p>\n"));
}

#[test]
fn test_accordion_option_marker_inside_line() {
    let html = render("#ACCORDION FAQ\n#O One\nfirst #O Two\nsecond\n#ENDACCORDION", None);
    assert!(html.contains("id=\"psm-accordion-one\""));
    assert!(html.contains("id=\"psm-accordion-two\""));
    assert!(html.contains("<p>first</p>"));
    assert!(html.contains("<p>second</p>"));
}

#[test]
fn test_accordion_without_terminator_consumes_rest() {
    let html = render("#ACCORDION A\n#O One\nbody\n\n#H2 Inside", None);
    assert!(html.ends_with("</details>\n</div>\n"));
    assert!(html.contains("<h2 id=\"inside\">"));
}

#[test]
fn test_malformed_link_does_not_abort() {
    let result = Renderer::new("en").render("#H1 Top\n\n#EL\n\nStill here");
    assert!(result.html.contains("<p>Still here</p>"));
    assert!(!result.html.contains("<a href=\"\""));
    assert_eq!(result.warnings, vec!["link directive `#EL` has no path".to_owned()]);
}

#[test]
fn test_nested_warnings_are_collected() {
    let result = Renderer::new("en").render("#ACCORDION A\n#O One\n#VIDEO vimeo=1\n#ENDACCORDION");
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn test_crlf_documents() {
    assert_eq!(
        render("#H2 Intro\r\n\r\nText", None),
        render("#H2 Intro\n\nText", None)
    );
}

#[test]
fn test_media_blocks() {
    let html = render(
        "#IMG logo.png \"Logo\" width=120\n\n#VIDEO youtube=abc\n\n#PDF a.pdf\n\n#MAP https://m.example\n\n#AUDIO a.mp3\n\n#SVG i.svg",
        None,
    );
    assert!(html.contains("<img src=\"logo.png\" alt=\"Logo\" width=\"120\""));
    assert!(html.contains("https://www.youtube.com/embed/abc"));
    assert!(html.contains("type=\"application/pdf\""));
    assert!(html.contains("<iframe src=\"https://m.example\""));
    assert!(html.contains("<audio src=\"a.mp3\""));
    assert!(html.contains("<img src=\"i.svg\""));
    assert_eq!(html.matches("<br>\n").count(), 5);
}
