//! Markup extraction: a small structured view of a page, enough for every
//! signal check without keeping the DOM around.

use scraper::{ElementRef, Html, Node};
use std::collections::BTreeMap;

/// Attribute name to value for one `<meta>` element
pub type MetaTag = BTreeMap<String, String>;

/// Structured projection of one fetched page. Built per URL, dropped after scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupView {
    /// Stripped text of the first `<title>`, or empty
    pub title: String,
    /// Every `<meta>` element's attributes, in document order
    pub meta_tags: Vec<MetaTag>,
    /// All text nodes, lower-cased and joined with single spaces
    pub text_content: String,
    /// Stripped text of the first `<h1>`, or empty
    pub heading: String,
    /// Whether an `<object>` or `<embed>` element is present
    pub has_embedded_objects: bool,
    /// One entry per `<img>` element in document order; `None` when it has
    /// no usable `src` (lazy-loaded images, for instance)
    pub images: Vec<Option<String>>,
    /// Set when the body could not be decoded cleanly
    pub parse_error: Option<String>,
}

impl MarkupView {
    /// Whether some meta tag has `name` equal to `name` (case-insensitive)
    pub fn has_meta_named(&self, name: &str) -> bool {
        self.meta_tags.iter().any(|tag| {
            tag.get("name")
                .is_some_and(|value| value.trim().eq_ignore_ascii_case(name))
        })
    }

    /// Whether some meta tag carries a `charset` attribute
    pub fn declares_charset(&self) -> bool {
        self.meta_tags.iter().any(|tag| tag.contains_key("charset"))
    }
}

/// Parse `body` into a [`MarkupView`]. Never fails: malformed markup yields
/// whatever the HTML5 tree builder recovers.
pub fn extract(body: &str) -> MarkupView {
    let document = Html::parse_document(body);

    let mut view = MarkupView::default();
    let mut title: Option<String> = None;
    let mut heading: Option<String> = None;
    let mut text_parts: Vec<String> = Vec::new();

    for node in document.tree.root().descendants() {
        match node.value() {
            Node::Element(element) => match element.name() {
                "title" if title.is_none() => {
                    title = ElementRef::wrap(node).map(|el| element_text(&el));
                }
                "h1" if heading.is_none() => {
                    heading = ElementRef::wrap(node).map(|el| element_text(&el));
                }
                "meta" => view.meta_tags.push(
                    element
                        .attrs()
                        .map(|(name, value)| (name.to_string(), value.to_string()))
                        .collect(),
                ),
                "object" | "embed" => view.has_embedded_objects = true,
                "img" => {
                    let src = element
                        .attr("src")
                        .map(str::trim)
                        .filter(|src| !src.is_empty())
                        .map(str::to_string);
                    view.images.push(src);
                }
                _ => {}
            },
            Node::Text(text) => {
                if !text.trim().is_empty() {
                    text_parts.push(text.to_lowercase());
                }
            }
            _ => {}
        }
    }

    view.title = title.unwrap_or_default();
    view.heading = heading.unwrap_or_default();
    view.text_content = text_parts.join(" ");
    view.parse_error = decode_problem(body);
    view
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Replacement characters and NULs mean the bytes did not decode as text
fn decode_problem(body: &str) -> Option<String> {
    let bad = body
        .chars()
        .filter(|c| *c == '\u{FFFD}' || *c == '\0')
        .count();
    match bad {
        0 => None,
        1 => Some("1 undecodable character".to_string()),
        n => Some(format!("{} undecodable characters", n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width">
  <title>  Acme Plumbing &amp; Heating  </title>
</head>
<body>
  <h1>Acme Plumbing</h1>
  <p>Call US Today</p>
  <img src="/logo.png"><img src=""><img alt="no source">
  <embed src="intro.swf">
  <footer>&copy; 2016 Acme</footer>
</body>
</html>"#;

    #[test]
    fn extracts_title_stripped() {
        let view = extract(PAGE);
        assert_eq!(view.title, "Acme Plumbing & Heating");
    }

    #[test]
    fn extracts_meta_tags_in_order() {
        let view = extract(PAGE);
        assert_eq!(view.meta_tags.len(), 2);
        assert_eq!(view.meta_tags[0].get("charset").map(String::as_str), Some("utf-8"));
        assert_eq!(
            view.meta_tags[1].get("name").map(String::as_str),
            Some("viewport")
        );
        assert!(view.has_meta_named("viewport"));
        assert!(view.declares_charset());
    }

    #[test]
    fn text_content_is_lowercased_and_space_joined() {
        let view = extract(PAGE);
        assert!(view.text_content.contains("call us today"));
        assert!(view.text_content.contains("© 2016 acme"));
        assert!(!view.text_content.contains("Call"));
    }

    #[test]
    fn collects_heading_images_and_embeds() {
        let view = extract(PAGE);
        assert_eq!(view.heading, "Acme Plumbing");
        assert_eq!(
            view.images,
            vec![Some("/logo.png".to_string()), None, None]
        );
        assert!(view.has_embedded_objects);
    }

    #[test]
    fn object_element_counts_as_embedded() {
        let view = extract("<body><object data='movie.swf'></object></body>");
        assert!(view.has_embedded_objects);
    }

    #[test]
    fn empty_body_gives_empty_view() {
        let view = extract("");
        assert_eq!(view.title, "");
        assert!(view.meta_tags.is_empty());
        assert_eq!(view.text_content, "");
        assert!(view.parse_error.is_none());
    }

    #[test]
    fn malformed_markup_degrades_gracefully() {
        let view = extract("<html><head><title>Broken <b>page</head><body><p>text <div>more");
        assert!(view.text_content.contains("more"));
        assert!(view.parse_error.is_none());
    }

    #[test]
    fn undecodable_bytes_are_reported() {
        let body = String::from_utf8_lossy(b"<p>caf\xff\xfe</p>").into_owned();
        let view = extract(&body);
        assert_eq!(view.parse_error.as_deref(), Some("2 undecodable characters"));
    }

    #[test]
    fn viewport_name_match_ignores_case() {
        let view = extract(r#"<meta name="Viewport" content="width=device-width">"#);
        assert!(view.has_meta_named("viewport"));
    }

    #[test]
    fn http_equiv_is_not_a_charset_attribute() {
        let view = extract(
            r#"<meta http-equiv="Content-Type" content="text/html; charset=utf-8">"#,
        );
        assert!(!view.declares_charset());
    }
}
