use scraper::{ElementRef, Html};
use sightline_core::error::AppError;
use sightline_core::models::PageText;
use sightline_core::traits::TextExtractor;

/// Plain-text extractor built on `scraper`'s HTML5 parser.
///
/// Malformed markup is repaired by the parser rather than rejected. Every
/// text node under `<head>` and `<body>` is kept, script and style contents
/// included. The HTML5 parser synthesizes both sections, so a section only
/// counts when the source carries its start tag; otherwise it is empty.
#[derive(Debug, Clone, Default)]
pub struct ScraperTextExtractor;

impl ScraperTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for ScraperTextExtractor {
    fn extract(&self, html: &str) -> Result<PageText, AppError> {
        let document = Html::parse_document(html);
        let root = document.root_element();

        let section = |name: &str| {
            if !has_start_tag(html, name) {
                return String::new();
            }
            root.children()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == name)
                .map(joined_text)
                .unwrap_or_default()
        };

        Ok(PageText {
            head: section("head"),
            body: section("body"),
        })
    }
}

/// Whether `html` contains a `<name ...>` start tag, ASCII case-insensitive.
///
/// `<header>` does not count as `<head>`.
fn has_start_tag(html: &str, name: &str) -> bool {
    let lower = html.to_ascii_lowercase();
    let needle = format!("<{name}");
    lower.match_indices(&needle).any(|(at, _)| {
        matches!(
            lower.as_bytes().get(at + needle.len()),
            Some(b'>' | b'/' | b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
        )
    })
}

/// Each text node trimmed, blanks dropped, joined by single spaces.
fn joined_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
