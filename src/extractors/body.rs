// src/extractors/body.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::extractors::text::{full_text, normalize, own_text};
use crate::utils::error::ExtractError;

// --- CSS Selectors (Lazy Static) ---
// Block elements that carry the readable body of a detail page
static BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6, p, ul, ol")
        .expect("Failed to compile BLOCK_SELECTOR")
});

static LIST_ITEM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li").expect("Failed to compile LIST_ITEM_SELECTOR"));

// Content region of a risk/mitigation detail page
static DETAIL_CONTENT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div[class*='card-body']").expect("Failed to compile DETAIL_CONTENT_SELECTOR")
});

/// Parses a detail page and flattens its content region.
pub fn flatten_detail_page(html: &str) -> Result<String, ExtractError> {
    let document = Html::parse_document(html);
    let content = document
        .select(&DETAIL_CONTENT_SELECTOR)
        .next()
        .ok_or_else(|| ExtractError::ContentNotFound("div.card-body".to_string()))?;

    Ok(flatten(content))
}

/// Flattens headings, paragraphs and lists under `content` into plain text,
/// keeping document order. Headings become `## ` lines, list items `- ` lines.
pub fn flatten(content: ElementRef) -> String {
    let mut fragments: Vec<String> = Vec::new();

    for element in content.select(&BLOCK_SELECTOR) {
        // Already emitted through the enclosing list's items.
        if is_inside_list(element, content) {
            continue;
        }

        match element.value().name() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                fragments.push(format!("\n## {}\n", heading_text(element)));
            }
            "p" => {
                fragments.push(format!("{}\n", normalize(&full_text(element))));
            }
            "ul" | "ol" => {
                for item in element.select(&LIST_ITEM_SELECTOR) {
                    fragments.push(format!("- {}\n", normalize(&full_text(item))));
                }
            }
            _ => {}
        }
    }

    tracing::trace!("Flattened {} body fragments", fragments.len());
    fragments.join("\n")
}

/// Heading text without trailing anchor glyphs; headings that are
/// entirely a link fall back to their full text.
fn heading_text(element: ElementRef) -> String {
    let own = normalize(&own_text(element));
    if own.is_empty() {
        normalize(&full_text(element))
    } else {
        own
    }
}

fn is_inside_list(element: ElementRef, root: ElementRef) -> bool {
    element
        .ancestors()
        .take_while(|node| node.id() != root.id())
        .filter_map(ElementRef::wrap)
        .any(|ancestor| matches!(ancestor.value().name(), "ul" | "ol"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_page(inner: &str) -> String {
        format!(
            r#"<html><body><nav><p>Skip me</p></nav><div class="card shadow"><div class="card-body">{}</div></div></body></html>"#,
            inner
        )
    }

    #[test]
    fn test_flatten_keeps_reading_order() {
        let html = detail_page("<h2>A</h2><p>B</p><ul><li>C</li><li>D</li></ul>");
        let body = flatten_detail_page(&html).unwrap();

        assert_eq!(body, "\n## A\n\nB\n\n- C\n\n- D\n");

        let lines: Vec<&str> = body.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines, vec!["## A", "B", "- C", "- D"]);
        assert!(!body.contains("Skip me"), "Content outside card-body must be ignored");
    }

    #[test]
    fn test_paragraph_includes_inline_markup() {
        let html = detail_page("<p>Models may <strong>leak</strong>   <em>training</em>\u{a0}data.</p>");
        let body = flatten_detail_page(&html).unwrap();
        assert_eq!(body, "Models may leak training data.\n");
    }

    #[test]
    fn test_nested_lists_are_not_repeated() {
        let html = detail_page(
            "<h3>Controls <a class=\"anchor\" href=\"#c\">#</a></h3>\
             <ol><li><p>One</p><ul><li>Two</li></ul></li><li>Three</li></ol>\
             <div><p>Tail</p></div>",
        );
        let body = flatten_detail_page(&html).unwrap();
        let lines: Vec<&str> = body.lines().filter(|l| !l.is_empty()).collect();

        assert_eq!(lines[0], "## Controls");
        assert_eq!(lines.iter().filter(|l| **l == "- Two").count(), 1);
        assert!(!lines.contains(&"One"), "Paragraph inside a list item is emitted via the item");
        assert_eq!(lines.last(), Some(&"Tail"));
        assert!(lines.contains(&"- Three"));
    }

    #[test]
    fn test_linked_heading_keeps_its_text() {
        let html = detail_page(r##"<h2><a href="#overview">Overview</a></h2><p>x</p>"##);
        let body = flatten_detail_page(&html).unwrap();
        assert_eq!(body, "\n## Overview\n\nx\n");
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let html = detail_page("<h2>X</h2><p>Y</p><ul><li>Z</li></ul>");
        assert_eq!(flatten_detail_page(&html).unwrap(), flatten_detail_page(&html).unwrap());
    }

    #[test]
    fn test_missing_content_container() {
        let result = flatten_detail_page("<html><body><p>No card here</p></body></html>");
        assert!(matches!(result, Err(ExtractError::ContentNotFound(_))));
    }
}
