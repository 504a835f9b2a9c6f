// src/extractors/card.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use url::Url;

use crate::extractors::models::{Item, ItemKind};
use crate::extractors::text::{full_text, normalize, own_text};

// --- CSS Selectors (Lazy Static) ---
static RISK_ID_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div[class*='risk-id']").expect("Failed to compile RISK_ID_SELECTOR")
});

static MITIGATION_ID_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div[class*='mitigation-id']")
        .expect("Failed to compile MITIGATION_ID_SELECTOR")
});

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h3[class*='card-title']").expect("Failed to compile TITLE_SELECTOR")
});

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("Failed to compile LINK_SELECTOR"));

// Summary paragraph shown on the index card; falls back to any paragraph
static SUMMARY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.card-text").expect("Failed to compile SUMMARY_SELECTOR"));
static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("Failed to compile PARAGRAPH_SELECTOR"));

fn id_selector(kind: ItemKind) -> &'static Selector {
    match kind {
        ItemKind::Risk => &*RISK_ID_SELECTOR,
        ItemKind::Mitigation => &*MITIGATION_ID_SELECTOR,
    }
}

/// Builds an Item from one index card. The body is the card's own summary;
/// deep mode replaces it later with the flattened detail page.
/// Missing nodes become empty fields.
pub fn extract_item(card: ElementRef, kind: ItemKind, base_url: &Url) -> Item {
    let id = card
        .select(id_selector(kind))
        .next()
        .map(|el| normalize(&own_text(el)))
        .unwrap_or_default();

    let title = card
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| normalize(&own_text(el)))
        .unwrap_or_default();

    let url = card
        .select(&LINK_SELECTOR)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| resolve_link(base_url, href))
        .unwrap_or_default();

    let body = card
        .select(&SUMMARY_SELECTOR)
        .next()
        .or_else(|| card.select(&PARAGRAPH_SELECTOR).next())
        .map(|p| normalize(&full_text(p)))
        .unwrap_or_default();

    tracing::trace!("Extracted {:?} card '{}' ({})", kind, id, url);
    Item { id, title, body, url }
}

/// Absolute form of `href`, or empty when it cannot be resolved.
fn resolve_link(base_url: &Url, href: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }
    match base_url.join(href) {
        Ok(url) => url.to_string(),
        Err(e) => {
            tracing::debug!("Could not resolve link '{}' against {}: {}", href, base_url, e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn base() -> Url {
        Url::parse("https://air-governance-framework.finos.org/").unwrap()
    }

    fn first_card(html: &str) -> Item {
        first_card_of_kind(html, ItemKind::Risk)
    }

    fn first_card_of_kind(html: &str, kind: ItemKind) -> Item {
        let fragment = Html::parse_fragment(html);
        let selector = Selector::parse("div.card").unwrap();
        let card = fragment.select(&selector).next().unwrap();
        extract_item(card, kind, &base())
    }

    #[test]
    fn test_extracts_risk_card() {
        let item = first_card(
            r#"<div class="card h-100">
                 <a href="/risks/ri-1.html">
                   <div class="card-header"><div class="risk-id badge">  RI-1 </div></div>
                   <h3 class="card-title">Hallucination &amp;  Inaccurate   Outputs</h3>
                   <p class="card-text">LLMs can   produce plausible but false text.</p>
                 </a>
               </div>"#,
        );

        assert_eq!(item.id, "RI-1");
        assert_eq!(item.title, "Hallucination & Inaccurate Outputs");
        assert_eq!(item.url, "https://air-governance-framework.finos.org/risks/ri-1.html");
        assert_eq!(item.body, "LLMs can produce plausible but false text.");
    }

    #[test]
    fn test_mitigation_marker_is_kind_specific() {
        let html = r#"<div class="card"><div class="mitigation-id">MI-1</div>
                      <h3 class="card-title">Human Review</h3></div>"#;

        assert_eq!(first_card_of_kind(html, ItemKind::Mitigation).id, "MI-1");
        assert_eq!(first_card_of_kind(html, ItemKind::Risk).id, "", "risk-id marker absent");
    }

    #[test]
    fn test_missing_nodes_degrade_to_empty() {
        let item = first_card(r#"<div class="card"><span>Nothing useful</span></div>"#);
        assert_eq!(item, Item::default());
        assert!(!item.is_valid());
    }

    #[test]
    fn test_summary_falls_back_to_first_paragraph() {
        let item = first_card(
            r#"<div class="card"><div class="risk-id">RI-2</div><p>Fallback <em>summary</em></p></div>"#,
        );
        assert_eq!(item.body, "Fallback summary");
        assert_eq!(item.url, "", "No link means no URL");
    }

    #[test]
    fn test_resolve_link() {
        assert_eq!(
            resolve_link(&base(), "mitigations/mi-1.html"),
            "https://air-governance-framework.finos.org/mitigations/mi-1.html"
        );
        assert_eq!(resolve_link(&base(), "https://other.org/x"), "https://other.org/x");
        assert_eq!(resolve_link(&base(), "   "), "");
    }
}
