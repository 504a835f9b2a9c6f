// src/extractors/section.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use url::Url;

use crate::extractors::card::extract_item;
use crate::extractors::models::{Item, ItemKind, Section};
use crate::extractors::text::{normalize, own_text};

// --- CSS Selectors (Lazy Static) ---
static CATEGORY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h3[class*='category-title']").expect("Failed to compile CATEGORY_SELECTOR")
});

// Whole `card` class token only, so `card-body`/`card-header` wrappers are not cards
static CARD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.card").expect("Failed to compile CARD_SELECTOR"));

/// Builds one category section. Cards without an identifier are dropped;
/// returns `None` when the category label is blank or no card survives.
pub fn build_section(section: ElementRef, kind: ItemKind, base_url: &Url) -> Option<Section> {
    let category = section
        .select(&CATEGORY_SELECTOR)
        .next()
        .map(|el| normalize(&own_text(el)))
        .unwrap_or_default();

    let mut skipped = 0usize;
    let items: Vec<Item> = section
        .select(&CARD_SELECTOR)
        .map(|card| extract_item(card, kind, base_url))
        .filter(|item| {
            let keep = item.is_valid();
            if !keep {
                skipped += 1;
            }
            keep
        })
        .collect();

    if skipped > 0 {
        tracing::debug!("Skipped {} {:?} card(s) without an identifier in '{}'", skipped, kind, category);
    }

    let count = items.len();
    match Section::new(category, items) {
        Some(section) => {
            tracing::debug!("Built {:?} section '{}' with {} item(s)", kind, section.category(), count);
            Some(section)
        }
        None => {
            tracing::debug!("Discarding {:?} section: empty category or no valid items", kind);
            None
        }
    }
}
