// src/extractors/detail.rs

use futures::stream::{self, StreamExt};

use crate::extractors::body::flatten_detail_page;
use crate::extractors::models::{Catalogue, Item, Section};
use crate::fetch::DetailFetcher;

/// Replaces every item body with its flattened detail page.
/// At most `concurrency` fetches are in flight; results keep page order.
pub async fn enrich(catalogue: &Catalogue, fetcher: &dyn DetailFetcher, concurrency: usize) -> Catalogue {
    let items: Vec<&Item> = catalogue
        .risk_sections
        .iter()
        .chain(&catalogue.mitigation_sections)
        .flat_map(|section| section.items())
        .collect();

    tracing::info!(
        "Fetching detail pages for {} item(s), concurrency {}",
        items.len(),
        concurrency.max(1)
    );

    let bodies: Vec<String> = stream::iter(items.into_iter().map(|item| detail_body(item, fetcher)))
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let empty = bodies.iter().filter(|b| b.is_empty()).count();
    if empty > 0 {
        tracing::warn!("{} item(s) ended up with an empty detail body", empty);
    }

    let mut bodies = bodies.into_iter();
    let risk_sections = with_bodies(&catalogue.risk_sections, &mut bodies);
    let mitigation_sections = with_bodies(&catalogue.mitigation_sections, &mut bodies);

    Catalogue {
        domain: catalogue.domain,
        risk_sections,
        mitigation_sections,
    }
}

fn with_bodies(sections: &[Section], bodies: &mut impl Iterator<Item = String>) -> Vec<Section> {
    sections
        .iter()
        .map(|section| section.map_items(|item| item.with_body(bodies.next().unwrap_or_default())))
        .collect()
}

/// Flattened detail page for one item, or empty on any failure.
async fn detail_body(item: &Item, fetcher: &dyn DetailFetcher) -> String {
    if item.url.is_empty() {
        tracing::debug!("Item '{}' has no detail link", item.id);
        return String::new();
    }

    let response = fetcher.fetch(&item.url).await;
    if !response.ok {
        tracing::warn!("Detail fetch failed for '{}' ({})", item.id, item.url);
        return String::new();
    }

    match flatten_detail_page(&response.html) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("No detail content for '{}' ({}): {}", item.id, item.url, e);
            String::new()
        }
    }
}
