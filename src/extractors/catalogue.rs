// src/extractors/catalogue.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::extractors::models::{Catalogue, Domain, ItemKind, Section};
use crate::extractors::section::build_section;

const RISK_MARKER_ID: &str = "risk-catalogue";
const MITIGATION_MARKER_ID: &str = "mitigation-catalogue";

// --- CSS Selectors (Lazy Static) ---
static RISK_MARKER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h2#risk-catalogue").expect("Failed to compile RISK_MARKER_SELECTOR")
});

static MITIGATION_MARKER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h2#mitigation-catalogue").expect("Failed to compile MITIGATION_MARKER_SELECTOR")
});

/// Builds the full catalogue from the index page.
/// Always returns exactly one Catalogue; missing markers just leave that half empty.
pub fn build_catalogue(document: &Html, base_url: &Url) -> Catalogue {
    let risk_sections = document
        .select(&RISK_MARKER_SELECTOR)
        .next()
        .map(|marker| collect_sections(marker, ItemKind::Risk, base_url))
        .unwrap_or_else(|| {
            tracing::warn!("No '#{}' marker found in index page", RISK_MARKER_ID);
            Vec::new()
        });

    let mitigation_sections = document
        .select(&MITIGATION_MARKER_SELECTOR)
        .next()
        .map(|marker| collect_sections(marker, ItemKind::Mitigation, base_url))
        .unwrap_or_else(|| {
            tracing::warn!("No '#{}' marker found in index page", MITIGATION_MARKER_ID);
            Vec::new()
        });

    tracing::info!(
        "Assembled catalogue: {} risk section(s), {} mitigation section(s)",
        risk_sections.len(),
        mitigation_sections.len()
    );

    Catalogue {
        domain: Domain::Finos,
        risk_sections,
        mitigation_sections,
    }
}

/// Sections that are siblings after `marker`, stopping at the mitigation
/// marker so the risk half never swallows the mitigation half.
fn collect_sections(marker: ElementRef, kind: ItemKind, base_url: &Url) -> Vec<Section> {
    marker
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|el| el.value().id() != Some(MITIGATION_MARKER_ID))
        .filter(|el| el.value().name() == "section")
        .filter_map(|el| build_section(el, kind, base_url))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_HTML: &str = r#"
        <!DOCTYPE html>
        <html><head><title>AI Governance Framework</title></head><body><main>
          <h1>FINOS AI Governance Framework</h1>
          <h2 id="risk-catalogue">Risk Catalogue</h2>
          <section>
            <h3 class="category-title">Bias</h3>
            <div class="card">
              <a href="/risks/ri-1.html">
                <div class="risk-id">RI-1</div>
                <h3 class="card-title">Hallucination</h3>
              </a>
            </div>
            <div class="card">
              <h3 class="card-title">Untracked</h3>
            </div>
          </section>
          <h2 id="mitigation-catalogue">Mitigation Catalogue</h2>
          <section>
            <h3 class="category-title">Controls</h3>
            <div class="card">
              <a href="/mitigations/mi-1.html">
                <div class="mitigation-id">MI-1</div>
                <h3 class="card-title">Human Review</h3>
              </a>
            </div>
          </section>
        </main></body></html>
    "#;

    fn base() -> Url {
        Url::parse("https://air-governance-framework.finos.org/").unwrap()
    }

    #[test]
    fn test_end_to_end_index() {
        let document = Html::parse_document(INDEX_HTML);
        let catalogue = build_catalogue(&document, &base());

        assert_eq!(catalogue.domain, Domain::Finos);
        assert_eq!(catalogue.risk_sections.len(), 1);
        assert_eq!(catalogue.mitigation_sections.len(), 1);

        let bias = &catalogue.risk_sections[0];
        assert_eq!(bias.category(), "Bias");
        assert_eq!(bias.items().len(), 1);
        assert_eq!(bias.items()[0].id, "RI-1");
        assert_eq!(bias.items()[0].title, "Hallucination");
        assert_eq!(
            bias.items()[0].url,
            "https://air-governance-framework.finos.org/risks/ri-1.html"
        );

        let controls = &catalogue.mitigation_sections[0];
        assert_eq!(controls.category(), "Controls");
        assert_eq!(controls.items().len(), 1);
        assert_eq!(controls.items()[0].id, "MI-1");
        assert_eq!(controls.items()[0].title, "Human Review");
    }

    #[test]
    fn test_sections_between_markers_only() {
        let html = r#"<body>
            <section><h3 class="category-title">Before</h3><div class="card"><div class="risk-id">RI-0</div></div></section>
            <h2 id="risk-catalogue">Risks</h2>
            <p>Intro text</p>
            <section><h3 class="category-title">A</h3><div class="card"><div class="risk-id">RI-1</div></div></section>
            <section><h3 class="category-title">Empty</h3></section>
            <section><h3 class="category-title">B</h3><div class="card"><div class="risk-id">RI-2</div></div></section>
            <h2 id="mitigation-catalogue">Mitigations</h2>
            <section><h3 class="category-title">C</h3><div class="card"><div class="mitigation-id">MI-1</div></div></section>
        </body>"#;
        let catalogue = build_catalogue(&Html::parse_document(html), &base());

        let risk_categories: Vec<&str> = catalogue.risk_sections.iter().map(|s| s.category()).collect();
        assert_eq!(risk_categories, vec!["A", "B"]);
        let mitigation_categories: Vec<&str> =
            catalogue.mitigation_sections.iter().map(|s| s.category()).collect();
        assert_eq!(mitigation_categories, vec!["C"]);
    }

    #[test]
    fn test_empty_document_yields_empty_catalogue() {
        let catalogue = build_catalogue(&Html::parse_document("<html><body></body></html>"), &base());
        assert_eq!(catalogue, Catalogue::default());
        assert_eq!(catalogue.item_count(), 0);
    }

    #[test]
    fn test_every_section_is_non_empty() {
        let catalogue = build_catalogue(&Html::parse_document(INDEX_HTML), &base());
        for section in catalogue.risk_sections.iter().chain(&catalogue.mitigation_sections) {
            assert!(!section.category().is_empty());
            assert!(!section.items().is_empty());
        }
    }
}
