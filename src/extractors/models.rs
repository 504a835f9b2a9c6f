// src/extractors/models.rs
use serde::{Deserialize, Serialize};

/// Which half of the catalogue a card belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Risk,
    Mitigation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    #[default]
    Finos,
}

/// One risk or mitigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub body: String,
    pub url: String,
}

impl Item {
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty()
    }

    /// Same item with a different body.
    pub fn with_body(&self, body: String) -> Self {
        Self { body, ..self.clone() }
    }
}

/// A named category and its items, in page order.
/// Constructed only through `Section::new`, which refuses empty sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    category: String,
    items: Vec<Item>,
}

impl Section {
    pub fn new(category: String, items: Vec<Item>) -> Option<Self> {
        if category.is_empty() || items.is_empty() {
            return None;
        }
        Some(Self { category, items })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Rebuilds the section with each item passed through `f`.
    pub fn map_items(&self, f: impl FnMut(&Item) -> Item) -> Self {
        Self {
            category: self.category.clone(),
            items: self.items.iter().map(f).collect(),
        }
    }
}

/// Output of one extraction pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalogue {
    pub domain: Domain,
    pub risk_sections: Vec<Section>,
    pub mitigation_sections: Vec<Section>,
}

impl Catalogue {
    pub fn item_count(&self) -> usize {
        self.risk_sections
            .iter()
            .chain(&self.mitigation_sections)
            .map(|s| s.items().len())
            .sum()
    }
}

// --- Serialized shape ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskItemRecord {
    pub risk_id: String,
    pub title: String,
    pub content: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSectionRecord {
    pub category: String,
    pub risks: Vec<RiskItemRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MitigationItemRecord {
    pub mitigation_id: String,
    pub title: String,
    pub content: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MitigationSectionRecord {
    pub category: String,
    pub mitigations: Vec<MitigationItemRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueRecord {
    pub domain: Domain,
    pub risk_sections: Vec<RiskSectionRecord>,
    pub mitigation_sections: Vec<MitigationSectionRecord>,
}

impl From<&Catalogue> for CatalogueRecord {
    fn from(catalogue: &Catalogue) -> Self {
        let risk_sections = catalogue
            .risk_sections
            .iter()
            .map(|section| RiskSectionRecord {
                category: section.category().to_string(),
                risks: section
                    .items()
                    .iter()
                    .map(|item| RiskItemRecord {
                        risk_id: item.id.clone(),
                        title: item.title.clone(),
                        content: item.body.clone(),
                        url: item.url.clone(),
                    })
                    .collect(),
            })
            .collect();

        let mitigation_sections = catalogue
            .mitigation_sections
            .iter()
            .map(|section| MitigationSectionRecord {
                category: section.category().to_string(),
                mitigations: section
                    .items()
                    .iter()
                    .map(|item| MitigationItemRecord {
                        mitigation_id: item.id.clone(),
                        title: item.title.clone(),
                        content: item.body.clone(),
                        url: item.url.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            domain: catalogue.domain,
            risk_sections,
            mitigation_sections,
        }
    }
}
