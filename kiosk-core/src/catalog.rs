//! Catalog schema, tolerant loading, and the flattened product index.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;
use thiserror::Error;

/// Image list capacity stored inline without additional allocations.
/// Most products carry a primary shot plus at most a few detail views.
pub type ImageList = SmallVec<[String; 4]>;

/// A single sellable item from the catalog feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable identifier for the session. The feed emits both strings
    /// and bare numbers; numbers normalize to their decimal string form.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    /// Price in minor currency units to avoid floating-point issues
    pub price: u64,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
    #[serde(rename = "detailImages", default)]
    pub detail_images: ImageList,
    #[serde(default)]
    pub description: Option<String>,
}

/// A named group of products within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub name: String,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// A top-level catalog section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

/// The full category tree as delivered by the data source.
///
/// The feed is a JSON array of categories; any collection at any level
/// may be absent or empty and is treated as zero children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

impl Catalog {
    /// Create an empty catalog (useful for tests)
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    /// Parse a catalog feed from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a category tree.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Failure of a single catalog load attempt.
///
/// The load is never retried automatically; the surrounding shell must
/// trigger a fresh attempt explicitly.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog fetch failed: {0}")]
    Fetch(#[source] anyhow::Error),
    #[error("catalog parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Flat identifier -> product lookup derived from the tree.
///
/// Iteration order follows the tree walk (category, then subcategory,
/// then product order), which also fixes search result order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogIndex {
    products: Vec<Product>,
    by_id: HashMap<String, usize>,
    category_names: Vec<String>,
}

/// Result of flattening a catalog tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Indexed {
    pub index: CatalogIndex,
    /// Identifiers that appeared more than once in the source tree.
    /// The first occurrence is kept; every later collision lands here.
    pub duplicates: Vec<String>,
}

impl CatalogIndex {
    /// Flatten a catalog tree into an index. Pure derivation: the tree
    /// itself stays untouched for navigation rendering.
    #[must_use]
    pub fn build(catalog: &Catalog) -> Indexed {
        let mut index = Self::default();
        let mut duplicates = Vec::new();
        for category in &catalog.categories {
            index.category_names.push(category.name.clone());
            for subcategory in &category.subcategories {
                for product in &subcategory.products {
                    if index.by_id.contains_key(&product.id) {
                        duplicates.push(product.id.clone());
                        continue;
                    }
                    index.by_id.insert(product.id.clone(), index.products.len());
                    index.products.push(product.clone());
                }
            }
        }
        Indexed { index, duplicates }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.by_id.get(id).map(|&pos| &self.products[pos])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// All products in flattening order.
    pub fn products(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    #[must_use]
    pub fn has_category(&self, name: &str) -> bool {
        self.category_names.iter().any(|n| n == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
