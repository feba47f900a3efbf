//! Case-insensitive substring filtering over the flattened catalog.
use crate::catalog::{CatalogIndex, Product};

/// Outcome of applying a search query.
///
/// An empty or whitespace-only query means "no active filter" and the
/// caller falls back to normal catalog navigation — distinct from an
/// active query that happened to match nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFilter<'a> {
    Inactive,
    Active {
        /// The normalized (trimmed, lowercased) query.
        query: String,
        /// Matches in catalog flattening order; no ranking.
        hits: Vec<&'a Product>,
    },
}

impl SearchFilter<'_> {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Matched products, or an empty slice while inactive.
    #[must_use]
    pub fn hits(&self) -> &[&Product] {
        match self {
            Self::Inactive => &[],
            Self::Active { hits, .. } => hits,
        }
    }
}

/// Filter products whose name or description contains the query as a
/// case-insensitive substring. Hits keep the index's flattening order.
#[must_use]
pub fn search<'a>(query: &str, index: &'a CatalogIndex) -> SearchFilter<'a> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return SearchFilter::Inactive;
    }
    let hits = index
        .products()
        .filter(|product| {
            product.name.to_lowercase().contains(&needle)
                || product
                    .description
                    .as_deref()
                    .is_some_and(|description| description.to_lowercase().contains(&needle))
        })
        .collect();
    SearchFilter::Active { query: needle, hits }
}
