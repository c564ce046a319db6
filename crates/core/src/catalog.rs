//! Product catalog types and the concern/search/category filters.
//!
//! Filtering happens entirely over the in-memory product list fetched from
//! the Commerce API; nothing here performs I/O.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{Naira, ProductId, SkinConcern};

/// A catalog product as delivered by the Commerce API.
///
/// The client holds a read-only copy; all mutation happens through the admin
/// service's CRUD endpoints and lands server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub price: Naira,
    /// Pre-discount strike-through price, when the product is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slashed_price: Option<Naira>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub available_qty: u32,
}

impl Product {
    /// The concatenated text fields used by concern and search matching.
    #[must_use]
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.description, self.category).to_lowercase()
    }
}

/// Word-boundary regexes per concern, compiled once from the static keyword
/// table.
static CONCERN_PATTERNS: LazyLock<HashMap<SkinConcern, Vec<Regex>>> = LazyLock::new(|| {
    SkinConcern::ALL
        .into_iter()
        .map(|concern| {
            let patterns = concern
                .keywords()
                .iter()
                .filter_map(|keyword| {
                    let pattern = format!(r"(?i)\b{}\b", regex::escape(keyword));
                    match Regex::new(&pattern) {
                        Ok(re) => Some(re),
                        Err(e) => {
                            // Static table; a failure here is a programming error.
                            tracing::warn!(keyword, error = %e, "invalid concern keyword pattern");
                            None
                        }
                    }
                })
                .collect();
            (concern, patterns)
        })
        .collect()
});

/// Does the product address at least one of the selected concerns?
///
/// Matching is a logical OR across concerns and across each concern's
/// keywords: the first keyword found anywhere in the product's concatenated
/// name/description/category text wins. An empty selection matches nothing.
#[must_use]
pub fn matches_concerns(product: &Product, concerns: &[SkinConcern]) -> bool {
    if concerns.is_empty() {
        return false;
    }
    let text = product.search_text();
    concerns.iter().any(|concern| {
        CONCERN_PATTERNS
            .get(concern)
            .is_some_and(|patterns| patterns.iter().any(|re| re.is_match(&text)))
    })
}

/// Does the product match a free-text search query?
///
/// The query splits into whitespace-separated words; every word must appear
/// as a case-insensitive substring somewhere in the product's text (logical
/// AND). A query with no words matches everything.
#[must_use]
pub fn matches_search(product: &Product, query: &str) -> bool {
    let text = product.search_text();
    query
        .split_whitespace()
        .all(|word| text.contains(&word.to_lowercase()))
}

/// Filter a product list by category. `"all"` (any case) passes everything.
#[must_use]
pub fn filter_by_category(products: &[Product], category: &str) -> Vec<Product> {
    if category.eq_ignore_ascii_case("all") {
        return products.to_vec();
    }
    products
        .iter()
        .filter(|p| p.category.eq_ignore_ascii_case(category))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, description: &str, category: &str) -> Product {
        Product {
            id: ProductId::new("p1"),
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            price: Naira::from(5000),
            slashed_price: None,
            images: vec![],
            available_qty: 10,
        }
    }

    #[test]
    fn test_hyaluronic_acid_matches_dry_skin() {
        let serum = product(
            "Dewy Serum",
            "A lightweight serum with hyaluronic acid for all-day moisture.",
            "serums",
        );
        assert!(matches_concerns(&serum, &[SkinConcern::DrySkin]));
    }

    #[test]
    fn test_unrelated_product_excluded() {
        let gloss = product("Lip Gloss", "High-shine tinted lip gloss.", "lips");
        assert!(!matches_concerns(
            &gloss,
            &[SkinConcern::DrySkin, SkinConcern::Acne, SkinConcern::Aging]
        ));
    }

    #[test]
    fn test_empty_selection_matches_nothing() {
        let serum = product("Dewy Serum", "hyaluronic acid", "serums");
        assert!(!matches_concerns(&serum, &[]));
    }

    #[test]
    fn test_or_across_concerns() {
        let toner = product("Clear Toner", "salicylic acid toner for breakouts", "toners");
        // Dry skin doesn't match, but acne does; OR semantics keep it.
        assert!(matches_concerns(
            &toner,
            &[SkinConcern::DrySkin, SkinConcern::Acne]
        ));
    }

    #[test]
    fn test_word_boundary_matching() {
        // "clay" should not match inside "eclair"
        let pastry = product("Eclair Blush", "eclairs are not skincare", "cheeks");
        assert!(!matches_concerns(&pastry, &[SkinConcern::OilySkin]));

        let mask = product("Clay Mask", "kaolin clay mask", "masks");
        assert!(matches_concerns(&mask, &[SkinConcern::OilySkin]));
    }

    #[test]
    fn test_concern_match_is_case_insensitive() {
        let serum = product("Glow Serum", "With HYALURONIC ACID.", "serums");
        assert!(matches_concerns(&serum, &[SkinConcern::DrySkin]));
    }

    #[test]
    fn test_search_requires_every_word() {
        let serum = product("Vitamin C Serum", "brightening serum", "serums");
        assert!(matches_search(&serum, "vitamin serum"));
        assert!(!matches_search(&serum, "vitamin retinol"));
    }

    #[test]
    fn test_search_is_substring_based() {
        let serum = product("Vitamins Daily", "multi serum", "serums");
        // "vitamin" appears as a substring of "Vitamins"
        assert!(matches_search(&serum, "vitamin serum"));
    }

    #[test]
    fn test_empty_query_matches_all() {
        let serum = product("Vitamin C Serum", "", "serums");
        assert!(matches_search(&serum, ""));
        assert!(matches_search(&serum, "   "));
    }

    #[test]
    fn test_filter_by_category() {
        let products = vec![
            product("Serum", "", "serums"),
            product("Mask", "", "masks"),
        ];
        assert_eq!(filter_by_category(&products, "serums").len(), 1);
        assert_eq!(filter_by_category(&products, "SERUMS").len(), 1);
        assert_eq!(filter_by_category(&products, "all").len(), 2);
        assert_eq!(filter_by_category(&products, "lips").len(), 0);
    }
}
