//! Integration tests for Glowella.
//!
//! These tests exercise the crates together through their public APIs: the
//! pricing calculator feeding checkout quotes, the best-seller aggregation
//! over wire-shaped sale records, envelope decoding, and the optimistic
//! notification service against a stub backend. No network or external
//! services are required.
//!
//! Run with: `cargo test -p glowella-integration-tests`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod fixtures {
    //! Shared builders for wire-shaped test data.

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use glowella_core::bestsellers::{SaleRecord, SoldItem};
    use glowella_core::catalog::Product;
    use glowella_core::pricing::{DiscountRule, DiscountScope};
    use glowella_core::types::{DiscountId, Naira, ProductId};

    /// A product priced in whole naira.
    #[must_use]
    pub fn product(id: &str, name: &str, category: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: String::new(),
            category: category.to_string(),
            price: Naira::from(price),
            slashed_price: None,
            images: vec![],
            available_qty: 25,
        }
    }

    /// An active discount rule valid through calendar year 2026.
    #[must_use]
    pub fn rule_2026(id: &str, scope: DiscountScope, percent: i64) -> DiscountRule {
        DiscountRule {
            id: DiscountId::new(id),
            scope,
            category: None,
            percent: Decimal::from(percent),
            valid_from: date(2026, 1, 1),
            valid_to: date(2026, 12, 31),
            first_time_only: false,
            active: true,
        }
    }

    /// A per-day sale record with its items JSON-encoded, as the API sends.
    #[must_use]
    pub fn sale_record(day: NaiveDate, items: &[(&str, u32)]) -> SaleRecord {
        let sold: Vec<SoldItem> = items
            .iter()
            .map(|(id, qty)| SoldItem {
                product_id: ProductId::new(*id),
                ordered_quantity: *qty,
            })
            .collect();
        SaleRecord {
            day,
            products_sold: serde_json::to_string(&sold).expect("serialize sold items"),
        }
    }

    /// Shorthand for a calendar date.
    ///
    /// # Panics
    ///
    /// Panics on an invalid date; fixtures use literal dates.
    #[must_use]
    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }
}
