//! Best-seller aggregation over records shaped like the Commerce API's.

use glowella_core::bestsellers::{SaleRecord, top_sellers};
use glowella_core::types::ProductId;
use glowella_integration_tests::fixtures::{date, product, sale_record};

#[test]
fn trailing_window_sums_quantities_per_product() {
    let today = date(2026, 8, 20);
    let records = vec![
        sale_record(date(2026, 8, 18), &[("P1", 3), ("P2", 1)]),
        sale_record(date(2026, 8, 19), &[("P1", 5)]),
        sale_record(date(2026, 6, 1), &[("P1", 100)]), // outside 30 days
    ];
    let products = vec![
        product("P1", "Glow Serum", "serums", 5000),
        product("P2", "Clay Mask", "masks", 3500),
    ];

    let ranked = top_sellers(&records, &products, 30, 8, today);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].product.id, ProductId::new("P1"));
    assert_eq!(ranked[0].quantity_sold, 8);
    assert_eq!(ranked[1].quantity_sold, 1);
}

#[test]
fn limit_applies_after_ranking() {
    let today = date(2026, 8, 20);
    let records = vec![sale_record(
        date(2026, 8, 19),
        &[("P1", 2), ("P2", 9), ("P3", 5)],
    )];
    let products = vec![
        product("P1", "Glow Serum", "serums", 5000),
        product("P2", "Clay Mask", "masks", 3500),
        product("P3", "Lip Oil", "lips", 2500),
    ];

    let ranked = top_sellers(&records, &products, 30, 2, today);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].product.id, ProductId::new("P2"));
    assert_eq!(ranked[1].product.id, ProductId::new("P3"));
}

#[test]
fn malformed_products_sold_skips_only_that_record() {
    let today = date(2026, 8, 20);
    let records = vec![
        SaleRecord {
            day: date(2026, 8, 19),
            products_sold: "{broken".to_string(),
        },
        sale_record(date(2026, 8, 18), &[("P1", 4)]),
    ];
    let products = vec![product("P1", "Glow Serum", "serums", 5000)];

    let ranked = top_sellers(&records, &products, 30, 8, today);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].quantity_sold, 4);
}

#[test]
fn unknown_product_ids_are_dropped_from_results() {
    let today = date(2026, 8, 20);
    let records = vec![sale_record(date(2026, 8, 19), &[("P1", 2), ("DELETED", 50)])];
    let products = vec![product("P1", "Glow Serum", "serums", 5000)];

    let ranked = top_sellers(&records, &products, 30, 8, today);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].product.id, ProductId::new("P1"));
}

#[test]
fn best_seller_serializes_with_flattened_product() {
    let today = date(2026, 8, 20);
    let records = vec![sale_record(date(2026, 8, 19), &[("P1", 7)])];
    let products = vec![product("P1", "Glow Serum", "serums", 5000)];

    let ranked = top_sellers(&records, &products, 30, 8, today);
    let json = serde_json::to_value(&ranked[0]).expect("serializes");
    assert_eq!(json["id"], "P1");
    assert_eq!(json["quantitySold"], 7);
}
