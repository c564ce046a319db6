//! Commerce API envelope decoding through the storefront client's decoder.

use glowella_storefront::api::types::{DeliveryFeePayload, ProductsPayload, SalesPayload};
use glowella_storefront::api::{ApiError, decode_envelope};

use glowella_core::bestsellers::top_sellers;
use glowella_core::types::{Naira, ProductId};
use glowella_integration_tests::fixtures::date;

#[test]
fn code_200_is_the_sole_success_signal() {
    let ok = r#"{"code":200,"message":"success","fee":1500}"#;
    let payload: DeliveryFeePayload = decode_envelope(ok).expect("decodes");
    assert_eq!(payload.fee, Naira::from(1500));

    // Same body shape, failing code: the payload is never touched.
    let failed = r#"{"code":422,"message":"no delivery to that lga","fee":1500}"#;
    let err = decode_envelope::<DeliveryFeePayload>(failed).expect_err("must fail");
    match err {
        ApiError::Api { code, message } => {
            assert_eq!(code, 422);
            assert_eq!(message, "no delivery to that lga");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn undecodable_body_is_a_parse_error() {
    let err = decode_envelope::<DeliveryFeePayload>("<html>gateway timeout</html>")
        .expect_err("must fail");
    assert!(matches!(err, ApiError::Parse(_)));
}

#[test]
fn product_payload_decodes_camel_case_fields() {
    let body = r#"{
        "code": 200,
        "message": "success",
        "products": [{
            "id": "p1",
            "name": "Glow Serum",
            "category": "serums",
            "price": 5000,
            "slashedPrice": 6500,
            "images": ["https://cdn.glowella.shop/p1.jpg"],
            "availableQty": 12
        }]
    }"#;
    let payload: ProductsPayload = decode_envelope(body).expect("decodes");
    let product = payload.products.first().expect("one product");
    assert_eq!(product.id, ProductId::new("p1"));
    assert_eq!(product.slashed_price, Some(Naira::from(6500)));
    assert_eq!(product.description, ""); // optional upstream
}

#[test]
fn sales_payload_feeds_the_aggregator_end_to_end() {
    let body = r#"{
        "code": 200,
        "message": "success",
        "salesRecords": [
            {"day": "2026-08-18", "productsSold": "[{\"productId\":\"p1\",\"orderedQuantity\":3}]"},
            {"day": "2026-08-19", "productsSold": "[{\"productId\":\"p1\",\"orderedQuantity\":5}]"},
            {"day": "2026-08-19", "productsSold": "oops not json"}
        ]
    }"#;
    let payload: SalesPayload = decode_envelope(body).expect("decodes");
    assert_eq!(payload.sales_records.len(), 3);

    let products = vec![glowella_integration_tests::fixtures::product(
        "p1",
        "Glow Serum",
        "serums",
        5000,
    )];
    let ranked = top_sellers(
        &payload.sales_records,
        &products,
        30,
        8,
        date(2026, 8, 20),
    );
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].quantity_sold, 8);
}
