//! Checkout quoting across the cart, pricing, and service layers.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use glowella_core::cart::{Cart, CartLine};
use glowella_core::pricing::DiscountScope;
use glowella_core::types::{Naira, ProductId};
use glowella_integration_tests::fixtures::{date, rule_2026};
use glowella_storefront::services::checkout::quote;

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0)
        .single()
        .expect("valid time")
}

fn cart() -> Cart {
    let mut cart = Cart::empty();
    cart.add(CartLine {
        product_id: ProductId::new("P1"),
        name: "Glow Serum".to_string(),
        price: Naira::from(5000),
        quantity: 2,
        image: None,
    });
    cart.add(CartLine {
        product_id: ProductId::new("P2"),
        name: "Clay Mask".to_string(),
        price: Naira::from(3500),
        quantity: 1,
        image: None,
    });
    cart
}

#[test]
fn quote_without_rules_passes_fee_through() {
    let q = quote(&cart(), Naira::from(2000), &[], false, now());
    assert_eq!(q.subtotal, Naira::from(13_500));
    assert_eq!(q.delivery_fee, Naira::from(2000));
    assert!(q.delivery_discount.is_none());
    assert_eq!(q.total, Naira::from(15_500));
}

#[test]
fn delivery_discount_reduces_the_fee_only() {
    let rules = vec![rule_2026("d1", DiscountScope::Delivery, 50)];
    let q = quote(&cart(), Naira::from(2000), &rules, false, now());

    let discount = q.delivery_discount.expect("applies");
    assert_eq!(discount.discounted_amount, Naira::from(1000));
    assert_eq!(discount.savings, Naira::from(1000));
    // Subtotal untouched; only the fee shrinks.
    assert_eq!(q.subtotal, Naira::from(13_500));
    assert_eq!(q.total, Naira::from(14_500));
}

#[test]
fn first_time_only_rule_gates_on_customer_standing() {
    let mut rule = rule_2026("d1", DiscountScope::Delivery, 100);
    rule.first_time_only = true;
    let rules = vec![rule];

    let returning = quote(&cart(), Naira::from(2000), &rules, false, now());
    assert!(returning.delivery_discount.is_none());
    assert_eq!(returning.total, Naira::from(15_500));

    let first_timer = quote(&cart(), Naira::from(2000), &rules, true, now());
    assert_eq!(
        first_timer
            .delivery_discount
            .expect("applies")
            .discounted_amount,
        Naira::ZERO
    );
    assert_eq!(first_timer.total, Naira::from(13_500));
}

#[test]
fn expired_rules_are_passed_over_for_the_next_applicable() {
    let mut expired = rule_2026("d1", DiscountScope::Delivery, 90);
    expired.valid_to = date(2026, 2, 1);
    let rules = vec![expired, rule_2026("d2", DiscountScope::Delivery, 25)];

    let q = quote(&cart(), Naira::from(2000), &rules, false, now());
    let discount = q.delivery_discount.expect("second rule applies");
    assert_eq!(discount.percent, Decimal::from(25));
    assert_eq!(q.total, Naira::from(15_000));
}

#[test]
fn quote_serializes_in_camel_case() {
    let rules = vec![rule_2026("d1", DiscountScope::Delivery, 50)];
    let q = quote(&cart(), Naira::from(2000), &rules, false, now());

    let json = serde_json::to_value(&q).expect("serializes");
    assert!(json.get("deliveryFee").is_some());
    assert!(json.get("deliveryDiscount").is_some());
    assert!(json["deliveryDiscount"].get("discountedAmount").is_some());
}
