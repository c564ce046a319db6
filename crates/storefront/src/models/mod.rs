//! Session-backed models for the storefront.
//!
//! The browser session owns the cart and wishlist; both are plain serde
//! values stored under the keys below. Stock and pricing authority stay with
//! the Commerce API.

/// Session keys for storefront state.
pub mod session_keys {
    /// The session cart ([`glowella_core::cart::Cart`]).
    pub const CART: &str = "cart";
    /// The session wishlist (`Vec<ProductId>`).
    pub const WISHLIST: &str = "wishlist";
}
