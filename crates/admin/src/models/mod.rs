//! Session-backed models for the admin back-office.

use serde::{Deserialize, Serialize};

/// The authenticated admin stored in the session after login.
///
/// The token is the upstream Bearer token from the Commerce API login
/// endpoint; every admin API call replays it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub email: String,
    pub token: String,
}

/// Session keys for admin state.
pub mod session_keys {
    /// The logged-in admin ([`super::CurrentAdmin`]).
    pub const CURRENT_ADMIN: &str = "current_admin";
}
