//! Admin services.

pub mod notifications;
