//! Newsletter subscribe/unsubscribe routes.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::api::ApiError;
use crate::error::{AppError, Result};
use crate::routes::Envelope;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

#[derive(Debug, serde::Serialize)]
pub struct NewsletterBody {}

/// Structural email check, enough to catch typos before the network call.
/// The Commerce API remains the authority on deliverability.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || email.contains(char::is_whitespace) {
        return false;
    }
    // The domain needs at least one dot with text on both sides.
    domain
        .split_once('.')
        .is_some_and(|(head, tail)| !head.is_empty() && !tail.is_empty())
}

/// POST /newsletter/subscribe
///
/// An "already subscribed" rejection from the upstream is reported as
/// success; re-submitting the footer form should never show an error.
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<EmailRequest>,
) -> Result<Json<Envelope<NewsletterBody>>> {
    let email = request.email.trim();
    if !is_valid_email(email) {
        return Err(AppError::Validation(
            "a valid email address is required".to_string(),
        ));
    }

    match state.commerce().subscribe_newsletter(email).await {
        Ok(()) => {}
        Err(ApiError::Api { code: 409, .. }) => {
            info!("email already subscribed");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Envelope::ok(NewsletterBody {}))
}

/// POST /newsletter/unsubscribe
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(request): Json<EmailRequest>,
) -> Result<Json<Envelope<NewsletterBody>>> {
    let email = request.email.trim();
    if !is_valid_email(email) {
        return Err(AppError::Validation(
            "a valid email address is required".to_string(),
        ));
    }

    state.commerce().unsubscribe_newsletter(email).await?;
    Ok(Envelope::ok(NewsletterBody {}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b+tag@mail.example.co"));
        assert!(is_valid_email("  ada@example.com  "));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("ada"));
        assert!(!is_valid_email("ada@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada@.com"));
        assert!(!is_valid_email("ada@example."));
        assert!(!is_valid_email("ada obi@example.com"));
    }
}
