//! Admin login and logout.
//!
//! Login exchanges credentials for an upstream Bearer token and stores it in
//! the session. The session id is cycled on login to prevent fixation.

use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::{info, instrument};

use crate::api::types::LoginRequest;
use crate::error::{AppError, Result};
use crate::models::{CurrentAdmin, session_keys};
use crate::routes::Envelope;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LoginBody {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutBody {}

/// POST /auth/login
#[instrument(skip(state, session, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Envelope<LoginBody>>> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(AppError::Validation(
            "email and password are required".to_string(),
        ));
    }

    let payload = state.api().login(&request).await?;

    session.cycle_id().await?;
    session
        .insert(
            session_keys::CURRENT_ADMIN,
            &CurrentAdmin {
                email: payload.email.clone(),
                token: payload.token,
            },
        )
        .await?;
    info!(email = %payload.email, "admin logged in");

    Ok(Envelope::ok(LoginBody {
        email: payload.email,
    }))
}

/// POST /auth/logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<Envelope<LogoutBody>>> {
    session.flush().await?;
    Ok(Envelope::ok(LogoutBody {}))
}
