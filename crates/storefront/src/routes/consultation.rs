//! Skin consultation booking routes.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use glowella_core::types::BookingId;

use crate::api::types::{BookingRequest, ConsultationSlot};
use crate::error::{AppError, Result};
use crate::routes::Envelope;
use crate::routes::newsletter::is_valid_email;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    /// ISO date, e.g. `2026-09-01`.
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct SlotsBody {
    pub slots: Vec<ConsultationSlot>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingBody {
    pub booking_id: BookingId,
}

/// GET /consultation/slots?date=YYYY-MM-DD
#[instrument(skip(state))]
pub async fn slots(
    State(state): State<AppState>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Envelope<SlotsBody>>> {
    let slots = state.commerce().consultation_slots(query.date).await?;
    Ok(Envelope::ok(SlotsBody { slots }))
}

fn validate_booking(request: &BookingRequest) -> Result<()> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }
    if !is_valid_email(&request.email) {
        return Err(AppError::Validation(
            "a valid email address is required".to_string(),
        ));
    }
    if request.phone.trim().is_empty() {
        return Err(AppError::Validation("phone is required".to_string()));
    }
    if !is_valid_slot_time(&request.time) {
        return Err(AppError::Validation(
            "time must be in HH:MM form".to_string(),
        ));
    }
    Ok(())
}

/// Slot times come back from the slots endpoint as "HH:MM"; the booking must
/// echo one of them.
fn is_valid_slot_time(time: &str) -> bool {
    let Some((hours, minutes)) = time.split_once(':') else {
        return false;
    };
    let valid_hours = hours.len() == 2 && hours.parse::<u8>().is_ok_and(|h| h < 24);
    let valid_minutes = minutes.len() == 2 && minutes.parse::<u8>().is_ok_and(|m| m < 60);
    valid_hours && valid_minutes
}

/// POST /consultation/book
#[instrument(skip(state, request), fields(date = %request.date, time = %request.time))]
pub async fn book(
    State(state): State<AppState>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<Envelope<BookingBody>>> {
    validate_booking(&request)?;

    let booking_id = state.commerce().book_consultation(&request).await?;
    info!(%booking_id, "consultation booked");

    Ok(Envelope::ok(BookingBody { booking_id }))
}
