use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use serde::Serialize;
use tracing::info;

use dropway_domain::{Booking, BookingRequest};

use crate::error::ApiError;
use crate::state::AppState;

const CONFIRMATION_MESSAGE: &str = "Booking received. Our team will contact you shortly.";

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub success: bool,
    pub user: Booking,
    pub message: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/bookings", post(create_booking))
}

async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<BookingRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    // Validation failures persist nothing and notify nobody.
    let booking = req.into_booking()?;

    let saved = state.store.save(booking).await?;

    // Best effort: awaited so the channels settle before we respond, but
    // the outcome never changes the response.
    state.dispatcher.dispatch(&saved).await;

    info!(booking_id = %saved.id, mobile = saved.mobile, "booking created");

    Ok(Json(BookingResponse {
        success: true,
        user: saved,
        message: CONFIRMATION_MESSAGE.to_string(),
    }))
}
