//! Booking route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use staybook_core::BookingId;

use crate::coordinator::{BookingForm, BookingQuote, FormMode};
use crate::error::Result;
use crate::state::AppState;
use crate::stay::Booking;

use super::rooms::PaginationQuery;

/// `GET /bookings` - one page of bookings, newest first.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<Vec<Booking>>> {
    let bookings = state.bookings().list(query.page.unwrap_or(1)).await?;
    Ok(Json(bookings))
}

/// `GET /bookings/{id}` - booking detail.
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Booking>> {
    let booking = state.bookings().get(BookingId::new(id)).await?;
    Ok(Json(booking))
}

/// `POST /bookings` - create a booking from a validated form.
pub async fn create(
    State(state): State<AppState>,
    Json(mut form): Json<BookingForm>,
) -> Result<(StatusCode, Json<Booking>)> {
    form.mode = FormMode::Add;
    form.id = None;
    let booking = state.bookings().submit(&form).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// `PUT /bookings/{id}` - update a booking from a validated form.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut form): Json<BookingForm>,
) -> Result<Json<Booking>> {
    form.mode = FormMode::Edit;
    form.id = Some(BookingId::new(id));
    let booking = state.bookings().submit(&form).await?;
    Ok(Json(booking))
}

/// `DELETE /bookings/{id}` - delete a booking.
pub async fn destroy(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    state.bookings().delete(BookingId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /bookings/quote` - price quote for a draft booking.
///
/// Responds with `null` when the draft is not complete enough to price
/// (missing dates, unfilled room id, or an inverted date range).
pub async fn quote(
    State(state): State<AppState>,
    Json(form): Json<BookingForm>,
) -> Result<Json<Option<BookingQuote>>> {
    let quote = state.bookings().quote(&form).await?;
    Ok(Json(quote))
}
