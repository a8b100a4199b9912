//! Reservation API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::reservation::{CreateReservation, ReservationDetails, ReservationResult, UpdateReservationStatus},
};

#[derive(Serialize, ToSchema)]
pub struct CancelResponse {
    pub message: String,
}

/// List reservations, newest first
#[utoipa::path(
    get,
    path = "/reservations",
    tag = "reservations",
    responses(
        (status = 200, description = "Reservation list", body = Vec<ReservationDetails>)
    )
)]
pub async fn list_reservations(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<ReservationDetails>>> {
    let reservations = state.services.reservations.list().await?;
    Ok(Json(reservations))
}

/// Get reservation by ID
#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = ReservationDetails),
        (status = 404, description = "Reservation not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_reservation(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ReservationDetails>> {
    let reservation = state.services.reservations.get_by_id(id).await?;
    Ok(Json(reservation))
}

/// List the reservations of a hotel
#[utoipa::path(
    get,
    path = "/reservations/hotel/{hotel_id}",
    tag = "reservations",
    params(("hotel_id" = i32, Path, description = "Hotel ID")),
    responses(
        (status = 200, description = "Reservations of the hotel", body = Vec<ReservationDetails>)
    )
)]
pub async fn list_hotel_reservations(
    State(state): State<crate::AppState>,
    Path(hotel_id): Path<i32>,
) -> AppResult<Json<Vec<ReservationDetails>>> {
    let reservations = state.services.reservations.list_by_hotel(hotel_id).await?;
    Ok(Json(reservations))
}

/// Book a stay.
///
/// Business-rule rejections come back as `success = false` with the reason.
#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    request_body = CreateReservation,
    responses(
        (status = 201, description = "Reservation booked", body = ReservationResult),
        (status = 400, description = "Booking rejected", body = ReservationResult)
    )
)]
pub async fn create_reservation(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateReservation>,
) -> AppResult<(StatusCode, Json<ReservationResult>)> {
    let outcome = state.services.reservations.create(&data).await?;
    let status = if outcome.is_booked() {
        StatusCode::CREATED
    } else {
        StatusCode::BAD_REQUEST
    };
    Ok((status, Json(ReservationResult::from(outcome))))
}

/// Overwrite the status of a reservation
#[utoipa::path(
    patch,
    path = "/reservations/{id}/status",
    tag = "reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = UpdateReservationStatus,
    responses(
        (status = 200, description = "Status updated", body = ReservationDetails),
        (status = 400, description = "Unknown status", body = crate::error::ErrorResponse),
        (status = 404, description = "Reservation not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_reservation_status(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateReservationStatus>,
) -> AppResult<Json<ReservationDetails>> {
    let reservation = state
        .services
        .reservations
        .update_status(id, &data.status)
        .await?;
    Ok(Json(reservation))
}

/// Cancel a reservation
#[utoipa::path(
    post,
    path = "/reservations/{id}/cancel",
    tag = "reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation cancelled", body = CancelResponse),
        (status = 404, description = "Reservation not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn cancel_reservation(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CancelResponse>> {
    if !state.services.reservations.cancel(id).await? {
        return Err(AppError::NotFound(format!("Reservation with id {} not found", id)));
    }
    Ok(Json(CancelResponse {
        message: "Reservation cancelled".to_string(),
    }))
}
