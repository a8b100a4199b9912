//! Hotel API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::hotel::{Hotel, HotelInput, HotelPageQuery},
    services::hotels::HotelPage,
};

/// List all hotels with their room types
#[utoipa::path(
    get,
    path = "/hotels",
    tag = "hotels",
    responses(
        (status = 200, description = "Hotel list", body = Vec<Hotel>)
    )
)]
pub async fn list_hotels(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Hotel>>> {
    let hotels = state.services.hotels.list().await?;
    Ok(Json(hotels))
}

/// Search hotels by name or address, one page at a time
#[utoipa::path(
    get,
    path = "/hotels/paged",
    tag = "hotels",
    params(HotelPageQuery),
    responses(
        (status = 200, description = "Page of hotels", body = HotelPage),
        (status = 400, description = "Invalid paging", body = crate::error::ErrorResponse)
    )
)]
pub async fn page_hotels(
    State(state): State<crate::AppState>,
    Query(query): Query<HotelPageQuery>,
) -> AppResult<Json<HotelPage>> {
    let page = state.services.hotels.page(&query).await?;
    Ok(Json(page))
}

/// List active hotels
#[utoipa::path(
    get,
    path = "/hotels/active",
    tag = "hotels",
    responses(
        (status = 200, description = "Active hotels", body = Vec<Hotel>)
    )
)]
pub async fn list_active_hotels(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Hotel>>> {
    let hotels = state.services.hotels.list_active().await?;
    Ok(Json(hotels))
}

/// Get hotel by ID
#[utoipa::path(
    get,
    path = "/hotels/{id}",
    tag = "hotels",
    params(("id" = i32, Path, description = "Hotel ID")),
    responses(
        (status = 200, description = "Hotel details", body = Hotel),
        (status = 404, description = "Hotel not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_hotel(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Hotel>> {
    let hotel = state.services.hotels.get_by_id(id).await?;
    Ok(Json(hotel))
}

/// Create hotel
#[utoipa::path(
    post,
    path = "/hotels",
    tag = "hotels",
    request_body = HotelInput,
    responses(
        (status = 201, description = "Hotel created", body = Hotel),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_hotel(
    State(state): State<crate::AppState>,
    Json(data): Json<HotelInput>,
) -> AppResult<(StatusCode, Json<Hotel>)> {
    let hotel = state.services.hotels.create(&data).await?;
    Ok((StatusCode::CREATED, Json(hotel)))
}

/// Update hotel
#[utoipa::path(
    put,
    path = "/hotels/{id}",
    tag = "hotels",
    params(("id" = i32, Path, description = "Hotel ID")),
    request_body = HotelInput,
    responses(
        (status = 200, description = "Hotel updated", body = Hotel),
        (status = 404, description = "Hotel not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_hotel(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<HotelInput>,
) -> AppResult<Json<Hotel>> {
    let hotel = state.services.hotels.update(id, &data).await?;
    Ok(Json(hotel))
}

/// Delete hotel
#[utoipa::path(
    delete,
    path = "/hotels/{id}",
    tag = "hotels",
    params(("id" = i32, Path, description = "Hotel ID")),
    responses(
        (status = 204, description = "Hotel deleted"),
        (status = 404, description = "Hotel not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Hotel still has inventory or reservations", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_hotel(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.hotels.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
