//! Room type API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::room_type::{AssignRoomTypes, AssignRoomTypesResult, CreateRoomType, RoomType, UpdateRoomType},
};

/// List all room types
#[utoipa::path(
    get,
    path = "/roomtypes",
    tag = "roomtypes",
    responses(
        (status = 200, description = "Room type list", body = Vec<RoomType>)
    )
)]
pub async fn list_room_types(State(state): State<crate::AppState>) -> AppResult<Json<Vec<RoomType>>> {
    let room_types = state.services.room_types.list().await?;
    Ok(Json(room_types))
}

/// Get room type by ID
#[utoipa::path(
    get,
    path = "/roomtypes/{id}",
    tag = "roomtypes",
    params(("id" = i32, Path, description = "Room type ID")),
    responses(
        (status = 200, description = "Room type details", body = RoomType),
        (status = 404, description = "Room type not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_room_type(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<RoomType>> {
    let room_type = state.services.room_types.get_by_id(id).await?;
    Ok(Json(room_type))
}

/// List the room types of a hotel
#[utoipa::path(
    get,
    path = "/roomtypes/hotel/{hotel_id}",
    tag = "roomtypes",
    params(("hotel_id" = i32, Path, description = "Hotel ID")),
    responses(
        (status = 200, description = "Room types of the hotel", body = Vec<RoomType>)
    )
)]
pub async fn list_hotel_room_types(
    State(state): State<crate::AppState>,
    Path(hotel_id): Path<i32>,
) -> AppResult<Json<Vec<RoomType>>> {
    let room_types = state.services.room_types.list_by_hotel(hotel_id).await?;
    Ok(Json(room_types))
}

/// Create room type
#[utoipa::path(
    post,
    path = "/roomtypes",
    tag = "roomtypes",
    request_body = CreateRoomType,
    responses(
        (status = 201, description = "Room type created", body = RoomType),
        (status = 404, description = "Hotel not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_room_type(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateRoomType>,
) -> AppResult<(StatusCode, Json<RoomType>)> {
    let room_type = state.services.room_types.create(&data).await?;
    Ok((StatusCode::CREATED, Json(room_type)))
}

/// Update room type
#[utoipa::path(
    put,
    path = "/roomtypes/{id}",
    tag = "roomtypes",
    params(("id" = i32, Path, description = "Room type ID")),
    request_body = UpdateRoomType,
    responses(
        (status = 200, description = "Room type updated", body = RoomType),
        (status = 404, description = "Room type not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_room_type(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateRoomType>,
) -> AppResult<Json<RoomType>> {
    let room_type = state.services.room_types.update(id, &data).await?;
    Ok(Json(room_type))
}

/// Delete room type
#[utoipa::path(
    delete,
    path = "/roomtypes/{id}",
    tag = "roomtypes",
    params(("id" = i32, Path, description = "Room type ID")),
    responses(
        (status = 204, description = "Room type deleted"),
        (status = 409, description = "Room type still referenced", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_room_type(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.room_types.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Move existing room types under a hotel
#[utoipa::path(
    post,
    path = "/roomtypes/assign-to-hotel",
    tag = "roomtypes",
    request_body = AssignRoomTypes,
    responses(
        (status = 200, description = "Room types reassigned", body = AssignRoomTypesResult),
        (status = 400, description = "Empty id list", body = crate::error::ErrorResponse),
        (status = 404, description = "Hotel or room types not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn assign_room_types(
    State(state): State<crate::AppState>,
    Json(data): Json<AssignRoomTypes>,
) -> AppResult<Json<AssignRoomTypesResult>> {
    let result = state.services.room_types.assign_to_hotel(&data).await?;
    Ok(Json(result))
}
