//! Inventory ledger API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::inventory::{
        AvailabilityResult, BulkCreateInventory, CheckAvailability, CreateInventoryDay,
        InventoryRangeQuery, InventoryView, UpdateInventoryCounts,
    },
};

/// List every ledger row
#[utoipa::path(
    get,
    path = "/inventory",
    tag = "inventory",
    responses(
        (status = 200, description = "Ledger rows", body = Vec<InventoryView>)
    )
)]
pub async fn list_inventory(State(state): State<crate::AppState>) -> AppResult<Json<Vec<InventoryView>>> {
    let rows = state.services.inventory.list().await?;
    Ok(Json(rows))
}

/// Get ledger row by ID
#[utoipa::path(
    get,
    path = "/inventory/{id}",
    tag = "inventory",
    params(("id" = i32, Path, description = "Inventory ID")),
    responses(
        (status = 200, description = "Ledger row", body = InventoryView),
        (status = 404, description = "Inventory not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_inventory(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<InventoryView>> {
    let row = state.services.inventory.get_by_id(id).await?;
    Ok(Json(row))
}

/// Ledger rows of a room type between two dates (both inclusive)
#[utoipa::path(
    get,
    path = "/inventory/hotel/{hotel_id}/roomtype/{room_type_id}",
    tag = "inventory",
    params(
        ("hotel_id" = i32, Path, description = "Hotel ID"),
        ("room_type_id" = i32, Path, description = "Room type ID"),
        InventoryRangeQuery
    ),
    responses(
        (status = 200, description = "Ledger rows in the window", body = Vec<InventoryView>),
        (status = 400, description = "Missing or inverted dates", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_inventory_range(
    State(state): State<crate::AppState>,
    Path((hotel_id, room_type_id)): Path<(i32, i32)>,
    Query(query): Query<InventoryRangeQuery>,
) -> AppResult<Json<Vec<InventoryView>>> {
    let rows = state
        .services
        .inventory
        .range(hotel_id, room_type_id, query.start_date, query.end_date)
        .await?;
    Ok(Json(rows))
}

/// Check availability of a room type over a stay
#[utoipa::path(
    post,
    path = "/inventory/check-availability",
    tag = "inventory",
    request_body = CheckAvailability,
    responses(
        (status = 200, description = "Availability answer", body = AvailabilityResult),
        (status = 400, description = "Invalid dates or room count", body = crate::error::ErrorResponse)
    )
)]
pub async fn check_availability(
    State(state): State<crate::AppState>,
    Json(query): Json<CheckAvailability>,
) -> AppResult<Json<AvailabilityResult>> {
    let result = state.services.inventory.check_availability(&query).await?;
    Ok(Json(result))
}

/// Provision a single ledger day
#[utoipa::path(
    post,
    path = "/inventory",
    tag = "inventory",
    request_body = CreateInventoryDay,
    responses(
        (status = 201, description = "Ledger row created", body = InventoryView),
        (status = 404, description = "Hotel or room type not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Inventory already exists for that day", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_inventory(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateInventoryDay>,
) -> AppResult<(StatusCode, Json<InventoryView>)> {
    let row = state.services.inventory.create_single_day(&data).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Provision every night of a date range, skipping days that already exist
#[utoipa::path(
    post,
    path = "/inventory/bulk",
    tag = "inventory",
    request_body = BulkCreateInventory,
    responses(
        (status = 200, description = "Rows created by this call", body = Vec<InventoryView>),
        (status = 400, description = "Invalid range or total", body = crate::error::ErrorResponse)
    )
)]
pub async fn bulk_create_inventory(
    State(state): State<crate::AppState>,
    Json(data): Json<BulkCreateInventory>,
) -> AppResult<Json<Vec<InventoryView>>> {
    let rows = state.services.inventory.bulk_create_range(&data).await?;
    Ok(Json(rows))
}

/// Overwrite the counts of a ledger row
#[utoipa::path(
    put,
    path = "/inventory/{id}",
    tag = "inventory",
    params(("id" = i32, Path, description = "Inventory ID")),
    request_body = UpdateInventoryCounts,
    responses(
        (status = 200, description = "Ledger row updated", body = InventoryView),
        (status = 404, description = "Inventory not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Reserved exceeds total", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_inventory(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateInventoryCounts>,
) -> AppResult<Json<InventoryView>> {
    let row = state.services.inventory.update_counts(id, &data).await?;
    Ok(Json(row))
}
