//! Inventory ledger model: one row per (hotel, room type, calendar day)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::dates::{deserialize_day, deserialize_opt_day};

/// Ledger row. Invariant: `0 <= reserved_rooms <= total_rooms`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct InventoryDay {
    pub id: i32,
    pub hotel_id: i32,
    pub room_type_id: i32,
    pub day: NaiveDate,
    pub total_rooms: i32,
    pub reserved_rooms: i32,
}

impl InventoryDay {
    /// Rooms still free on this day
    pub fn available(&self) -> i32 {
        self.total_rooms - self.reserved_rooms
    }
}

/// Number of nights in `[check_in, check_out)`; the departure day is not a night.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Every night of `[start, end)`, in order
pub fn stay_nights(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let nights = nights_between(start, end).max(0) as usize;
    start.iter_days().take(nights)
}

/// Select the ledger rows standing for the nights of `[start, end)`.
///
/// `rows` is the inclusive range `[start, end]` ordered by day. The first
/// `nights` rows are taken and must be exactly the consecutive nights of the
/// stay; `None` means at least one night has no inventory configured.
pub fn covering_nights(rows: &[InventoryDay], start: NaiveDate, end: NaiveDate) -> Option<&[InventoryDay]> {
    let nights = nights_between(start, end);
    if nights <= 0 || (rows.len() as i64) < nights {
        return None;
    }

    let covered = &rows[..nights as usize];
    let contiguous = covered
        .iter()
        .zip(stay_nights(start, end))
        .all(|(row, night)| row.day == night);

    contiguous.then_some(covered)
}

/// True when every night has at least `rooms` rooms free
pub fn has_headroom(nights: &[InventoryDay], rooms: i32) -> bool {
    nights.iter().all(|row| row.available() >= rooms)
}

/// Ledger row as shown to the dashboard
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    pub id: i32,
    pub hotel_id: i32,
    pub room_type_id: i32,
    #[serde(rename = "fecha")]
    pub day: NaiveDate,
    #[serde(rename = "cantidadTotal")]
    pub total_rooms: i32,
    #[serde(rename = "cantidadReservada")]
    pub reserved_rooms: i32,
    #[serde(rename = "cantidadDisponible")]
    pub available_rooms: i32,
    #[sqlx(default)]
    #[serde(rename = "hotelNombre", skip_serializing_if = "Option::is_none")]
    pub hotel_name: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type_name: Option<String>,
}

impl From<InventoryDay> for InventoryView {
    fn from(row: InventoryDay) -> Self {
        Self {
            available_rooms: row.available(),
            id: row.id,
            hotel_id: row.hotel_id,
            room_type_id: row.room_type_id,
            day: row.day,
            total_rooms: row.total_rooms,
            reserved_rooms: row.reserved_rooms,
            hotel_name: None,
            room_type_name: None,
        }
    }
}

/// Provision a single ledger day
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryDay {
    pub hotel_id: i32,
    pub room_type_id: i32,
    #[serde(rename = "fecha", deserialize_with = "deserialize_day")]
    #[schema(value_type = String, example = "2025-06-01")]
    pub day: NaiveDate,
    #[serde(rename = "cantidadTotal")]
    pub total_rooms: i32,
}

/// Provision every night of `[start_date, end_date)`
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreateInventory {
    pub hotel_id: i32,
    pub room_type_id: i32,
    #[serde(rename = "fechaInicio", deserialize_with = "deserialize_day")]
    #[schema(value_type = String, example = "2025-06-01")]
    pub start_date: NaiveDate,
    #[serde(rename = "fechaFin", deserialize_with = "deserialize_day")]
    #[schema(value_type = String, example = "2025-06-04")]
    pub end_date: NaiveDate,
    #[serde(rename = "cantidadTotal")]
    pub total_rooms: i32,
}

/// Manual overwrite of a ledger row's counts
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateInventoryCounts {
    #[serde(rename = "cantidadTotal")]
    pub total_rooms: i32,
    #[serde(rename = "cantidadReservada")]
    pub reserved_rooms: i32,
}

/// Availability query over a stay
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckAvailability {
    pub hotel_id: i32,
    pub room_type_id: i32,
    #[serde(rename = "fechaInicio", deserialize_with = "deserialize_day")]
    #[schema(value_type = String, example = "2025-06-01")]
    pub start_date: NaiveDate,
    #[serde(rename = "fechaFin", deserialize_with = "deserialize_day")]
    #[schema(value_type = String, example = "2025-06-04")]
    pub end_date: NaiveDate,
    #[serde(rename = "cantidadHabitaciones")]
    pub rooms: i32,
}

/// Availability answer
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResult {
    pub available: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_details: Option<Vec<InventoryView>>,
}

/// Date window for ledger listings
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryRangeQuery {
    #[serde(rename = "fechaInicio", default, deserialize_with = "deserialize_opt_day")]
    #[param(value_type = Option<String>)]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "fechaFin", default, deserialize_with = "deserialize_opt_day")]
    #[param(value_type = Option<String>)]
    pub end_date: Option<NaiveDate>,
}
