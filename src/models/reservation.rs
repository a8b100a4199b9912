//! Reservation model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

use super::dates::deserialize_day;

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::Cancelled => "Cancelled",
            ReservationStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    /// Accepts the canonical names and the Spanish labels found in legacy rows.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "confirmed" | "confirmada" => Ok(ReservationStatus::Confirmed),
            "cancelled" | "canceled" | "cancelada" => Ok(ReservationStatus::Cancelled),
            "completed" | "completada" => Ok(ReservationStatus::Completed),
            _ => Err(format!("Invalid reservation status: {}", s)),
        }
    }
}

// SQLx conversion for ReservationStatus
impl sqlx::Type<Postgres> for ReservationStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for ReservationStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for ReservationStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

/// Reservation joined with hotel and room-type display names
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDetails {
    pub id: i32,
    pub hotel_id: i32,
    pub room_type_id: i32,
    #[serde(rename = "huespedNombre")]
    pub guest_name: String,
    /// First night of the stay
    #[serde(rename = "fechaEntrada")]
    pub check_in: NaiveDate,
    /// Departure day, not a night of the stay
    #[serde(rename = "fechaSalida")]
    pub check_out: NaiveDate,
    #[serde(rename = "cantidadHabitaciones")]
    pub rooms: i32,
    #[serde(rename = "estado")]
    pub status: ReservationStatus,
    #[serde(rename = "montoTotal", with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_amount: Decimal,
    #[serde(rename = "fechaCreacion")]
    pub created_at: DateTime<Utc>,
    #[sqlx(default)]
    #[serde(rename = "hotelNombre", skip_serializing_if = "Option::is_none")]
    pub hotel_name: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type_name: Option<String>,
    #[serde(rename = "noches")]
    pub nights: i32,
}

/// Booking request as received from the dashboard
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservation {
    pub hotel_id: i32,
    pub room_type_id: i32,
    #[serde(rename = "huespedNombre")]
    #[validate(length(min = 1, max = 200, message = "Guest name must be between 1 and 200 characters"))]
    pub guest_name: String,
    #[serde(rename = "fechaEntrada", deserialize_with = "deserialize_day")]
    #[schema(value_type = String, example = "2025-06-01")]
    pub check_in: NaiveDate,
    #[serde(rename = "fechaSalida", deserialize_with = "deserialize_day")]
    #[schema(value_type = String, example = "2025-06-04")]
    pub check_out: NaiveDate,
    #[serde(rename = "cantidadHabitaciones", default = "default_rooms")]
    pub rooms: i32,
}

fn default_rooms() -> i32 {
    1
}

/// Fully priced reservation ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub hotel_id: i32,
    pub room_type_id: i32,
    pub guest_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub rooms: i32,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Status overwrite request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReservationStatus {
    #[serde(rename = "estado")]
    pub status: String,
}

/// Outcome of a booking attempt: always the same shape, callers inspect `success`
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation: Option<ReservationDetails>,
}
