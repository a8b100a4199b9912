//! Hotel model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::room_type::RoomType;

/// Hotel record. Deactivating a hotel, not deleting it, is the normal end of its lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Hotel {
    pub id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion")]
    pub address: String,
    /// Star category (1-5)
    #[serde(rename = "categoria")]
    pub category: i16,
    /// Whether the hotel accepts reservations
    #[serde(rename = "estado")]
    pub active: bool,
    #[sqlx(skip)]
    #[serde(rename = "roomTypes", default)]
    pub room_types: Vec<RoomType>,
}

/// Create or update hotel request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct HotelInput {
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
    #[serde(rename = "direccion")]
    #[validate(length(min = 1, max = 500, message = "Address must be between 1 and 500 characters"))]
    pub address: String,
    #[serde(rename = "categoria")]
    #[validate(range(min = 1, max = 5, message = "Category must be between 1 and 5 stars"))]
    pub category: i16,
    #[serde(rename = "estado", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Paged hotel search parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct HotelPageQuery {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
    /// Case-insensitive match on name or address
    pub search_term: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_defaults_to_active() {
        let input: HotelInput =
            serde_json::from_str(r#"{"nombre":"Costa Azul","direccion":"Paseo 1","categoria":4}"#).unwrap();
        assert!(input.active);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_category_out_of_range() {
        let input = HotelInput {
            name: "Costa Azul".into(),
            address: "Paseo 1".into(),
            category: 6,
            active: true,
        };
        assert!(input.validate().is_err());
    }
}
