//! Room type model and related types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Room type (Single, Double, Suite...) belonging to one hotel
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RoomType {
    pub id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
    /// Nightly price for one room
    #[serde(rename = "precioBase", with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub base_price: Decimal,
    #[serde(rename = "hotelId")]
    pub hotel_id: i32,
    #[sqlx(default)]
    #[serde(rename = "hotelNombre", skip_serializing_if = "Option::is_none", default)]
    pub hotel_name: Option<String>,
}

/// Create room type request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoomType {
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[serde(rename = "precioBase", with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = f64)]
    pub base_price: Decimal,
    #[serde(rename = "hotelId")]
    pub hotel_id: i32,
}

/// Update room type request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoomType {
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[serde(rename = "precioBase", with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = f64)]
    pub base_price: Decimal,
}

/// Reassign existing room types to a hotel
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignRoomTypes {
    #[serde(rename = "hotelId")]
    pub hotel_id: i32,
    #[serde(rename = "roomTypeIds", default)]
    pub room_type_ids: Vec<i32>,
}

/// Result of a bulk reassignment
#[derive(Debug, Serialize, ToSchema)]
pub struct AssignRoomTypesResult {
    pub message: String,
    #[serde(rename = "hotelId")]
    pub hotel_id: i32,
    #[serde(rename = "assignedRoomTypeIds")]
    pub assigned_room_type_ids: Vec<i32>,
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        let mut err = ValidationError::new("price");
        err.message = Some("Base price cannot be negative".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_price_rejected() {
        let input: CreateRoomType =
            serde_json::from_str(r#"{"nombre":"Suite","precioBase":-10.5,"hotelId":1}"#).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_price_serialized_as_number() {
        let room = RoomType {
            id: 3,
            name: "Doble".into(),
            base_price: Decimal::new(12050, 2),
            hotel_id: 1,
            hotel_name: None,
        };
        let json = serde_json::to_value(&room).unwrap();
        assert_eq!(json["precioBase"], serde_json::json!(120.5));
        assert!(json.get("hotelNombre").is_none());
    }
}
