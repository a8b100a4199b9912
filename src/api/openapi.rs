//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, hotels, inventory, reservations, room_types};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "RoomLedger API",
        version = "1.0.0",
        description = "Hotel reservation backoffice REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Hotels
        hotels::list_hotels,
        hotels::page_hotels,
        hotels::list_active_hotels,
        hotels::get_hotel,
        hotels::create_hotel,
        hotels::update_hotel,
        hotels::delete_hotel,
        // Room types
        room_types::list_room_types,
        room_types::get_room_type,
        room_types::list_hotel_room_types,
        room_types::create_room_type,
        room_types::update_room_type,
        room_types::delete_room_type,
        room_types::assign_room_types,
        // Inventory
        inventory::list_inventory,
        inventory::get_inventory,
        inventory::list_inventory_range,
        inventory::check_availability,
        inventory::create_inventory,
        inventory::bulk_create_inventory,
        inventory::update_inventory,
        // Reservations
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::list_hotel_reservations,
        reservations::create_reservation,
        reservations::update_reservation_status,
        reservations::cancel_reservation,
    ),
    components(
        schemas(
            // Hotels
            crate::models::hotel::Hotel,
            crate::models::hotel::HotelInput,
            crate::services::hotels::HotelPage,
            // Room types
            crate::models::room_type::RoomType,
            crate::models::room_type::CreateRoomType,
            crate::models::room_type::UpdateRoomType,
            crate::models::room_type::AssignRoomTypes,
            crate::models::room_type::AssignRoomTypesResult,
            // Inventory
            crate::models::inventory::InventoryView,
            crate::models::inventory::CreateInventoryDay,
            crate::models::inventory::BulkCreateInventory,
            crate::models::inventory::UpdateInventoryCounts,
            crate::models::inventory::CheckAvailability,
            crate::models::inventory::AvailabilityResult,
            // Reservations
            crate::models::reservation::ReservationStatus,
            crate::models::reservation::ReservationDetails,
            crate::models::reservation::CreateReservation,
            crate::models::reservation::UpdateReservationStatus,
            crate::models::reservation::ReservationResult,
            reservations::CancelResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "hotels", description = "Hotel management"),
        (name = "roomtypes", description = "Room type management"),
        (name = "inventory", description = "Daily room inventory and availability"),
        (name = "reservations", description = "Reservation booking and management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_paths_are_documented() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/reservations"));
        assert!(doc.paths.paths.contains_key("/inventory/check-availability"));
        assert!(doc.paths.paths.contains_key("/hotels/paged"));
    }
}
