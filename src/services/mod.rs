//! Business logic services

pub mod hotels;
pub mod inventory;
pub mod reservations;
pub mod room_types;

use std::sync::Arc;

use crate::repository::{BookingStore, Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub hotels: hotels::HotelsService,
    pub room_types: room_types::RoomTypesService,
    pub inventory: inventory::InventoryService,
    pub reservations: reservations::ReservationsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        let store: Arc<dyn BookingStore> = Arc::new(repository.clone());
        Self {
            hotels: hotels::HotelsService::new(repository.clone()),
            room_types: room_types::RoomTypesService::new(repository),
            inventory: inventory::InventoryService::new(store.clone()),
            reservations: reservations::ReservationsService::new(store),
        }
    }
}
