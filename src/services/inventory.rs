//! Inventory ledger service: availability checks and provisioning

use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::inventory::{
        covering_nights, has_headroom, nights_between, stay_nights, AvailabilityResult, BulkCreateInventory,
        CheckAvailability, CreateInventoryDay, InventoryDay, InventoryView, UpdateInventoryCounts,
    },
    repository::BookingStore,
};

/// Longest range a single bulk provisioning call may cover
pub const MAX_PROVISION_NIGHTS: i64 = 731;

#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn BookingStore>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<InventoryView>> {
        self.store.list_inventory().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<InventoryView> {
        self.store
            .get_inventory(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Inventory with id {} not found", id)))
    }

    /// Ledger rows of one room type in `[start, end]`
    pub async fn range(
        &self,
        hotel_id: i32,
        room_type_id: i32,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AppResult<Vec<InventoryView>> {
        let (Some(start), Some(end)) = (start, end) else {
            return Err(AppError::Validation(
                "fechaInicio and fechaFin are required".to_string(),
            ));
        };
        ensure_ordered(start, end)?;

        self.store
            .inventory_range_views(hotel_id, room_type_id, start, end)
            .await
    }

    /// True when every night of `[start, end)` has at least `rooms` rooms free.
    ///
    /// Callers must reject `start >= end` and `rooms <= 0` beforehand.
    pub async fn is_available(
        &self,
        hotel_id: i32,
        room_type_id: i32,
        start: NaiveDate,
        end: NaiveDate,
        rooms: i32,
    ) -> AppResult<bool> {
        let rows = self
            .store
            .inventory_range(hotel_id, room_type_id, start, end)
            .await?;

        Ok(covering_nights(&rows, start, end).is_some_and(|nights| has_headroom(nights, rooms)))
    }

    pub async fn check_availability(&self, query: &CheckAvailability) -> AppResult<AvailabilityResult> {
        ensure_ordered(query.start_date, query.end_date)?;
        if query.rooms <= 0 {
            return Err(AppError::Validation(
                "The number of rooms must be greater than 0".to_string(),
            ));
        }

        let rows = self
            .store
            .inventory_range(query.hotel_id, query.room_type_id, query.start_date, query.end_date)
            .await?;

        let covered = covering_nights(&rows, query.start_date, query.end_date)
            .filter(|nights| has_headroom(nights, query.rooms));

        Ok(match covered {
            Some(nights) => AvailabilityResult {
                available: true,
                message: "Rooms are available for the selected dates".to_string(),
                inventory_details: Some(nights.iter().cloned().map(InventoryView::from).collect()),
            },
            None => AvailabilityResult {
                available: false,
                message: "Not enough availability for the selected dates".to_string(),
                inventory_details: None,
            },
        })
    }

    /// Provision one ledger day; an existing row for the key is a conflict
    pub async fn create_single_day(&self, data: &CreateInventoryDay) -> AppResult<InventoryView> {
        if data.total_rooms < 0 {
            return Err(AppError::Validation(
                "The total number of rooms cannot be negative".to_string(),
            ));
        }
        self.ensure_room_type_of(data.hotel_id, data.room_type_id).await?;

        if self
            .store
            .inventory_by_key(data.hotel_id, data.room_type_id, data.day)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Inventory already exists for {}",
                data.day
            )));
        }

        let row = self
            .store
            .insert_inventory_day(data.hotel_id, data.room_type_id, data.day, data.total_rooms)
            .await?;
        self.view_of(row).await
    }

    /// Provision every night of `[start, end)`, leaving existing days untouched.
    ///
    /// Returns only the rows created by this call, in date order.
    pub async fn bulk_create_range(&self, data: &BulkCreateInventory) -> AppResult<Vec<InventoryView>> {
        ensure_ordered(data.start_date, data.end_date)?;
        if nights_between(data.start_date, data.end_date) > MAX_PROVISION_NIGHTS {
            return Err(AppError::Validation(format!(
                "A bulk range cannot span more than {} nights",
                MAX_PROVISION_NIGHTS
            )));
        }
        if data.total_rooms <= 0 {
            return Err(AppError::Validation(
                "The total number of rooms must be greater than 0".to_string(),
            ));
        }
        self.ensure_room_type_of(data.hotel_id, data.room_type_id).await?;

        let mut created = Vec::new();
        for day in stay_nights(data.start_date, data.end_date) {
            if self
                .store
                .inventory_by_key(data.hotel_id, data.room_type_id, day)
                .await?
                .is_some()
            {
                continue;
            }

            let row = match self
                .store
                .insert_inventory_day(data.hotel_id, data.room_type_id, day, data.total_rooms)
                .await
            {
                Ok(row) => row,
                // provisioned concurrently since the lookup
                Err(AppError::Conflict(_)) => continue,
                Err(e) => return Err(e),
            };
            created.push(InventoryView::from(row));
        }

        tracing::info!(
            "Provisioned {} inventory days for hotel {} room type {} ({} to {})",
            created.len(),
            data.hotel_id,
            data.room_type_id,
            data.start_date,
            data.end_date
        );
        Ok(created)
    }

    /// Manual overwrite of a ledger row's counts
    pub async fn update_counts(&self, id: i32, data: &UpdateInventoryCounts) -> AppResult<InventoryView> {
        if data.total_rooms < 0 || data.reserved_rooms < 0 {
            return Err(AppError::Validation(
                "Room counts cannot be negative".to_string(),
            ));
        }
        if data.reserved_rooms > data.total_rooms {
            return Err(AppError::Conflict(
                "The reserved count cannot exceed the total count".to_string(),
            ));
        }

        let row = self
            .store
            .overwrite_counts(id, data.total_rooms, data.reserved_rooms)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Inventory with id {} not found", id)))?;
        self.view_of(row).await
    }

    async fn ensure_room_type_of(&self, hotel_id: i32, room_type_id: i32) -> AppResult<()> {
        if self.store.find_hotel(hotel_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Hotel with id {} not found", hotel_id)));
        }
        if self.store.find_room_type(room_type_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Room type with id {} not found",
                room_type_id
            )));
        }
        Ok(())
    }

    async fn view_of(&self, row: InventoryDay) -> AppResult<InventoryView> {
        match self.store.get_inventory(row.id).await? {
            Some(view) => Ok(view),
            None => Ok(InventoryView::from(row)),
        }
    }
}

fn ensure_ordered(start: NaiveDate, end: NaiveDate) -> AppResult<()> {
    if start >= end {
        return Err(AppError::Validation(
            "The start date must be before the end date".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::store::MockBookingStore;

    fn june(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn day(id: i32, d: u32, total: i32, reserved: i32) -> InventoryDay {
        InventoryDay {
            id,
            hotel_id: 1,
            room_type_id: 2,
            day: june(d),
            total_rooms: total,
            reserved_rooms: reserved,
        }
    }

    fn service(store: MockBookingStore) -> InventoryService {
        InventoryService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_too_few_rows_is_unavailable() {
        let mut store = MockBookingStore::new();
        store
            .expect_inventory_range()
            .returning(|_, _, _, _| Ok(vec![day(1, 1, 10, 0), day(2, 2, 10, 0)]));

        let available = service(store).is_available(1, 2, june(1), june(4), 1).await.unwrap();
        assert!(!available);
    }

    #[tokio::test]
    async fn test_departure_day_is_ignored() {
        let mut store = MockBookingStore::new();
        store.expect_inventory_range().returning(|_, _, _, _| {
            Ok(vec![day(1, 1, 10, 8), day(2, 2, 10, 8), day(3, 3, 10, 8), day(4, 4, 10, 10)])
        });

        let result = service(store)
            .check_availability(&CheckAvailability {
                hotel_id: 1,
                room_type_id: 2,
                start_date: june(1),
                end_date: june(4),
                rooms: 2,
            })
            .await
            .unwrap();
        assert!(result.available);
        assert_eq!(result.inventory_details.map(|d| d.len()), Some(3));
    }

    #[tokio::test]
    async fn test_inverted_range_is_a_validation_error() {
        let store = MockBookingStore::new();
        let err = service(store)
            .check_availability(&CheckAvailability {
                hotel_id: 1,
                room_type_id: 2,
                start_date: june(4),
                end_date: june(4),
                rooms: 1,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_single_day_conflicts_with_existing_row() {
        let mut store = MockBookingStore::new();
        store.expect_find_hotel().returning(|_| Ok(Some(crate::models::Hotel {
            id: 1,
            name: "Mar Azul".into(),
            address: "Playa 1".into(),
            category: 4,
            active: true,
            room_types: Vec::new(),
        })));
        store.expect_find_room_type().returning(|_| Ok(Some(crate::models::RoomType {
            id: 2,
            name: "Doble".into(),
            base_price: rust_decimal::Decimal::new(10000, 2),
            hotel_id: 1,
            hotel_name: None,
        })));
        store
            .expect_inventory_by_key()
            .returning(|_, _, _| Ok(Some(day(1, 1, 10, 0))));
        store.expect_insert_inventory_day().never();

        let err = service(store)
            .create_single_day(&CreateInventoryDay {
                hotel_id: 1,
                room_type_id: 2,
                day: june(1),
                total_rooms: 10,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_bulk_range_span_is_capped() {
        let mut store = MockBookingStore::new();
        store.expect_find_hotel().never();
        store.expect_insert_inventory_day().never();

        let err = service(store)
            .bulk_create_range(&BulkCreateInventory {
                hotel_id: 1,
                room_type_id: 2,
                start_date: june(1),
                end_date: NaiveDate::from_ymd_opt(2225, 6, 1).unwrap(),
                total_rooms: 10,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_manual_update_rejects_overbooked_counts() {
        let mut store = MockBookingStore::new();
        store.expect_overwrite_counts().never();

        let err = service(store)
            .update_counts(1, &UpdateInventoryCounts { total_rooms: 5, reserved_rooms: 6 })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
