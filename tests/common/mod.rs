//! In-memory ledger used to drive the services without a database

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use roomledger_server::{
    error::{AppError, AppResult},
    models::{
        inventory::{covering_nights, nights_between, InventoryDay, InventoryView},
        reservation::{NewReservation, ReservationDetails, ReservationStatus},
        Hotel, RoomType,
    },
    repository::BookingStore,
};

#[derive(Default)]
struct Tables {
    next_id: i32,
    hotels: Vec<Hotel>,
    room_types: Vec<RoomType>,
    inventory: Vec<InventoryDay>,
    reservations: Vec<ReservationDetails>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn range(&self, hotel_id: i32, room_type_id: i32, start: NaiveDate, end: NaiveDate) -> Vec<InventoryDay> {
        let mut rows: Vec<InventoryDay> = self
            .inventory
            .iter()
            .filter(|r| r.hotel_id == hotel_id && r.room_type_id == room_type_id && r.day >= start && r.day <= end)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.day);
        rows
    }

    fn view(&self, row: &InventoryDay) -> InventoryView {
        let mut view = InventoryView::from(row.clone());
        view.hotel_name = self.hotels.iter().find(|h| h.id == row.hotel_id).map(|h| h.name.clone());
        view.room_type_name = self
            .room_types
            .iter()
            .find(|t| t.id == row.room_type_id)
            .map(|t| t.name.clone());
        view
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_hotel(&self, name: &str, active: bool) -> i32 {
        let mut tables = self.tables.lock().await;
        let id = tables.next_id();
        tables.hotels.push(Hotel {
            id,
            name: name.to_string(),
            address: format!("Calle Mayor {}", id),
            category: 4,
            active,
            room_types: Vec::new(),
        });
        id
    }

    pub async fn add_room_type(&self, hotel_id: i32, name: &str, base_price: Decimal) -> i32 {
        let mut tables = self.tables.lock().await;
        let id = tables.next_id();
        tables.room_types.push(RoomType {
            id,
            name: name.to_string(),
            base_price,
            hotel_id,
            hotel_name: None,
        });
        id
    }

    /// `(day, total, reserved)` for every ledger row of a room type, by day
    pub async fn ledger(&self, hotel_id: i32, room_type_id: i32) -> Vec<(NaiveDate, i32, i32)> {
        let tables = self.tables.lock().await;
        tables
            .range(hotel_id, room_type_id, NaiveDate::MIN, NaiveDate::MAX)
            .into_iter()
            .map(|r| (r.day, r.total_rooms, r.reserved_rooms))
            .collect()
    }

    pub async fn reservation_count(&self) -> usize {
        self.tables.lock().await.reservations.len()
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn find_hotel(&self, id: i32) -> AppResult<Option<Hotel>> {
        Ok(self.tables.lock().await.hotels.iter().find(|h| h.id == id).cloned())
    }

    async fn find_room_type(&self, id: i32) -> AppResult<Option<RoomType>> {
        Ok(self.tables.lock().await.room_types.iter().find(|t| t.id == id).cloned())
    }

    async fn inventory_by_key(&self, hotel_id: i32, room_type_id: i32, day: NaiveDate) -> AppResult<Option<InventoryDay>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .inventory
            .iter()
            .find(|r| r.hotel_id == hotel_id && r.room_type_id == room_type_id && r.day == day)
            .cloned())
    }

    async fn inventory_range(
        &self,
        hotel_id: i32,
        room_type_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<InventoryDay>> {
        Ok(self.tables.lock().await.range(hotel_id, room_type_id, start, end))
    }

    async fn inventory_range_views(
        &self,
        hotel_id: i32,
        room_type_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<InventoryView>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .range(hotel_id, room_type_id, start, end)
            .iter()
            .map(|r| tables.view(r))
            .collect())
    }

    async fn insert_inventory_day(
        &self,
        hotel_id: i32,
        room_type_id: i32,
        day: NaiveDate,
        total_rooms: i32,
    ) -> AppResult<InventoryDay> {
        let mut tables = self.tables.lock().await;
        if tables
            .inventory
            .iter()
            .any(|r| r.hotel_id == hotel_id && r.room_type_id == room_type_id && r.day == day)
        {
            return Err(AppError::Conflict(format!("Inventory already exists for {}", day)));
        }

        let row = InventoryDay {
            id: tables.next_id(),
            hotel_id,
            room_type_id,
            day,
            total_rooms,
            reserved_rooms: 0,
        };
        tables.inventory.push(row.clone());
        Ok(row)
    }

    async fn adjust_reserved(&self, inventory_id: i32, delta: i32) -> AppResult<InventoryDay> {
        let mut tables = self.tables.lock().await;
        let row = tables
            .inventory
            .iter_mut()
            .find(|r| r.id == inventory_id)
            .ok_or_else(|| AppError::NotFound(format!("Inventory with id {} not found", inventory_id)))?;

        let reserved = row.reserved_rooms + delta;
        if reserved < 0 || reserved > row.total_rooms {
            return Err(AppError::Conflict("Reserved count out of bounds".to_string()));
        }
        row.reserved_rooms = reserved;
        Ok(row.clone())
    }

    async fn overwrite_counts(&self, inventory_id: i32, total_rooms: i32, reserved_rooms: i32) -> AppResult<Option<InventoryDay>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.inventory.iter_mut().find(|r| r.id == inventory_id).map(|row| {
            row.total_rooms = total_rooms;
            row.reserved_rooms = reserved_rooms;
            row.clone()
        }))
    }

    async fn list_inventory(&self) -> AppResult<Vec<InventoryView>> {
        let tables = self.tables.lock().await;
        Ok(tables.inventory.iter().map(|r| tables.view(r)).collect())
    }

    async fn get_inventory(&self, id: i32) -> AppResult<Option<InventoryView>> {
        let tables = self.tables.lock().await;
        Ok(tables.inventory.iter().find(|r| r.id == id).map(|r| tables.view(r)))
    }

    async fn list_reservations(&self) -> AppResult<Vec<ReservationDetails>> {
        let mut reservations = self.tables.lock().await.reservations.clone();
        reservations.reverse();
        Ok(reservations)
    }

    async fn reservations_by_hotel(&self, hotel_id: i32) -> AppResult<Vec<ReservationDetails>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .reservations
            .iter()
            .rev()
            .filter(|r| r.hotel_id == hotel_id)
            .cloned()
            .collect())
    }

    async fn get_reservation(&self, id: i32) -> AppResult<Option<ReservationDetails>> {
        Ok(self.tables.lock().await.reservations.iter().find(|r| r.id == id).cloned())
    }

    async fn set_reservation_status(&self, id: i32, status: ReservationStatus) -> AppResult<Option<ReservationDetails>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.reservations.iter_mut().find(|r| r.id == id).map(|r| {
            r.status = status;
            r.clone()
        }))
    }

    async fn commit_reservation(&self, reservation: &NewReservation) -> AppResult<Option<ReservationDetails>> {
        // The lock is held for the whole commit, standing in for the row locks
        let mut tables = self.tables.lock().await;

        let rows = tables.range(
            reservation.hotel_id,
            reservation.room_type_id,
            reservation.check_in,
            reservation.check_out,
        );
        let Some(nights) = covering_nights(&rows, reservation.check_in, reservation.check_out) else {
            return Ok(None);
        };
        if nights.iter().any(|n| n.reserved_rooms + reservation.rooms > n.total_rooms) {
            return Ok(None);
        }

        let night_ids: Vec<i32> = nights.iter().map(|n| n.id).collect();
        for row in tables.inventory.iter_mut().filter(|r| night_ids.contains(&r.id)) {
            row.reserved_rooms += reservation.rooms;
        }

        let details = ReservationDetails {
            id: tables.next_id(),
            hotel_id: reservation.hotel_id,
            room_type_id: reservation.room_type_id,
            guest_name: reservation.guest_name.clone(),
            check_in: reservation.check_in,
            check_out: reservation.check_out,
            rooms: reservation.rooms,
            status: ReservationStatus::Confirmed,
            total_amount: reservation.total_amount,
            created_at: Utc::now(),
            hotel_name: tables.hotels.iter().find(|h| h.id == reservation.hotel_id).map(|h| h.name.clone()),
            room_type_name: tables
                .room_types
                .iter()
                .find(|t| t.id == reservation.room_type_id)
                .map(|t| t.name.clone()),
            nights: nights_between(reservation.check_in, reservation.check_out) as i32,
        };
        tables.reservations.push(details.clone());
        Ok(Some(details))
    }
}
