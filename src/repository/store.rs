//! Data-access boundary used by the inventory and reservation services.
//!
//! `Repository` implements it on PostgreSQL; tests substitute mocks or an
//! in-memory ledger.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::{inventory, reservations, Repository};
use crate::{
    error::AppResult,
    models::{
        hotel::Hotel,
        inventory::{covering_nights, InventoryDay, InventoryView},
        reservation::{NewReservation, ReservationDetails, ReservationStatus},
        room_type::RoomType,
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn find_hotel(&self, id: i32) -> AppResult<Option<Hotel>>;

    async fn find_room_type(&self, id: i32) -> AppResult<Option<RoomType>>;

    /// Exact-day ledger lookup
    async fn inventory_by_key(&self, hotel_id: i32, room_type_id: i32, day: NaiveDate) -> AppResult<Option<InventoryDay>>;

    /// Ledger rows in `[start, end]` (inclusive), ascending by day
    async fn inventory_range(
        &self,
        hotel_id: i32,
        room_type_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<InventoryDay>>;

    /// Same window as `inventory_range`, as dashboard views
    async fn inventory_range_views(
        &self,
        hotel_id: i32,
        room_type_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<InventoryView>>;

    /// Insert a row with nothing reserved; `Conflict` if the key exists
    async fn insert_inventory_day(
        &self,
        hotel_id: i32,
        room_type_id: i32,
        day: NaiveDate,
        total_rooms: i32,
    ) -> AppResult<InventoryDay>;

    /// Signed change of the reserved count; `Conflict` if it would leave `[0, total]`
    async fn adjust_reserved(&self, inventory_id: i32, delta: i32) -> AppResult<InventoryDay>;

    /// Manual overwrite of both counts; `None` if the row does not exist
    async fn overwrite_counts(&self, inventory_id: i32, total_rooms: i32, reserved_rooms: i32) -> AppResult<Option<InventoryDay>>;

    async fn list_inventory(&self) -> AppResult<Vec<InventoryView>>;

    async fn get_inventory(&self, id: i32) -> AppResult<Option<InventoryView>>;

    async fn list_reservations(&self) -> AppResult<Vec<ReservationDetails>>;

    async fn reservations_by_hotel(&self, hotel_id: i32) -> AppResult<Vec<ReservationDetails>>;

    async fn get_reservation(&self, id: i32) -> AppResult<Option<ReservationDetails>>;

    async fn set_reservation_status(&self, id: i32, status: ReservationStatus) -> AppResult<Option<ReservationDetails>>;

    /// Write the reservation and take its rooms from every night of the stay
    /// as one atomic unit. `None` means the nights could not all be covered
    /// at commit time and nothing was written.
    async fn commit_reservation(&self, reservation: &NewReservation) -> AppResult<Option<ReservationDetails>>;
}

#[async_trait]
impl BookingStore for Repository {
    async fn find_hotel(&self, id: i32) -> AppResult<Option<Hotel>> {
        self.hotels.find(id).await
    }

    async fn find_room_type(&self, id: i32) -> AppResult<Option<RoomType>> {
        self.room_types.find(id).await
    }

    async fn inventory_by_key(&self, hotel_id: i32, room_type_id: i32, day: NaiveDate) -> AppResult<Option<InventoryDay>> {
        self.inventory.by_key(hotel_id, room_type_id, day).await
    }

    async fn inventory_range(
        &self,
        hotel_id: i32,
        room_type_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<InventoryDay>> {
        self.inventory.range(hotel_id, room_type_id, start, end).await
    }

    async fn inventory_range_views(
        &self,
        hotel_id: i32,
        room_type_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<InventoryView>> {
        self.inventory.range_views(hotel_id, room_type_id, start, end).await
    }

    async fn insert_inventory_day(
        &self,
        hotel_id: i32,
        room_type_id: i32,
        day: NaiveDate,
        total_rooms: i32,
    ) -> AppResult<InventoryDay> {
        self.inventory.insert(hotel_id, room_type_id, day, total_rooms).await
    }

    async fn adjust_reserved(&self, inventory_id: i32, delta: i32) -> AppResult<InventoryDay> {
        self.inventory.adjust_reserved(inventory_id, delta).await
    }

    async fn overwrite_counts(&self, inventory_id: i32, total_rooms: i32, reserved_rooms: i32) -> AppResult<Option<InventoryDay>> {
        self.inventory.overwrite_counts(inventory_id, total_rooms, reserved_rooms).await
    }

    async fn list_inventory(&self) -> AppResult<Vec<InventoryView>> {
        self.inventory.list().await
    }

    async fn get_inventory(&self, id: i32) -> AppResult<Option<InventoryView>> {
        self.inventory.get_view(id).await
    }

    async fn list_reservations(&self) -> AppResult<Vec<ReservationDetails>> {
        self.reservations.list().await
    }

    async fn reservations_by_hotel(&self, hotel_id: i32) -> AppResult<Vec<ReservationDetails>> {
        self.reservations.list_by_hotel(hotel_id).await
    }

    async fn get_reservation(&self, id: i32) -> AppResult<Option<ReservationDetails>> {
        self.reservations.get(id).await
    }

    async fn set_reservation_status(&self, id: i32, status: ReservationStatus) -> AppResult<Option<ReservationDetails>> {
        self.reservations.set_status(id, status).await
    }

    async fn commit_reservation(&self, reservation: &NewReservation) -> AppResult<Option<ReservationDetails>> {
        let mut tx = self.pool.begin().await?;

        // Lock the stay's ledger rows; concurrent bookings of the same nights queue here
        let rows = inventory::fetch_range(
            &mut *tx,
            reservation.hotel_id,
            reservation.room_type_id,
            reservation.check_in,
            reservation.check_out,
            true,
        )
        .await?;

        let Some(nights) = covering_nights(&rows, reservation.check_in, reservation.check_out) else {
            tx.rollback().await?;
            return Ok(None);
        };

        let reservation_id = reservations::insert(&mut *tx, reservation).await?;

        for night in nights {
            let applied = inventory::apply_reserved_delta(&mut *tx, night.id, reservation.rooms).await?;
            if applied.is_none() {
                tracing::info!(
                    "Night {} of room type {} filled up before commit",
                    night.day,
                    reservation.room_type_id
                );
                tx.rollback().await?;
                return Ok(None);
            }
        }

        tx.commit().await?;

        self.reservations.get(reservation_id).await
    }
}
