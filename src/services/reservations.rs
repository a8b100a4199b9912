//! Reservation committer and reservation administration

use std::{fmt, sync::Arc};

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        inventory::{covering_nights, has_headroom, nights_between},
        reservation::{
            CreateReservation, NewReservation, ReservationDetails, ReservationResult,
            ReservationStatus,
        },
    },
    repository::BookingStore,
};

/// Why a booking request was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingRejection {
    CheckInInPast,
    CheckOutNotAfterCheckIn,
    NoRoomsRequested,
    HotelNotFound,
    HotelInactive,
    RoomTypeNotFound,
    NoAvailability,
}

impl fmt::Display for BookingRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            BookingRejection::CheckInInPast => "The entry date cannot be in the past",
            BookingRejection::CheckOutNotAfterCheckIn => "The exit date must be after the entry date",
            BookingRejection::NoRoomsRequested => "The number of rooms must be greater than 0",
            BookingRejection::HotelNotFound => "Hotel not found",
            BookingRejection::HotelInactive => "The hotel is not active",
            BookingRejection::RoomTypeNotFound => "Room type not found",
            BookingRejection::NoAvailability => "No availability for the selected dates",
        };
        f.write_str(message)
    }
}

/// Result of a booking attempt. Business-rule failures are values, not errors.
#[derive(Debug)]
pub enum BookingOutcome {
    Booked(ReservationDetails),
    Rejected(BookingRejection),
}

impl BookingOutcome {
    pub fn is_booked(&self) -> bool {
        matches!(self, BookingOutcome::Booked(_))
    }
}

impl From<BookingOutcome> for ReservationResult {
    fn from(outcome: BookingOutcome) -> Self {
        match outcome {
            BookingOutcome::Booked(reservation) => ReservationResult {
                success: true,
                message: "Reservation created successfully".to_string(),
                reservation: Some(reservation),
            },
            BookingOutcome::Rejected(reason) => ReservationResult {
                success: false,
                message: reason.to_string(),
                reservation: None,
            },
        }
    }
}

/// `base_price × nights × rooms`, to the cent. `None` when it does not fit a decimal.
pub fn stay_price(base_price: Decimal, nights: i64, rooms: i32) -> Option<Decimal> {
    base_price
        .checked_mul(Decimal::from(nights))?
        .checked_mul(Decimal::from(rooms))
        .map(|total| total.round_dp(2))
}

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

#[derive(Clone)]
pub struct ReservationsService {
    store: Arc<dyn BookingStore>,
    today: fn() -> NaiveDate,
}

impl ReservationsService {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self {
            store,
            today: utc_today,
        }
    }

    /// Replace the clock used for the past-date check
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub async fn list(&self) -> AppResult<Vec<ReservationDetails>> {
        self.store.list_reservations().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<ReservationDetails> {
        self.store
            .get_reservation(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))
    }

    pub async fn list_by_hotel(&self, hotel_id: i32) -> AppResult<Vec<ReservationDetails>> {
        self.store.reservations_by_hotel(hotel_id).await
    }

    /// Validate, price and commit a booking.
    ///
    /// Checks run in a fixed order and stop at the first failure. The ledger
    /// is only written by `commit_reservation`, which re-verifies every night
    /// under row locks.
    pub async fn create(&self, request: &CreateReservation) -> AppResult<BookingOutcome> {
        request.validate()?;

        if request.check_in < (self.today)() {
            return Ok(self.reject(request, BookingRejection::CheckInInPast));
        }
        if request.check_out <= request.check_in {
            return Ok(self.reject(request, BookingRejection::CheckOutNotAfterCheckIn));
        }
        if request.rooms <= 0 {
            return Ok(self.reject(request, BookingRejection::NoRoomsRequested));
        }

        let Some(hotel) = self.store.find_hotel(request.hotel_id).await? else {
            return Ok(self.reject(request, BookingRejection::HotelNotFound));
        };
        if !hotel.active {
            return Ok(self.reject(request, BookingRejection::HotelInactive));
        }

        let Some(room_type) = self.store.find_room_type(request.room_type_id).await? else {
            return Ok(self.reject(request, BookingRejection::RoomTypeNotFound));
        };

        let rows = self
            .store
            .inventory_range(request.hotel_id, request.room_type_id, request.check_in, request.check_out)
            .await?;
        let available = covering_nights(&rows, request.check_in, request.check_out)
            .is_some_and(|nights| has_headroom(nights, request.rooms));
        if !available {
            return Ok(self.reject(request, BookingRejection::NoAvailability));
        }

        let nights = nights_between(request.check_in, request.check_out);
        let total_amount = stay_price(room_type.base_price, nights, request.rooms).ok_or_else(|| {
            AppError::Validation("The reservation total is out of range".to_string())
        })?;
        let reservation = NewReservation {
            hotel_id: request.hotel_id,
            room_type_id: request.room_type_id,
            guest_name: request.guest_name.trim().to_string(),
            check_in: request.check_in,
            check_out: request.check_out,
            rooms: request.rooms,
            total_amount,
            created_at: Utc::now(),
        };

        match self.store.commit_reservation(&reservation).await? {
            Some(details) => {
                tracing::info!(
                    "Reservation {} booked: hotel {} room type {} {} to {} x{} = {}",
                    details.id,
                    details.hotel_id,
                    details.room_type_id,
                    details.check_in,
                    details.check_out,
                    details.rooms,
                    details.total_amount
                );
                Ok(BookingOutcome::Booked(details))
            }
            None => Ok(self.reject(request, BookingRejection::NoAvailability)),
        }
    }

    /// Overwrite the status; any transition between known statuses is allowed
    pub async fn update_status(&self, id: i32, status: &str) -> AppResult<ReservationDetails> {
        let status: ReservationStatus = status.parse().map_err(AppError::Validation)?;

        self.store
            .set_reservation_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation with id {} not found", id)))
    }

    /// Mark a reservation cancelled. Returns false when it does not exist.
    pub async fn cancel(&self, id: i32) -> AppResult<bool> {
        // Reserved counts are left as they are: releasing the stay's rooms on
        // cancellation is an open business decision, tracked in DESIGN.md.
        let cancelled = self
            .store
            .set_reservation_status(id, ReservationStatus::Cancelled)
            .await?;

        if cancelled.is_some() {
            tracing::info!("Reservation {} cancelled", id);
        }
        Ok(cancelled.is_some())
    }

    fn reject(&self, request: &CreateReservation, reason: BookingRejection) -> BookingOutcome {
        tracing::info!(
            "Reservation rejected for hotel {} room type {} ({} to {}): {}",
            request.hotel_id,
            request.room_type_id,
            request.check_in,
            request.check_out,
            reason
        );
        BookingOutcome::Rejected(reason)
    }
}
