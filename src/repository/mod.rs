//! Repository layer for database operations

pub mod hotels;
pub mod inventory;
pub mod reservations;
pub mod room_types;
pub mod seed;
pub mod store;

use sqlx::{Pool, Postgres};

use crate::error::AppError;

pub use store::BookingStore;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub hotels: hotels::HotelsRepository,
    pub room_types: room_types::RoomTypesRepository,
    pub inventory: inventory::InventoryRepository,
    pub reservations: reservations::ReservationsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            hotels: hotels::HotelsRepository::new(pool.clone()),
            room_types: room_types::RoomTypesRepository::new(pool.clone()),
            inventory: inventory::InventoryRepository::new(pool.clone()),
            reservations: reservations::ReservationsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database (readiness probe)
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Map constraint violations to `Conflict`, anything else stays a database error.
pub(crate) fn constraint_conflict(err: sqlx::Error, message: impl FnOnce() -> String) -> AppError {
    if let Some(db) = err.as_database_error() {
        if db.is_unique_violation() || db.is_foreign_key_violation() || db.is_check_violation() {
            tracing::warn!("Constraint violation: {}", db.message());
            return AppError::Conflict(message());
        }
    }
    AppError::Database(err)
}
