//! Inventory ledger repository.
//!
//! Rows are never created on read: a missing row means no inventory is
//! configured for that day, which is different from zero rooms available.

use chrono::NaiveDate;
use sqlx::{PgExecutor, Pool, Postgres};

use super::constraint_conflict;
use crate::{
    error::{AppError, AppResult},
    models::inventory::{InventoryDay, InventoryView},
};

const SELECT_VIEW: &str = r#"
    SELECT i.id, i.hotel_id, i.room_type_id, i.day, i.total_rooms, i.reserved_rooms,
           i.total_rooms - i.reserved_rooms AS available_rooms,
           h.name AS hotel_name, rt.name AS room_type_name
    FROM inventory_days i
    JOIN hotels h ON h.id = i.hotel_id
    JOIN room_types rt ON rt.id = i.room_type_id
"#;

#[derive(Clone)]
pub struct InventoryRepository {
    pool: Pool<Postgres>,
}

impl InventoryRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List the whole ledger
    pub async fn list(&self) -> AppResult<Vec<InventoryView>> {
        let rows = sqlx::query_as::<_, InventoryView>(&format!(
            "{} ORDER BY i.day, i.hotel_id, i.room_type_id",
            SELECT_VIEW
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_view(&self, id: i32) -> AppResult<Option<InventoryView>> {
        let row = sqlx::query_as::<_, InventoryView>(&format!("{} WHERE i.id = $1", SELECT_VIEW))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Exact-day lookup
    pub async fn by_key(&self, hotel_id: i32, room_type_id: i32, day: NaiveDate) -> AppResult<Option<InventoryDay>> {
        let row = sqlx::query_as::<_, InventoryDay>(
            "SELECT * FROM inventory_days WHERE hotel_id = $1 AND room_type_id = $2 AND day = $3",
        )
        .bind(hotel_id)
        .bind(room_type_id)
        .bind(day)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Rows in `[start, end]`, both ends inclusive, ascending by day
    pub async fn range(
        &self,
        hotel_id: i32,
        room_type_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<InventoryDay>> {
        Ok(fetch_range(&self.pool, hotel_id, room_type_id, start, end, false).await?)
    }

    /// Same window as [`range`](Self::range), joined with display names
    pub async fn range_views(
        &self,
        hotel_id: i32,
        room_type_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<InventoryView>> {
        let rows = sqlx::query_as::<_, InventoryView>(&format!(
            "{} WHERE i.hotel_id = $1 AND i.room_type_id = $2 AND i.day >= $3 AND i.day <= $4 ORDER BY i.day",
            SELECT_VIEW
        ))
        .bind(hotel_id)
        .bind(room_type_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert a fresh row with no reservations. An existing row for the key is a conflict.
    pub async fn insert(&self, hotel_id: i32, room_type_id: i32, day: NaiveDate, total_rooms: i32) -> AppResult<InventoryDay> {
        sqlx::query_as::<_, InventoryDay>(
            r#"
            INSERT INTO inventory_days (hotel_id, room_type_id, day, total_rooms, reserved_rooms)
            VALUES ($1, $2, $3, $4, 0)
            RETURNING *
            "#,
        )
        .bind(hotel_id)
        .bind(room_type_id)
        .bind(day)
        .bind(total_rooms)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| constraint_conflict(e, || format!("Inventory already exists for {}", day)))
    }

    /// Shift the reserved count by a signed delta, refusing to leave `[0, total]`
    pub async fn adjust_reserved(&self, id: i32, delta: i32) -> AppResult<InventoryDay> {
        if let Some(row) = apply_reserved_delta(&self.pool, id, delta).await? {
            return Ok(row);
        }
        match self.get_view(id).await? {
            Some(row) => Err(AppError::Conflict(format!(
                "Cannot change reserved rooms by {} on {} ({} of {} reserved)",
                delta, row.day, row.reserved_rooms, row.total_rooms
            ))),
            None => Err(AppError::NotFound(format!("Inventory {} not found", id))),
        }
    }

    /// Manual overwrite of both counts; the bounds check constraint still applies
    pub async fn overwrite_counts(&self, id: i32, total_rooms: i32, reserved_rooms: i32) -> AppResult<Option<InventoryDay>> {
        sqlx::query_as::<_, InventoryDay>(
            "UPDATE inventory_days SET total_rooms = $2, reserved_rooms = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(total_rooms)
        .bind(reserved_rooms)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| constraint_conflict(e, || "Reserved rooms cannot exceed total rooms".to_string()))
    }
}

/// Ledger window query shared by pool and transaction callers.
/// `for_update` takes row locks until the surrounding transaction ends.
pub(crate) async fn fetch_range<'e, E>(
    executor: E,
    hotel_id: i32,
    room_type_id: i32,
    start: NaiveDate,
    end: NaiveDate,
    for_update: bool,
) -> Result<Vec<InventoryDay>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query = format!(
        r#"
        SELECT * FROM inventory_days
        WHERE hotel_id = $1 AND room_type_id = $2 AND day >= $3 AND day <= $4
        ORDER BY day
        {}
        "#,
        if for_update { "FOR UPDATE" } else { "" }
    );

    sqlx::query_as::<_, InventoryDay>(&query)
        .bind(hotel_id)
        .bind(room_type_id)
        .bind(start)
        .bind(end)
        .fetch_all(executor)
        .await
}

/// Atomic conditional update: applies only while `0 <= reserved + delta <= total`.
/// Returns `None` when the row is missing or the bound would be crossed.
pub(crate) async fn apply_reserved_delta<'e, E>(executor: E, id: i32, delta: i32) -> Result<Option<InventoryDay>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, InventoryDay>(
        r#"
        UPDATE inventory_days
        SET reserved_rooms = reserved_rooms + $2
        WHERE id = $1
          AND reserved_rooms + $2 >= 0
          AND reserved_rooms + $2 <= total_rooms
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(delta)
    .fetch_optional(executor)
    .await
}
