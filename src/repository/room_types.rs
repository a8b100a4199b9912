//! Room types repository

use sqlx::{Pool, Postgres};

use super::constraint_conflict;
use crate::{
    error::{AppError, AppResult},
    models::room_type::{CreateRoomType, RoomType, UpdateRoomType},
};

const SELECT_WITH_HOTEL: &str = r#"
    SELECT rt.id, rt.name, rt.base_price, rt.hotel_id, h.name AS hotel_name
    FROM room_types rt
    JOIN hotels h ON h.id = rt.hotel_id
"#;

#[derive(Clone)]
pub struct RoomTypesRepository {
    pool: Pool<Postgres>,
}

impl RoomTypesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all room types with their hotel name
    pub async fn list(&self) -> AppResult<Vec<RoomType>> {
        let rows = sqlx::query_as::<_, RoomType>(&format!("{} ORDER BY rt.hotel_id, rt.id", SELECT_WITH_HOTEL))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_by_hotel(&self, hotel_id: i32) -> AppResult<Vec<RoomType>> {
        let rows = sqlx::query_as::<_, RoomType>(&format!(
            "{} WHERE rt.hotel_id = $1 ORDER BY rt.id",
            SELECT_WITH_HOTEL
        ))
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Room types of several hotels, without the joined hotel name
    pub async fn list_for_hotels(&self, hotel_ids: &[i32]) -> AppResult<Vec<RoomType>> {
        let rows = sqlx::query_as::<_, RoomType>(
            "SELECT id, name, base_price, hotel_id FROM room_types WHERE hotel_id = ANY($1) ORDER BY id",
        )
        .bind(hotel_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find(&self, id: i32) -> AppResult<Option<RoomType>> {
        let row = sqlx::query_as::<_, RoomType>(&format!("{} WHERE rt.id = $1", SELECT_WITH_HOTEL))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<RoomType> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room type {} not found", id)))
    }

    pub async fn create(&self, data: &CreateRoomType) -> AppResult<RoomType> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO room_types (name, base_price, hotel_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(data.name.trim())
        .bind(data.base_price.round_dp(2))
        .bind(data.hotel_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| constraint_conflict(e, || format!("Hotel {} does not exist", data.hotel_id)))?;

        self.get_by_id(id).await
    }

    pub async fn update(&self, id: i32, data: &UpdateRoomType) -> AppResult<RoomType> {
        let result = sqlx::query("UPDATE room_types SET name = $2, base_price = $3 WHERE id = $1")
            .bind(id)
            .bind(data.name.trim())
            .bind(data.base_price.round_dp(2))
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Room type {} not found", id)));
        }
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM room_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| constraint_conflict(e, || format!("Room type {} still has inventory or reservations", id)))?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Room type {} not found", id)));
        }
        Ok(())
    }

    /// Move the given room types to `hotel_id`, returning the ids actually moved
    pub async fn assign_to_hotel(&self, hotel_id: i32, room_type_ids: &[i32]) -> AppResult<Vec<i32>> {
        let mut ids: Vec<i32> = sqlx::query_scalar(
            "UPDATE room_types SET hotel_id = $1 WHERE id = ANY($2) RETURNING id",
        )
        .bind(hotel_id)
        .bind(room_type_ids)
        .fetch_all(&self.pool)
        .await?;

        ids.sort_unstable();
        Ok(ids)
    }
}
