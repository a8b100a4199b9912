//! Hotels repository

use std::collections::HashMap;

use sqlx::{Pool, Postgres};

use super::{constraint_conflict, room_types::RoomTypesRepository};
use crate::{
    error::{AppError, AppResult},
    models::hotel::{Hotel, HotelInput},
};

#[derive(Clone)]
pub struct HotelsRepository {
    pool: Pool<Postgres>,
    room_types: RoomTypesRepository,
}

impl HotelsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            room_types: RoomTypesRepository::new(pool.clone()),
            pool,
        }
    }

    /// List all hotels with their room types
    pub async fn list(&self) -> AppResult<Vec<Hotel>> {
        let hotels = sqlx::query_as::<_, Hotel>("SELECT * FROM hotels ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        self.with_room_types(hotels).await
    }

    /// List hotels accepting reservations
    pub async fn list_active(&self) -> AppResult<Vec<Hotel>> {
        let hotels = sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE active = TRUE ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        self.with_room_types(hotels).await
    }

    /// Search by name or address (case-insensitive), ordered by name
    pub async fn page(&self, search: Option<&str>, limit: i64, offset: i64) -> AppResult<(Vec<Hotel>, i64)> {
        let pattern = search.and_then(contains_pattern);

        let where_clause = if pattern.is_some() {
            r"WHERE LOWER(name) LIKE $1 ESCAPE '\' OR LOWER(address) LIKE $1 ESCAPE '\'"
        } else {
            ""
        };

        let count_q = format!("SELECT COUNT(*) FROM hotels {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_q);
        if let Some(ref p) = pattern {
            count_builder = count_builder.bind(p);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_q = format!(
            "SELECT * FROM hotels {} ORDER BY name LIMIT {} OFFSET {}",
            where_clause, limit, offset
        );
        let mut builder = sqlx::query_as::<_, Hotel>(&select_q);
        if let Some(ref p) = pattern {
            builder = builder.bind(p);
        }
        let hotels = builder.fetch_all(&self.pool).await?;

        Ok((self.with_room_types(hotels).await?, total))
    }

    /// Hotel row only, no room types
    pub async fn find(&self, id: i32) -> AppResult<Option<Hotel>> {
        let hotel = sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(hotel)
    }

    /// Get hotel by ID with its room types
    pub async fn get_by_id(&self, id: i32) -> AppResult<Hotel> {
        let hotel = self
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Hotel {} not found", id)))?;
        let mut hotels = self.with_room_types(vec![hotel]).await?;
        hotels
            .pop()
            .ok_or_else(|| AppError::Internal(format!("Hotel {} vanished while loading", id)))
    }

    pub async fn create(&self, data: &HotelInput) -> AppResult<Hotel> {
        let hotel = sqlx::query_as::<_, Hotel>(
            r#"
            INSERT INTO hotels (name, address, category, active)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(data.name.trim())
        .bind(data.address.trim())
        .bind(data.category)
        .bind(data.active)
        .fetch_one(&self.pool)
        .await?;
        Ok(hotel)
    }

    pub async fn update(&self, id: i32, data: &HotelInput) -> AppResult<Hotel> {
        sqlx::query_as::<_, Hotel>(
            r#"
            UPDATE hotels SET name = $2, address = $3, category = $4, active = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.name.trim())
        .bind(data.address.trim())
        .bind(data.category)
        .bind(data.active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Hotel {} not found", id)))?;

        self.get_by_id(id).await
    }

    /// Delete a hotel. Its room types go with it; inventory or reservations block the delete.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM hotels WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                constraint_conflict(e, || {
                    format!("Hotel {} still has inventory or reservations; deactivate it instead", id)
                })
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Hotel {} not found", id)));
        }
        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hotels")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn with_room_types(&self, mut hotels: Vec<Hotel>) -> AppResult<Vec<Hotel>> {
        if hotels.is_empty() {
            return Ok(hotels);
        }

        let ids: Vec<i32> = hotels.iter().map(|h| h.id).collect();
        let mut by_hotel: HashMap<i32, Vec<_>> = HashMap::new();
        for room_type in self.room_types.list_for_hotels(&ids).await? {
            by_hotel.entry(room_type.hotel_id).or_default().push(room_type);
        }

        for hotel in &mut hotels {
            hotel.room_types = by_hotel.remove(&hotel.id).unwrap_or_default();
        }
        Ok(hotels)
    }
}

/// Lower-cased `%term%` pattern with LIKE wildcards in the term escaped
fn contains_pattern(term: &str) -> Option<String> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }

    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("  Ritz "), Some("%ritz%".to_string()));
        assert_eq!(contains_pattern("100%_off"), Some(r"%100\%\_off%".to_string()));
        assert_eq!(contains_pattern(r"a\b"), Some(r"%a\\b%".to_string()));
        assert_eq!(contains_pattern("   "), None);
    }
}
