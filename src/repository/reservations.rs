//! Reservations repository

use sqlx::{PgExecutor, Pool, Postgres};

use crate::{
    error::AppResult,
    models::reservation::{NewReservation, ReservationDetails, ReservationStatus},
};

const SELECT_DETAILS: &str = r#"
    SELECT r.id, r.hotel_id, r.room_type_id, r.guest_name, r.check_in, r.check_out,
           r.rooms, r.status, r.total_amount, r.created_at,
           h.name AS hotel_name, rt.name AS room_type_name,
           (r.check_out - r.check_in) AS nights
    FROM reservations r
    JOIN hotels h ON h.id = r.hotel_id
    JOIN room_types rt ON rt.id = r.room_type_id
"#;

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// All reservations, newest first
    pub async fn list(&self) -> AppResult<Vec<ReservationDetails>> {
        let rows = sqlx::query_as::<_, ReservationDetails>(&format!(
            "{} ORDER BY r.created_at DESC, r.id DESC",
            SELECT_DETAILS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_hotel(&self, hotel_id: i32) -> AppResult<Vec<ReservationDetails>> {
        let rows = sqlx::query_as::<_, ReservationDetails>(&format!(
            "{} WHERE r.hotel_id = $1 ORDER BY r.created_at DESC, r.id DESC",
            SELECT_DETAILS
        ))
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> AppResult<Option<ReservationDetails>> {
        let row = sqlx::query_as::<_, ReservationDetails>(&format!("{} WHERE r.id = $1", SELECT_DETAILS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Unconditional status overwrite
    pub async fn set_status(&self, id: i32, status: ReservationStatus) -> AppResult<Option<ReservationDetails>> {
        let updated = sqlx::query("UPDATE reservations SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;
        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(id).await
    }
}

/// Insert a confirmed reservation, returning its id
pub(crate) async fn insert<'e, E>(executor: E, reservation: &NewReservation) -> Result<i32, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO reservations (
            hotel_id, room_type_id, guest_name, check_in, check_out,
            rooms, status, total_amount, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id
        "#,
    )
    .bind(reservation.hotel_id)
    .bind(reservation.room_type_id)
    .bind(&reservation.guest_name)
    .bind(reservation.check_in)
    .bind(reservation.check_out)
    .bind(reservation.rooms)
    .bind(ReservationStatus::Confirmed)
    .bind(reservation.total_amount)
    .bind(reservation.created_at)
    .fetch_one(executor)
    .await
}
