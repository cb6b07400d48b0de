use async_trait::async_trait;
use sqlx::PgPool;

use super::BookingStore;
use crate::database::models::booking::{Booking, BookingChanges, NewBooking};
use crate::error::{AppError, AppResult};

const BOOKING_COLUMNS: &str = "id, user_name, event, created_at, updated_at, is_active";

/// Bookings in PostgreSQL. Each operation is one statement, so a cancelled
/// request never leaves a partial row behind.
#[derive(Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("booking {} not found", id))
}

#[async_trait]
impl BookingStore for PgBookingRepository {
    async fn create(&self, booking: NewBooking) -> AppResult<Booking> {
        booking.validate()?;

        let created = sqlx::query_as::<_, Booking>(&format!(
            r#"
            INSERT INTO bookings (user_name, event, created_at, updated_at, is_active)
            VALUES ($1, $2, NOW(), NOW(), TRUE)
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(&booking.user_name)
        .bind(&booking.event)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("booking id already exists".into())
            }
            other => other.into(),
        })?;

        tracing::debug!("Inserted booking {}", created.id);
        Ok(created)
    }

    async fn get(&self, id: i64) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(id))
    }

    async fn list(&self) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn update(&self, id: i64, changes: BookingChanges) -> AppResult<Booking> {
        changes.validate()?;

        sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings
            SET user_name = $2,
                event = $3,
                is_active = COALESCE($4, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.user_name)
        .bind(&changes.event)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
