//! Storage seams. Handlers and the authenticator hold these as `Arc<dyn _>`
//! so the in-memory and PostgreSQL backends are interchangeable.

pub mod booking;
pub mod user;

use async_trait::async_trait;

use crate::database::models::booking::{Booking, BookingChanges, NewBooking};
use crate::database::models::user::User;
use crate::error::AppResult;

pub use booking::PgBookingRepository;
pub use user::PgUserRepository;

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Validates, assigns a fresh id and inserts with `is_active = true`.
    async fn create(&self, booking: NewBooking) -> AppResult<Booking>;

    async fn get(&self, id: i64) -> AppResult<Booking>;

    async fn list(&self) -> AppResult<Vec<Booking>>;

    /// Validates before looking the record up; `created_at` is never touched.
    async fn update(&self, id: i64, changes: BookingChanges) -> AppResult<Booking>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Credential store. Only the authenticator talks to it.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Conflict` when the username is taken.
    async fn create(&self, username: &str, password_hash: &str) -> AppResult<User>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;
}
