use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::models::booking::{Booking, BookingChanges, NewBooking};
use crate::database::repositories::BookingStore;
use crate::error::{AppError, AppResult};

#[derive(Default)]
struct Inner {
    bookings: BTreeMap<i64, Booking>,
    // Last id handed out. Only grows, so deleted ids are never reused.
    last_id: i64,
}

#[derive(Default)]
pub struct MemoryBookingStore {
    inner: RwLock<Inner>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("booking {} not found", id))
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn create(&self, booking: NewBooking) -> AppResult<Booking> {
        booking.validate()?;

        let mut guard = self.inner.write().await;
        let inner = &mut *guard;
        let id = inner.last_id + 1;
        let now = Utc::now();
        let record = Booking {
            id,
            user_name: booking.user_name,
            event: booking.event,
            created_at: now,
            updated_at: now,
            is_active: true,
        };

        match inner.bookings.entry(id) {
            Entry::Occupied(_) => Err(AppError::Conflict(format!("booking {} already exists", id))),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                inner.last_id = id;
                tracing::debug!("Inserted booking {}", id);
                Ok(record)
            }
        }
    }

    async fn get(&self, id: i64) -> AppResult<Booking> {
        self.inner
            .read()
            .await
            .bookings
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn list(&self) -> AppResult<Vec<Booking>> {
        Ok(self.inner.read().await.bookings.values().cloned().collect())
    }

    async fn update(&self, id: i64, changes: BookingChanges) -> AppResult<Booking> {
        changes.validate()?;

        let mut inner = self.inner.write().await;
        let record = inner.bookings.get_mut(&id).ok_or_else(|| not_found(id))?;
        record.user_name = changes.user_name;
        record.event = changes.event;
        if let Some(is_active) = changes.is_active {
            record.is_active = is_active;
        }
        record.updated_at = Utc::now();

        Ok(record.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.inner
            .write()
            .await
            .bookings
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }
}
