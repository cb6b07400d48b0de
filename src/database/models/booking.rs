use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{AppError, AppResult};

/// A booking row. Field names are the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub user_name: String,
    pub event: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_name: String,
    pub event: String,
}

impl NewBooking {
    pub fn new(user_name: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            event: event.into(),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        require_non_empty("user_name", &self.user_name)?;
        require_non_empty("event", &self.event)
    }
}

/// Full replacement of the mutable fields. `is_active: None` keeps the stored flag.
#[derive(Debug, Clone)]
pub struct BookingChanges {
    pub user_name: String,
    pub event: String,
    pub is_active: Option<bool>,
}

impl BookingChanges {
    pub fn validate(&self) -> AppResult<()> {
        require_non_empty("user_name", &self.user_name)?;
        require_non_empty("event", &self.event)
    }
}

fn require_non_empty(field: &'static str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(field, "must not be empty"));
    }
    Ok(())
}
