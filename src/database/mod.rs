pub mod memory;
pub mod models;
pub mod repositories;

use std::sync::Arc;
use std::time::Duration;

use sqlx::Executor;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::{Config, DatabaseConfig};
use crate::error::AppResult;

pub use memory::{MemoryBookingStore, MemoryUserStore};
pub use models::booking::{Booking, BookingChanges, NewBooking};
pub use models::user::User;
pub use repositories::{BookingStore, PgBookingRepository, PgUserRepository, UserStore};

/// Opens the pool and applies the embedded migrations.
pub async fn connect(db: &DatabaseConfig, config: &Config) -> AppResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute("SET application_name = 'booking_backend';")
                    .await?;
                Ok(())
            })
        })
        .connect_with(db.connect_options()?)
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(sqlx::Error::from)?;

    tracing::info!("Connected to PostgreSQL, migrations applied");
    Ok(pool)
}

/// The two stores the service runs on, picked from configuration.
pub struct Stores {
    pub bookings: Arc<dyn BookingStore>,
    pub users: Arc<dyn UserStore>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            bookings: Arc::new(MemoryBookingStore::new()),
            users: Arc::new(MemoryUserStore::new()),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            bookings: Arc::new(PgBookingRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool)),
        }
    }

    pub async fn from_config(config: &Config) -> AppResult<Self> {
        match &config.database {
            Some(db) => Ok(Self::postgres(connect(db, config).await?)),
            None => {
                tracing::warn!("No database configured, bookings and users are kept in memory");
                Ok(Self::in_memory())
            }
        }
    }
}
