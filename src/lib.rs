use std::sync::Arc;

use config::Config;
use database::{BookingStore, Stores};
use infrastructure::Authenticator;

pub mod config;
pub mod database;
pub mod error;
pub mod infrastructure;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod utils;

pub use router::create_router;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub bookings: Arc<dyn BookingStore>,
    pub auth: Arc<Authenticator>,
}

impl AppState {
    pub fn new(config: Config, stores: Stores) -> Self {
        let auth = Arc::new(Authenticator::from_config(stores.users, &config));
        Self {
            config,
            bookings: stores.bookings,
            auth,
        }
    }
}
