//! In-memory stores, used when no database is configured and in tests.
//! Each store keeps its whole collection behind a single readers-writer lock.

pub mod booking;
pub mod user;

pub use booking::MemoryBookingStore;
pub use user::MemoryUserStore;
