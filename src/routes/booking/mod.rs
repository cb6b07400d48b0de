mod handler;
mod model;

pub use handler::{create_booking, delete_booking, get_booking, list_bookings, update_booking};
pub use model::{CreateBookingRequest, UpdateBookingRequest};
