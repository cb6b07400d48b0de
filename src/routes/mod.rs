pub mod booking;
pub mod user;

pub async fn hello() -> &'static str {
    "Welcome to the Booking App!"
}
