use serde::Deserialize;

use crate::database::{BookingChanges, NewBooking};

// Missing strings default to empty so the store reports which field is wrong.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub event: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingRequest {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub event: String,
    pub is_active: Option<bool>,
}

impl From<CreateBookingRequest> for NewBooking {
    fn from(req: CreateBookingRequest) -> Self {
        NewBooking::new(req.user_name, req.event)
    }
}

impl From<UpdateBookingRequest> for BookingChanges {
    fn from(req: UpdateBookingRequest) -> Self {
        BookingChanges {
            user_name: req.user_name,
            event: req.event,
            is_active: req.is_active,
        }
    }
}
