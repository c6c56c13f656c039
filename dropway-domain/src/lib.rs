pub mod booking;
pub mod store;

pub use booking::{Booking, BookingRequest, MissingFields, DEFAULT_TRIP_TYPE};
pub use store::{BookingStore, StoreError};
