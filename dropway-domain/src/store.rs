use async_trait::async_trait;
use thiserror::Error;

use crate::booking::Booking;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a booking with mobile {0} already exists")]
    DuplicateMobile(u64),
    #[error("booking store error: {0}")]
    Backend(String),
}

/// Persistence seam for bookings. The production implementation writes to a
/// document database; tests use an in-memory implementation.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Persist a new booking. Fails with `DuplicateMobile` when a booking
    /// with the same contact number already exists.
    async fn save(&self, booking: Booking) -> Result<Booking, StoreError>;

    /// Look up a booking by its contact number. The request path never
    /// reads back saved bookings; this is the retrieval surface of the
    /// store, exercised by tests verifying the uniqueness behavior.
    async fn find_by_mobile(&self, mobile: u64) -> Result<Option<Booking>, StoreError>;
}
