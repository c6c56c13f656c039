use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use dropway_domain::{Booking, BookingStore, StoreError};

/// In-process store with the same uniqueness behavior as the document
/// database. Used by tests and local runs without a database.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Vec<Booking>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn booking_count(&self) -> usize {
        self.inner.lock().map(|b| b.len()).unwrap_or(0)
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn save(&self, booking: Booking) -> Result<Booking, StoreError> {
        let mut bookings = self
            .inner
            .lock()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        if bookings.iter().any(|b| b.mobile == booking.mobile) {
            return Err(StoreError::DuplicateMobile(booking.mobile));
        }

        bookings.push(booking.clone());
        Ok(booking)
    }

    async fn find_by_mobile(&self, mobile: u64) -> Result<Option<Booking>, StoreError> {
        let bookings = self
            .inner
            .lock()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        Ok(bookings.iter().find(|b| b.mobile == mobile).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropway_domain::BookingRequest;

    fn booking(mobile: u64) -> Booking {
        BookingRequest {
            name: Some("Asha".to_string()),
            mobile: Some(mobile),
            pick_up_location: Some("Airport".to_string()),
            drop_off_location: Some("Downtown".to_string()),
            ..Default::default()
        }
        .into_booking()
        .unwrap()
    }

    #[tokio::test]
    async fn saves_and_finds_by_mobile() {
        let store = MemoryStore::new();
        let saved = store.save(booking(9876543210)).await.unwrap();

        let found = store.find_by_mobile(9876543210).await.unwrap().unwrap();
        assert_eq!(found.id, saved.id);
    }

    #[tokio::test]
    async fn second_booking_with_same_mobile_fails() {
        let store = MemoryStore::new();
        store.save(booking(9876543210)).await.unwrap();

        let err = store.save(booking(9876543210)).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateMobile(9876543210)));
        // Exactly one record with that number survives.
        assert_eq!(store.booking_count(), 1);
    }

    #[tokio::test]
    async fn different_mobiles_are_independent() {
        let store = MemoryStore::new();
        store.save(booking(9876543210)).await.unwrap();
        store.save(booking(9876543211)).await.unwrap();

        assert_eq!(store.booking_count(), 2);
    }
}
