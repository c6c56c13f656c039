use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use dropway_domain::{Booking, BookingStore, StoreError};

const COLLECTION: &str = "bookings";
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Persisted shape of a booking. The booking id is the document identity,
/// so the collection never grows a second, auto-generated key.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    name: String,
    mobile: u64,
    pick_up_location: String,
    drop_off_location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pick_up_date_and_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    return_date_and_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    car_type: Option<String>,
    trip_type: String,
    created_at: DateTime<Utc>,
}

impl From<Booking> for BookingDocument {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            name: booking.name,
            mobile: booking.mobile,
            pick_up_location: booking.pick_up_location,
            drop_off_location: booking.drop_off_location,
            pick_up_date_and_time: booking.pick_up_date_and_time,
            return_date_and_time: booking.return_date_and_time,
            car_type: booking.car_type,
            trip_type: booking.trip_type,
            created_at: booking.created_at,
        }
    }
}

impl From<BookingDocument> for Booking {
    fn from(document: BookingDocument) -> Self {
        Self {
            id: document.id,
            name: document.name,
            mobile: document.mobile,
            pick_up_location: document.pick_up_location,
            drop_off_location: document.drop_off_location,
            pick_up_date_and_time: document.pick_up_date_and_time,
            return_date_and_time: document.return_date_and_time,
            car_type: document.car_type,
            trip_type: document.trip_type,
            created_at: document.created_at,
        }
    }
}

/// Document-store implementation of `BookingStore`. The connection is
/// established once at process start and shared across requests.
pub struct MongoStore {
    collection: Collection<BookingDocument>,
}

impl MongoStore {
    /// Connect and make sure the unique index on `mobile` exists, so a
    /// duplicate contact number fails at the persistence layer.
    pub async fn connect(url: &str, db_name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(url)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let collection = client
            .database(db_name)
            .collection::<BookingDocument>(COLLECTION);

        let index = IndexModel::builder()
            .keys(doc! { "mobile": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        collection
            .create_index(index, None)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        info!(database = db_name, collection = COLLECTION, "connected to booking store");
        Ok(Self { collection })
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        &*err.kind,
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

#[async_trait]
impl BookingStore for MongoStore {
    async fn save(&self, booking: Booking) -> Result<Booking, StoreError> {
        let document = BookingDocument::from(booking.clone());
        match self.collection.insert_one(&document, None).await {
            Ok(_) => Ok(booking),
            Err(e) if is_duplicate_key(&e) => Err(StoreError::DuplicateMobile(booking.mobile)),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    async fn find_by_mobile(&self, mobile: u64) -> Result<Option<Booking>, StoreError> {
        self.collection
            .find_one(doc! { "mobile": mobile as i64 }, None)
            .await
            .map(|found| found.map(Booking::from))
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}
