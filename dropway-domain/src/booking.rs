use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Trip type applied when the customer does not pick one.
pub const DEFAULT_TRIP_TYPE: &str = "oneway";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub name: String,
    pub mobile: u64,
    pub pick_up_location: String,
    pub drop_off_location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pick_up_date_and_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date_and_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_type: Option<String>,
    pub trip_type: String,
    pub created_at: DateTime<Utc>,
}

/// Inbound submission payload for `POST /api/bookings`.
///
/// Required fields are optional at the serde level so that a missing field
/// surfaces as a validation error naming the field, not as a 422 from the
/// JSON deserializer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub name: Option<String>,
    pub mobile: Option<u64>,
    pub pick_up_location: Option<String>,
    pub drop_off_location: Option<String>,
    pub pick_up_date_and_time: Option<DateTime<Utc>>,
    pub return_date_and_time: Option<DateTime<Utc>>,
    pub car_type: Option<String>,
    pub trip_type: Option<String>,
}

#[derive(Debug, Error)]
#[error("missing required field(s): {}", .0.join(", "))]
pub struct MissingFields(pub Vec<&'static str>);

impl BookingRequest {
    /// Required fields that are absent or empty in this payload.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.name.as_deref().map_or(true, |v| v.trim().is_empty()) {
            missing.push("name");
        }
        if self.mobile.map_or(true, |v| v == 0) {
            missing.push("mobile");
        }
        if self
            .pick_up_location
            .as_deref()
            .map_or(true, |v| v.trim().is_empty())
        {
            missing.push("pickUpLocation");
        }
        if self
            .drop_off_location
            .as_deref()
            .map_or(true, |v| v.trim().is_empty())
        {
            missing.push("dropOffLocation");
        }

        missing
    }

    /// Validate and turn this payload into a persistable `Booking` with a
    /// fresh id, a server-side `created_at` and the trip type defaulted.
    pub fn into_booking(self) -> Result<Booking, MissingFields> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(MissingFields(missing));
        }

        Ok(Booking {
            id: Uuid::new_v4(),
            name: self.name.unwrap_or_default(),
            mobile: self.mobile.unwrap_or_default(),
            pick_up_location: self.pick_up_location.unwrap_or_default(),
            drop_off_location: self.drop_off_location.unwrap_or_default(),
            pick_up_date_and_time: self.pick_up_date_and_time,
            return_date_and_time: self.return_date_and_time,
            car_type: self.car_type,
            trip_type: self
                .trip_type
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TRIP_TYPE.to_string()),
            created_at: Utc::now(),
        })
    }
}
