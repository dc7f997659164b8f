use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub pickup_digi_pin: String,
    pub pickup_lat: f64,
    pub pickup_lng: f64,
    pub delivery_digi_pin: String,
    pub delivery_lat: f64,
    pub delivery_lng: f64,
    pub weight: f64,
    pub estimated_price: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
}

impl BookingStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: Uuid,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub details: BookingRequest,
}

impl Booking {
    pub fn new(details: BookingRequest) -> Self {
        Self {
            booking_id: Uuid::new_v4(),
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
            details,
        }
    }
}

/// What a booking client needs back from the booking endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub booking_id: String,
    pub status: String,
}
