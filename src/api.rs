use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{Booking, BookingRequest, Coordinates, DigiPin, Estimate, EstimateRequest};
use crate::error::Error;

#[async_trait]
pub trait LocationAPI {
    async fn digipin_for(&self, coordinates: Coordinates) -> Result<DigiPin, Error>;
}

#[async_trait]
pub trait EstimateAPI {
    async fn create_estimate(&self, request: EstimateRequest) -> Result<Estimate, Error>;
}

#[async_trait]
pub trait BookingAPI {
    async fn create_booking(&self, request: BookingRequest) -> Result<Booking, Error>;
    async fn find_booking(&self, id: Uuid) -> Result<Booking, Error>;
}

pub trait API: LocationAPI + EstimateAPI + BookingAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
