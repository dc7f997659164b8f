use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::BookingAPI,
    entities::{Booking, BookingRequest, DigiPin},
    error::{invalid_input_with, not_found_error, Error},
};

#[async_trait]
impl BookingAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_booking(&self, request: BookingRequest) -> Result<Booking, Error> {
        if !request.weight.is_finite() || request.weight <= 0.0 {
            return Err(invalid_input_with(format!(
                "Weight must be a positive number. Got: {}",
                request.weight
            )));
        }
        if !request.estimated_price.is_finite() || request.estimated_price <= 0.0 {
            return Err(invalid_input_with(
                "A valid estimated price is required to book a parcel.",
            ));
        }

        DigiPin::decode(&request.pickup_digi_pin)?;
        DigiPin::decode(&request.delivery_digi_pin)?;

        let booking = Booking::new(request);

        self.bookings
            .lock()
            .await
            .insert(booking.booking_id, booking.clone());

        tracing::info!("created booking {}", booking.booking_id);

        Ok(booking)
    }

    #[tracing::instrument(skip(self))]
    async fn find_booking(&self, id: Uuid) -> Result<Booking, Error> {
        let bookings = self.bookings.lock().await;

        bookings.get(&id).cloned().ok_or_else(not_found_error)
    }
}
