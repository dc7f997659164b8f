use super::Engine;

use async_trait::async_trait;

use crate::{
    api::EstimateAPI,
    entities::{DigiPin, Estimate, EstimateRequest},
    error::{invalid_input_with, Error},
};

const ESTIMATE_NOTES: &str = "Estimation based on approximate distance and weight.";

#[async_trait]
impl EstimateAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_estimate(&self, request: EstimateRequest) -> Result<Estimate, Error> {
        if !request.weight.is_finite() || request.weight <= 0.0 {
            return Err(invalid_input_with(format!(
                "Weight must be a positive number. Got: {}",
                request.weight
            )));
        }

        let (pickup, delivery) = (request.pickup(), request.delivery());
        if !pickup.is_finite() || !delivery.is_finite() {
            return Err(invalid_input_with("Invalid latitude or longitude format."));
        }

        DigiPin::decode(&request.pickup_digi_pin)?;
        DigiPin::decode(&request.delivery_digi_pin)?;

        let distance_km = pickup.distance_km(&delivery);
        let price = self.pricing.price(distance_km, request.weight);

        tracing::info!(distance_km, price, "estimate created");

        Ok(Estimate {
            price,
            distance_km: Some(distance_km),
            notes: Some(ESTIMATE_NOTES.into()),
            route_path: Some(vec![pickup.into(), delivery.into()]),
        })
    }
}
