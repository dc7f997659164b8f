mod booking_api;
mod estimate_api;
mod location_api;

use std::collections::HashMap;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{api::API, entities::Booking};

/// Tariff applied to every estimate.
#[derive(Clone, Debug)]
pub struct Pricing {
    pub base_fare: f64,
    pub per_km: f64,
    pub per_kg: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            base_fare: 50.0,
            per_km: 2.5,
            per_kg: 10.0,
        }
    }
}

impl Pricing {
    pub fn price(&self, distance_km: f64, weight: f64) -> f64 {
        self.base_fare + distance_km * self.per_km + weight * self.per_kg
    }
}

#[derive(Debug, Default)]
pub struct Engine {
    pricing: Pricing,
    bookings: Mutex<HashMap<Uuid, Booking>>,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(pricing: Pricing) -> Self {
        Self {
            pricing,
            bookings: Mutex::new(HashMap::new()),
        }
    }
}

impl API for Engine {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tariff() {
        let pricing = Pricing::default();
        assert_eq!(pricing.price(0.0, 0.0), 50.0);
        assert_eq!(pricing.price(10.0, 2.0), 50.0 + 25.0 + 20.0);
    }
}
