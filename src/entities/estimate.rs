use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, RoutePoint};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub pickup_digi_pin: String,
    pub delivery_digi_pin: String,
    pub weight: f64,
    pub pickup_lat: f64,
    pub pickup_lng: f64,
    pub delivery_lat: f64,
    pub delivery_lng: f64,
}

impl EstimateRequest {
    pub fn pickup(&self) -> Coordinates {
        Coordinates::new(self.pickup_lat, self.pickup_lng)
    }

    pub fn delivery(&self) -> Coordinates {
        Coordinates::new(self.delivery_lat, self.delivery_lng)
    }
}

/// Price quote for a shipment. Everything but the price is optional on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_path: Option<Vec<RoutePoint>>,
}

impl Estimate {
    pub fn route(&self) -> Vec<Coordinates> {
        self.route_path
            .iter()
            .flatten()
            .map(|point| Coordinates::from(*point))
            .collect()
    }
}
