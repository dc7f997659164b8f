use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    pub fn midpoint(&self, other: &Coordinates) -> Coordinates {
        Coordinates::new(
            (self.latitude + other.latitude) / 2.0,
            (self.longitude + other.longitude) / 2.0,
        )
    }

    /// Great-circle distance in kilometres.
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        const EARTH_RADIUS_KM: f64 = 6371.0;

        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + self.latitude.to_radians().cos()
                * other.latitude.to_radians().cos()
                * (d_lon / 2.0).sin().powi(2);

        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

impl From<RoutePoint> for Coordinates {
    fn from(point: RoutePoint) -> Self {
        Coordinates::new(point.lat, point.lng)
    }
}

/// A point of a route path as it travels over the wire.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub lat: f64,
    pub lng: f64,
}

impl From<Coordinates> for RoutePoint {
    fn from(coordinates: Coordinates) -> Self {
        Self {
            lat: coordinates.latitude,
            lng: coordinates.longitude,
        }
    }
}

/// Which end of a shipment a location belongs to. Also the map selection mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Pickup,
    Delivery,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Delivery => "delivery",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Pickup => "Pickup",
            Self::Delivery => "Delivery",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
