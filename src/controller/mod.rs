//! Glue between the two maps on the booking page, its form and the courier backend.
//!
//! The controller owns every piece of page state: the map mode, one marker and one
//! location per role, the route overlay on the second map and the last estimate.
//! The page and the maps are reached only through [`Page`] and [`MapView`].

mod booking;
mod estimate;
mod resolver;
mod search;
mod view;

#[cfg(test)]
mod testing;

pub use view::{Bounds, Element, Field, LayerId, MapView, Page};

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::client::{CourierBackend, HttpBackend};
use crate::config::Config;
use crate::entities::{Coordinates, Estimate, EstimateRequest, Role};
use crate::external::nominatim::{Geocoder, Nominatim};

pub type DynBackend = Arc<dyn CourierBackend + Send + Sync>;
pub type DynGeocoder = Arc<dyn Geocoder + Send + Sync>;
pub type DynPage = Arc<dyn Page + Send + Sync>;
pub type DynMap = Arc<dyn MapView + Send + Sync>;

/// Shown in place of a price or booking status that does not exist yet.
pub const NOT_AVAILABLE: &str = "N/A";
/// Shown in place of a price when the last estimate failed.
pub const ERROR_MARKER: &str = "Error";
pub const MISSING_DIGIPIN: &str = "Error: No digipin in response";
pub const CURRENCY: &str = "₹";

pub const HOME: Coordinates = Coordinates {
    latitude: 22.5726,
    longitude: 88.3639,
};
pub const MAP_ZOOM: u8 = 10;
pub const ROUTE_MAP_ZOOM: u8 = 5;
pub const SEARCH_ZOOM: u8 = 15;
pub const MIDPOINT_ZOOM: u8 = 8;

/// Widgets the controller drives.
pub struct Widgets {
    pub page: DynPage,
    pub map: DynMap,
    pub route_map: DynMap,
}

#[derive(Debug, Default)]
struct RouteOverlay {
    polyline: Option<LayerId>,
    markers: Vec<LayerId>,
}

impl RouteOverlay {
    fn is_empty(&self) -> bool {
        self.polyline.is_none() && self.markers.is_empty()
    }

    fn clear(&mut self, map: &DynMap) {
        if let Some(polyline) = self.polyline.take() {
            map.remove_layer(polyline);
        }
        for marker in self.markers.drain(..) {
            map.remove_layer(marker);
        }
    }
}

/// A successful estimate together with the form values it priced.
#[derive(Clone, Debug)]
struct Quote {
    request: EstimateRequest,
    estimate: Estimate,
}

pub struct MapBookingController {
    backend: DynBackend,
    geocoder: DynGeocoder,
    page: DynPage,
    map: DynMap,
    route_map: DynMap,
    mode: Role,
    markers: HashMap<Role, LayerId>,
    locations: HashMap<Role, Coordinates>,
    overlay: RouteOverlay,
    quote: Option<Quote>,
}

impl MapBookingController {
    /// Centres both maps, hides the route label and enters pickup mode.
    pub fn new(backend: DynBackend, geocoder: DynGeocoder, widgets: Widgets) -> Self {
        let Widgets {
            page,
            map,
            route_map,
        } = widgets;

        map.set_view(HOME, MAP_ZOOM);
        route_map.set_view(HOME, ROUTE_MAP_ZOOM);
        page.set_active(Element::RouteMapLabel, false);
        page.set_field(Field::EstimatedPrice, NOT_AVAILABLE);
        page.set_field(Field::BookingStatus, NOT_AVAILABLE);

        let mut controller = Self {
            backend,
            geocoder,
            page,
            map,
            route_map,
            mode: Role::Pickup,
            markers: HashMap::new(),
            locations: HashMap::new(),
            overlay: RouteOverlay::default(),
            quote: None,
        };
        controller.set_mode(Role::Pickup);

        controller
    }

    /// Talks to the backend and geocoder named in `config`.
    pub fn from_config(config: &Config, widgets: Widgets) -> Self {
        Self::new(
            Arc::new(HttpBackend::from_config(config)),
            Arc::new(Nominatim::from_config(config)),
            widgets,
        )
    }

    pub fn mode(&self) -> Role {
        self.mode
    }

    pub fn location(&self, role: Role) -> Option<Coordinates> {
        self.locations.get(&role).copied()
    }

    /// The estimate a booking would be placed at.
    pub fn estimate(&self) -> Option<&Estimate> {
        self.quote.as_ref().map(|quote| &quote.estimate)
    }

    pub fn set_mode(&mut self, mode: Role) {
        self.mode = mode;

        self.page.set_active(Element::mode_button(mode), true);
        let other = match mode {
            Role::Pickup => Role::Delivery,
            Role::Delivery => Role::Pickup,
        };
        self.page.set_active(Element::mode_button(other), false);

        self.page.notify(&format!(
            "Map mode: SET {}. Click on the map to select the {} location.",
            mode.name().to_uppercase(),
            mode.name()
        ));
    }

    /// A click on the primary map selects a location for the current mode.
    pub fn handle_map_click(&mut self, at: Coordinates) -> JoinHandle<()> {
        self.select_location(self.mode, at)
    }

    /// Moves the role's marker to `at`, fills in its coordinates and starts resolving
    /// its DigiPin.
    ///
    /// The resolution runs as its own task, so this never waits on the backend. The
    /// handle lets callers wait for the code field to settle. Must be called from
    /// within a tokio runtime.
    #[tracing::instrument(skip(self))]
    pub fn select_location(&mut self, role: Role, at: Coordinates) -> JoinHandle<()> {
        if let Some(marker) = self.markers.remove(&role) {
            self.map.remove_layer(marker);
        }
        let marker = self
            .map
            .add_marker(at, &format!("{} Location", role.title()));
        self.markers.insert(role, marker);

        self.page
            .set_field(Field::latitude(role), &format!("{:.6}", at.latitude));
        self.page
            .set_field(Field::longitude(role), &format!("{:.6}", at.longitude));
        self.locations.insert(role, at);

        self.discard_estimate();

        tokio::spawn(resolver::resolve_digipin(
            self.backend.clone(),
            self.page.clone(),
            role,
            at,
        ))
    }

    /// Forgets the last estimate and takes its price and route off the page.
    fn discard_estimate(&mut self) {
        if self.quote.take().is_some() {
            self.page.set_field(Field::EstimatedPrice, NOT_AVAILABLE);
            self.page.set_field(Field::RouteInfo, "");
        }
        if !self.overlay.is_empty() {
            self.overlay.clear(&self.route_map);
            self.page.set_active(Element::RouteMapLabel, false);
        }
    }

    fn read(&self, field: Field) -> String {
        self.page.field(field).trim().to_string()
    }

    fn all_filled(&self, fields: &[Field]) -> bool {
        fields.iter().all(|field| !self.read(*field).is_empty())
    }

    fn read_number(&self, field: Field) -> Option<f64> {
        self.read(field)
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    /// Pickup and delivery coordinates as currently shown in the form.
    fn read_locations(&self) -> Option<(Coordinates, Coordinates)> {
        let pickup = Coordinates::new(
            self.read_number(Field::PickupLat)?,
            self.read_number(Field::PickupLng)?,
        );
        let delivery = Coordinates::new(
            self.read_number(Field::DeliveryLat)?,
            self.read_number(Field::DeliveryLng)?,
        );

        Some((pickup, delivery))
    }
}

const COORDINATE_FIELDS: [Field; 4] = [
    Field::PickupLat,
    Field::PickupLng,
    Field::DeliveryLat,
    Field::DeliveryLng,
];

pub fn format_price(price: f64) -> String {
    format!("{}{:.2}", CURRENCY, price)
}
