use super::{
    format_price, Bounds, Element, Field, MapBookingController, Quote, COORDINATE_FIELDS,
    ERROR_MARKER, MIDPOINT_ZOOM, NOT_AVAILABLE,
};
use crate::entities::{Coordinates, Estimate, EstimateRequest, Role};

const NO_PATH_NOTE: &str = " (Visual route path not available or only points shown)";

impl MapBookingController {
    /// Asks the backend to price the shipment described by the form and draws the
    /// result on the route map.
    #[tracing::instrument(skip(self))]
    pub async fn request_estimate(&mut self) {
        let pickup_digipin = self.read(Field::PickupDigiPin);
        let delivery_digipin = self.read(Field::DeliveryDigiPin);

        if !self.all_filled(&[Field::PickupDigiPin, Field::DeliveryDigiPin, Field::ParcelWeight]) {
            self.page.notify(
                "Please ensure Pickup DigiPin, Delivery DigiPin, and Parcel Weight are filled.",
            );
            return;
        }
        if !self.all_filled(&COORDINATE_FIELDS) {
            self.page
                .notify("Please select pickup and delivery locations on the map.");
            return;
        }

        let weight = match self.read_number(Field::ParcelWeight) {
            Some(weight) => weight,
            None => {
                self.page.notify("Parcel Weight must be a number.");
                return;
            }
        };
        let (pickup, delivery) = match self.read_locations() {
            Some(locations) => locations,
            None => {
                self.page
                    .notify("Please select pickup and delivery locations on the map.");
                return;
            }
        };

        let request = EstimateRequest {
            pickup_digi_pin: pickup_digipin,
            delivery_digi_pin: delivery_digipin,
            weight,
            pickup_lat: pickup.latitude,
            pickup_lng: pickup.longitude,
            delivery_lat: delivery.latitude,
            delivery_lng: delivery.longitude,
        };

        match self.backend.estimate(&request).await {
            Ok(estimate) => {
                tracing::info!(price = estimate.price, "estimate received");
                self.show_estimate(&estimate, pickup, delivery);
                self.quote = Some(Quote { request, estimate });
            }
            Err(err) => {
                tracing::warn!("estimation failed: {}", err);
                self.quote = None;
                self.page.set_field(Field::EstimatedPrice, ERROR_MARKER);
                self.page.set_field(Field::RouteInfo, &err.message);
            }
        }
    }

    fn show_estimate(&mut self, estimate: &Estimate, pickup: Coordinates, delivery: Coordinates) {
        let distance = match estimate.distance_km {
            Some(distance_km) => format!("{:.2} km", distance_km),
            None => NOT_AVAILABLE.to_string(),
        };
        let mut route_info = format!(
            "Distance: {}. {}",
            distance,
            estimate.notes.as_deref().unwrap_or_default()
        )
        .trim_end()
        .to_string();

        self.page
            .set_field(Field::EstimatedPrice, &format_price(estimate.price));
        self.page.set_field(Field::BookingStatus, NOT_AVAILABLE);

        self.overlay.clear(&self.route_map);

        let path = estimate.route();
        if !path.is_empty() {
            self.overlay.polyline = Some(self.route_map.add_polyline(&path));
            self.overlay.markers = vec![
                self.route_map.add_marker(pickup, Role::Pickup.title()),
                self.route_map.add_marker(delivery, Role::Delivery.title()),
            ];
            if let Some(bounds) = Bounds::enclosing(&path) {
                self.route_map.fit_bounds(bounds);
            }
            self.page.set_active(Element::RouteMapLabel, true);
        } else {
            match (self.location(Role::Pickup), self.location(Role::Delivery)) {
                (Some(pickup), Some(delivery)) => {
                    self.overlay.markers = vec![
                        self.route_map.add_marker(pickup, Role::Pickup.title()),
                        self.route_map.add_marker(delivery, Role::Delivery.title()),
                    ];
                    self.route_map
                        .set_view(pickup.midpoint(&delivery), MIDPOINT_ZOOM);
                    self.page.set_active(Element::RouteMapLabel, true);
                }
                _ => self.page.set_active(Element::RouteMapLabel, false),
            }
            route_info.push_str(NO_PATH_NOTE);
        }

        self.page.set_field(Field::RouteInfo, &route_info);
    }
}
