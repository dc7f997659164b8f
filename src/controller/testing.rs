use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{Bounds, Element, Field, LayerId, MapBookingController, MapView, Page, Widgets};
use crate::client::CourierBackend;
use crate::entities::{BookingConfirmation, BookingRequest, Coordinates, Estimate, EstimateRequest};
use crate::error::{rejected_error, Error};
use crate::external::nominatim::Geocoder;

#[derive(Default)]
pub struct FakePage {
    fields: Mutex<HashMap<Field, String>>,
    active: Mutex<HashMap<Element, bool>>,
    notifications: Mutex<Vec<String>>,
}

impl FakePage {
    pub fn set(&self, field: Field, value: &str) {
        self.set_field(field, value);
    }

    pub fn value(&self, field: Field) -> String {
        self.field(field)
    }

    pub fn active(&self, element: Element) -> Option<bool> {
        self.active.lock().unwrap().get(&element).copied()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().unwrap().clone()
    }
}

impl Page for FakePage {
    fn notify(&self, message: &str) {
        self.notifications.lock().unwrap().push(message.to_string());
    }

    fn set_field(&self, field: Field, value: &str) {
        self.fields
            .lock()
            .unwrap()
            .insert(field, value.to_string());
    }

    fn field(&self, field: Field) -> String {
        self.fields
            .lock()
            .unwrap()
            .get(&field)
            .cloned()
            .unwrap_or_default()
    }

    fn set_active(&self, element: Element, active: bool) {
        self.active.lock().unwrap().insert(element, active);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Layer {
    Marker { at: Coordinates, label: String },
    Polyline(Vec<Coordinates>),
}

#[derive(Default)]
pub struct FakeMap {
    next_id: AtomicU64,
    layers: Mutex<Vec<(LayerId, Layer)>>,
    view: Mutex<Option<(Coordinates, u8)>>,
    fitted: Mutex<Option<Bounds>>,
}

impl FakeMap {
    fn add(&self, layer: Layer) -> LayerId {
        let id = LayerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.layers.lock().unwrap().push((id, layer));
        id
    }

    pub fn markers_labelled(&self, label: &str) -> Vec<Coordinates> {
        self.layers
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(_, layer)| match layer {
                Layer::Marker { at, label: l } if l == label => Some(*at),
                _ => None,
            })
            .collect()
    }

    pub fn polylines(&self) -> Vec<Vec<Coordinates>> {
        self.layers
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(_, layer)| match layer {
                Layer::Polyline(path) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.lock().unwrap().len()
    }

    pub fn view(&self) -> Option<(Coordinates, u8)> {
        *self.view.lock().unwrap()
    }

    pub fn fitted(&self) -> Option<Bounds> {
        *self.fitted.lock().unwrap()
    }
}

impl MapView for FakeMap {
    fn add_marker(&self, at: Coordinates, label: &str) -> LayerId {
        self.add(Layer::Marker {
            at,
            label: label.to_string(),
        })
    }

    fn add_polyline(&self, path: &[Coordinates]) -> LayerId {
        self.add(Layer::Polyline(path.to_vec()))
    }

    fn remove_layer(&self, layer: LayerId) {
        self.layers.lock().unwrap().retain(|(id, _)| *id != layer);
    }

    fn set_view(&self, center: Coordinates, zoom: u8) {
        *self.view.lock().unwrap() = Some((center, zoom));
    }

    fn fit_bounds(&self, bounds: Bounds) {
        *self.fitted.lock().unwrap() = Some(bounds);
    }
}

/// Answers every call with whatever was last scripted and records what it was asked.
pub struct FakeBackend {
    digipin: Mutex<Result<Option<String>, Error>>,
    estimate: Mutex<Result<Estimate, Error>>,
    booking: Mutex<Result<BookingConfirmation, Error>>,
    calls: Mutex<Vec<String>>,
    estimate_requests: Mutex<Vec<EstimateRequest>>,
    booking_requests: Mutex<Vec<BookingRequest>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            digipin: Mutex::new(Ok(None)),
            estimate: Mutex::new(Err(rejected_error("no estimate scripted"))),
            booking: Mutex::new(Err(rejected_error("no booking scripted"))),
            calls: Mutex::new(Vec::new()),
            estimate_requests: Mutex::new(Vec::new()),
            booking_requests: Mutex::new(Vec::new()),
        }
    }
}

impl FakeBackend {
    pub fn set_digipin(&self, response: Result<Option<String>, Error>) {
        *self.digipin.lock().unwrap() = response;
    }

    pub fn set_estimate(&self, response: Result<Estimate, Error>) {
        *self.estimate.lock().unwrap() = response;
    }

    pub fn set_booking(&self, response: Result<BookingConfirmation, Error>) {
        *self.booking.lock().unwrap() = response;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn last_estimate_request(&self) -> Option<EstimateRequest> {
        self.estimate_requests.lock().unwrap().last().cloned()
    }

    pub fn last_booking_request(&self) -> Option<BookingRequest> {
        self.booking_requests.lock().unwrap().last().cloned()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl CourierBackend for FakeBackend {
    async fn resolve_digipin(&self, _coordinates: Coordinates) -> Result<Option<String>, Error> {
        self.record("digipin");
        self.digipin.lock().unwrap().clone()
    }

    async fn estimate(&self, request: &EstimateRequest) -> Result<Estimate, Error> {
        self.record("estimate");
        self.estimate_requests.lock().unwrap().push(request.clone());
        self.estimate.lock().unwrap().clone()
    }

    async fn book(&self, request: &BookingRequest) -> Result<BookingConfirmation, Error> {
        self.record("book");
        self.booking_requests.lock().unwrap().push(request.clone());
        self.booking.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct FakeGeocoder {
    response: Mutex<Option<Result<Option<Coordinates>, Error>>>,
    queries: Mutex<Vec<String>>,
}

impl FakeGeocoder {
    pub fn set(&self, response: Result<Option<Coordinates>, Error>) {
        *self.response.lock().unwrap() = Some(response);
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn search(&self, address: &str) -> Result<Option<Coordinates>, Error> {
        self.queries.lock().unwrap().push(address.to_string());
        self.response.lock().unwrap().clone().unwrap_or(Ok(None))
    }
}

pub struct Harness {
    pub controller: MapBookingController,
    pub page: Arc<FakePage>,
    pub map: Arc<FakeMap>,
    pub route_map: Arc<FakeMap>,
    pub backend: Arc<FakeBackend>,
    pub geocoder: Arc<FakeGeocoder>,
}

impl Harness {
    pub fn new() -> Self {
        let page = Arc::new(FakePage::default());
        let map = Arc::new(FakeMap::default());
        let route_map = Arc::new(FakeMap::default());
        let backend = Arc::new(FakeBackend::default());
        let geocoder = Arc::new(FakeGeocoder::default());

        let controller = MapBookingController::new(
            backend.clone(),
            geocoder.clone(),
            Widgets {
                page: page.clone(),
                map: map.clone(),
                route_map: route_map.clone(),
            },
        );

        Self {
            controller,
            page,
            map,
            route_map,
            backend,
            geocoder,
        }
    }
}
