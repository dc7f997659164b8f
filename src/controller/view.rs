use crate::entities::{Coordinates, Role};

/// Form inputs and text displays the controller reads and writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    PickupAddress,
    DeliveryAddress,
    PickupDigiPin,
    DeliveryDigiPin,
    PickupLat,
    PickupLng,
    DeliveryLat,
    DeliveryLng,
    ParcelWeight,
    EstimatedPrice,
    RouteInfo,
    BookingStatus,
}

impl Field {
    pub fn address(role: Role) -> Self {
        match role {
            Role::Pickup => Self::PickupAddress,
            Role::Delivery => Self::DeliveryAddress,
        }
    }

    pub fn digipin(role: Role) -> Self {
        match role {
            Role::Pickup => Self::PickupDigiPin,
            Role::Delivery => Self::DeliveryDigiPin,
        }
    }

    pub fn latitude(role: Role) -> Self {
        match role {
            Role::Pickup => Self::PickupLat,
            Role::Delivery => Self::DeliveryLat,
        }
    }

    pub fn longitude(role: Role) -> Self {
        match role {
            Role::Pickup => Self::PickupLng,
            Role::Delivery => Self::DeliveryLng,
        }
    }

    /// Element id on the booking page.
    pub fn id(&self) -> &'static str {
        match self {
            Self::PickupAddress => "pickupAddress",
            Self::DeliveryAddress => "deliveryAddress",
            Self::PickupDigiPin => "pickupDigiPin",
            Self::DeliveryDigiPin => "deliveryDigiPin",
            Self::PickupLat => "pickupLat",
            Self::PickupLng => "pickupLng",
            Self::DeliveryLat => "deliveryLat",
            Self::DeliveryLng => "deliveryLng",
            Self::ParcelWeight => "parcelWeight",
            Self::EstimatedPrice => "estimatedPrice",
            Self::RouteInfo => "routeInfo",
            Self::BookingStatus => "bookingStatus",
        }
    }
}

/// Page elements that are switched on and off rather than written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    PickupModeButton,
    DeliveryModeButton,
    RouteMapLabel,
}

impl Element {
    pub fn mode_button(role: Role) -> Self {
        match role {
            Role::Pickup => Self::PickupModeButton,
            Role::Delivery => Self::DeliveryModeButton,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::PickupModeButton => "setPickupModeBtn",
            Self::DeliveryModeButton => "setDeliveryModeBtn",
            Self::RouteMapLabel => "routeMapLabel",
        }
    }
}

/// The booking page as the controller sees it.
pub trait Page {
    /// Blocking message to the user.
    fn notify(&self, message: &str);
    fn set_field(&self, field: Field, value: &str);
    fn field(&self, field: Field) -> String;
    /// Active styling for mode buttons, visibility for labels.
    fn set_active(&self, element: Element, active: bool);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub south_west: Coordinates,
    pub north_east: Coordinates,
}

impl Bounds {
    /// Smallest box holding every point, `None` for an empty path.
    pub fn enclosing(points: &[Coordinates]) -> Option<Self> {
        let first = points.first()?;

        let bounds = points.iter().skip(1).fold(
            Bounds {
                south_west: *first,
                north_east: *first,
            },
            |bounds, point| Bounds {
                south_west: Coordinates::new(
                    bounds.south_west.latitude.min(point.latitude),
                    bounds.south_west.longitude.min(point.longitude),
                ),
                north_east: Coordinates::new(
                    bounds.north_east.latitude.max(point.latitude),
                    bounds.north_east.longitude.max(point.longitude),
                ),
            },
        );

        Some(bounds)
    }
}

/// An interactive map widget.
pub trait MapView {
    fn add_marker(&self, at: Coordinates, label: &str) -> LayerId;
    fn add_polyline(&self, path: &[Coordinates]) -> LayerId;
    fn remove_layer(&self, layer: LayerId);
    fn set_view(&self, center: Coordinates, zoom: u8);
    fn fit_bounds(&self, bounds: Bounds);
}
