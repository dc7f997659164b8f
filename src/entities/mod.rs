mod booking;
mod digipin;
mod estimate;
mod location;

pub use booking::{Booking, BookingConfirmation, BookingRequest, BookingStatus};
pub use digipin::DigiPin;
pub use estimate::{Estimate, EstimateRequest};
pub use location::{Coordinates, Role, RoutePoint};
