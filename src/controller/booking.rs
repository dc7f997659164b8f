use super::{Field, MapBookingController, COORDINATE_FIELDS};
use crate::entities::{BookingRequest, EstimateRequest};

const VALID_ESTIMATE_FIRST: &str =
    "Please get a valid estimation before booking. Ensure all location and weight details are present.";

impl MapBookingController {
    /// Books the parcel at the price of the last successful estimate. The form must
    /// still hold the values that estimate priced.
    #[tracing::instrument(skip(self))]
    pub async fn book(&mut self) {
        let quote = match &self.quote {
            Some(quote)
                if self.all_filled(&[
                    Field::PickupDigiPin,
                    Field::DeliveryDigiPin,
                    Field::ParcelWeight,
                ]) =>
            {
                quote.clone()
            }
            _ => {
                self.page.notify(VALID_ESTIMATE_FIRST);
                return;
            }
        };
        if !self.all_filled(&COORDINATE_FIELDS) {
            self.page.notify(
                "Pickup and delivery coordinates are missing. Please select locations on the map again.",
            );
            return;
        }

        let (weight, (pickup, delivery)) =
            match (self.read_number(Field::ParcelWeight), self.read_locations()) {
                (Some(weight), Some(locations)) => (weight, locations),
                _ => {
                    self.page
                        .notify("Parcel Weight and coordinates must be numbers.");
                    return;
                }
            };

        let current = EstimateRequest {
            pickup_digi_pin: self.read(Field::PickupDigiPin),
            delivery_digi_pin: self.read(Field::DeliveryDigiPin),
            weight,
            pickup_lat: pickup.latitude,
            pickup_lng: pickup.longitude,
            delivery_lat: delivery.latitude,
            delivery_lng: delivery.longitude,
        };
        if current != quote.request {
            tracing::warn!("form changed since the last estimate");
            self.page.notify(VALID_ESTIMATE_FIRST);
            return;
        }

        let request = BookingRequest {
            pickup_digi_pin: current.pickup_digi_pin,
            pickup_lat: current.pickup_lat,
            pickup_lng: current.pickup_lng,
            delivery_digi_pin: current.delivery_digi_pin,
            delivery_lat: current.delivery_lat,
            delivery_lng: current.delivery_lng,
            weight: current.weight,
            estimated_price: quote.estimate.price,
        };

        match self.backend.book(&request).await {
            Ok(confirmation) => {
                tracing::info!("booked {}", confirmation.booking_id);
                self.page.set_field(
                    Field::BookingStatus,
                    &format!(
                        "Booking successful! ID: {}. Status: {}",
                        confirmation.booking_id, confirmation.status
                    ),
                );
                self.page.notify(&format!(
                    "Booking successful! Booking ID: {}",
                    confirmation.booking_id
                ));
            }
            Err(err) => {
                tracing::warn!("booking failed: {}", err);
                self.page
                    .set_field(Field::BookingStatus, &format!("Booking failed: {}", err));
                self.page.notify(&format!("Booking failed. {}", err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;
    use super::super::{ERROR_MARKER, NOT_AVAILABLE};
    use super::*;
    use crate::entities::{BookingConfirmation, Coordinates, Estimate, Role};
    use crate::error::rejected_error;

    async fn estimated(price: f64) -> Harness {
        let mut h = Harness::new();
        h.backend.set_digipin(Ok(Some("39J-49L-L8T4".into())));
        h.controller
            .select_location(Role::Pickup, Coordinates::new(28.622788, 77.213033))
            .await
            .unwrap();
        h.backend.set_digipin(Ok(Some("4P3-JK8-52C9".into())));
        h.controller
            .select_location(Role::Delivery, Coordinates::new(12.9716, 77.5946))
            .await
            .unwrap();
        h.page.set(Field::ParcelWeight, "1.5");
        h.backend.set_estimate(Ok(Estimate {
            price,
            distance_km: Some(1740.78),
            notes: None,
            route_path: None,
        }));
        h.controller.request_estimate().await;
        h.backend.clear_calls();
        h
    }

    #[tokio::test]
    async fn no_booking_before_an_estimate() {
        let mut h = Harness::new();
        h.page.set(Field::PickupDigiPin, "39J-49L-L8T4");
        h.page.set(Field::DeliveryDigiPin, "4P3-JK8-52C9");
        h.page.set(Field::ParcelWeight, "1");
        assert_eq!(h.page.value(Field::EstimatedPrice), NOT_AVAILABLE);

        h.controller.book().await;

        assert!(h.backend.calls().is_empty());
        assert_eq!(
            h.page.notifications().last().map(String::as_str),
            Some(VALID_ESTIMATE_FIRST)
        );
    }

    #[tokio::test]
    async fn no_booking_after_a_failed_estimate() {
        let mut h = estimated(4416.95).await;
        h.backend.set_estimate(Err(rejected_error("upstream down")));
        h.controller.request_estimate().await;
        assert_eq!(h.page.value(Field::EstimatedPrice), ERROR_MARKER);
        h.backend.clear_calls();

        h.controller.book().await;

        assert!(h.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn no_booking_without_coordinates() {
        let mut h = estimated(4416.95).await;
        h.page.set(Field::PickupLat, "");

        h.controller.book().await;

        assert!(h.backend.calls().is_empty());
        assert_eq!(
            h.page.notifications().last().map(String::as_str),
            Some("Pickup and delivery coordinates are missing. Please select locations on the map again.")
        );
    }

    #[tokio::test]
    async fn books_at_the_retained_price() {
        let mut h = estimated(4416.949999).await;
        h.page.set(Field::EstimatedPrice, "₹4,416.95");
        h.backend.set_booking(Ok(BookingConfirmation {
            booking_id: "B1".into(),
            status: "CONFIRMED".into(),
        }));

        h.controller.book().await;

        let request = h.backend.last_booking_request().unwrap();
        assert_eq!(request.estimated_price, 4416.949999);
        assert_eq!(request.weight, 1.5);
        assert_eq!(request.pickup_digi_pin, "39J-49L-L8T4");
        assert_eq!(request.delivery_lat, 12.9716);

        let status = h.page.value(Field::BookingStatus);
        assert!(status.contains("B1") && status.contains("CONFIRMED"), "{}", status);
        assert_eq!(
            h.page.notifications().last().map(String::as_str),
            Some("Booking successful! Booking ID: B1")
        );
    }

    #[tokio::test]
    async fn no_booking_after_the_weight_changes() {
        let mut h = estimated(60.0).await;
        h.page.set(Field::ParcelWeight, "500");

        h.controller.book().await;

        assert!(h.backend.calls().is_empty());
        assert!(h.backend.last_booking_request().is_none());
        assert_eq!(
            h.page.notifications().last().map(String::as_str),
            Some(VALID_ESTIMATE_FIRST)
        );
    }

    #[tokio::test]
    async fn no_booking_after_a_code_is_edited() {
        let mut h = estimated(60.0).await;
        h.page.set(Field::DeliveryDigiPin, "4P3-JK8-52CC");

        h.controller.book().await;

        assert!(h.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn reformatted_but_equal_weight_still_books() {
        let mut h = estimated(60.0).await;
        h.page.set(Field::ParcelWeight, " 1.50 ");
        h.backend.set_booking(Ok(BookingConfirmation {
            booking_id: "B2".into(),
            status: "CONFIRMED".into(),
        }));

        h.controller.book().await;

        let request = h.backend.last_booking_request().unwrap();
        assert_eq!(request.weight, 1.5);
        assert_eq!(request.estimated_price, 60.0);
    }

    #[tokio::test]
    async fn failure_is_shown_and_notified() {
        let mut h = estimated(100.0).await;
        h.backend
            .set_booking(Err(rejected_error("HTTP error! status: 502. Response: bad gateway")));

        h.controller.book().await;

        assert_eq!(
            h.page.value(Field::BookingStatus),
            "Booking failed: HTTP error! status: 502. Response: bad gateway"
        );
        assert_eq!(
            h.page.notifications().last().map(String::as_str),
            Some("Booking failed. HTTP error! status: 502. Response: bad gateway")
        );
    }
}
