use tokio::task::JoinHandle;

use super::{Field, MapBookingController, SEARCH_ZOOM};
use crate::entities::Role;

impl MapBookingController {
    /// Looks up the address typed for `role` and selects it as if it had been clicked.
    ///
    /// Returns the pending DigiPin resolution when a location was selected.
    #[tracing::instrument(skip(self))]
    pub async fn search_address(&mut self, role: Role) -> Option<JoinHandle<()>> {
        let address = self.read(Field::address(role));
        if address.is_empty() {
            self.page
                .notify("Please enter an address to find on the map.");
            return None;
        }

        match self.geocoder.search(&address).await {
            Ok(Some(at)) => {
                self.map.set_view(at, SEARCH_ZOOM);
                Some(self.select_location(role, at))
            }
            Ok(None) => {
                self.page.notify("Address not found by geocoding service.");
                None
            }
            Err(err) => {
                tracing::warn!("geocoding failed: {}", err);
                self.page
                    .notify(&format!("Error finding address on map: {}", err));
                None
            }
        }
    }
}
