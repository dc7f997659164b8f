use super::Engine;

use async_trait::async_trait;

use crate::{
    api::LocationAPI,
    entities::{Coordinates, DigiPin},
    error::{invalid_input_with, Error},
};

#[async_trait]
impl LocationAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn digipin_for(&self, coordinates: Coordinates) -> Result<DigiPin, Error> {
        if !coordinates.is_finite() {
            return Err(invalid_input_with("Invalid latitude or longitude format."));
        }

        let digipin = DigiPin::encode(coordinates.latitude, coordinates.longitude)?;
        tracing::debug!("resolved {}", digipin);

        Ok(digipin)
    }
}
