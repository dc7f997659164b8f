use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    entities::Coordinates,
    error::{upstream_error, Error},
};

const USER_AGENT: &str = concat!("digipin-courier/", env!("CARGO_PKG_VERSION"));

/// Free-text address lookup.
#[async_trait]
pub trait Geocoder {
    /// Best match for `address`, or `None` when the service knows no such place.
    async fn search(&self, address: &str) -> Result<Option<Coordinates>, Error>;
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Place {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Place {
    pub fn coordinates(&self) -> Result<Coordinates, Error> {
        let latitude: f64 = self
            .lat
            .trim()
            .parse()
            .map_err(|_| upstream_error(format!("geocoder returned latitude {:?}", self.lat)))?;
        let longitude: f64 = self
            .lon
            .trim()
            .parse()
            .map_err(|_| upstream_error(format!("geocoder returned longitude {:?}", self.lon)))?;

        Ok(Coordinates::new(latitude, longitude))
    }
}

#[derive(Clone, Debug)]
pub struct Nominatim {
    inner: reqwest::Client,
    base: String,
}

impl Nominatim {
    pub fn new(base: &str) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.geocoder_url)
    }
}

#[async_trait]
impl Geocoder for Nominatim {
    #[tracing::instrument(skip(self))]
    async fn search(&self, address: &str) -> Result<Option<Coordinates>, Error> {
        let url = format!("{}/search", self.base);

        let res = self
            .inner
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[("format", "json"), ("q", address), ("limit", "1")])
            .send()
            .await?;

        let status_code = res.status().as_u16();
        if !res.status().is_success() {
            return Err(upstream_error(format!(
                "Nominatim HTTP error! status: {}",
                status_code
            )));
        }

        let places: Vec<Place> = res.json().await?;

        match places.first() {
            Some(place) => {
                tracing::debug!("matched {:?}", place.display_name);
                Ok(Some(place.coordinates()?))
            }
            None => Ok(None),
        }
    }
}
