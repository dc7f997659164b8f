use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;

use crate::config::Config;
use crate::entities::{BookingConfirmation, BookingRequest, Coordinates, Estimate, EstimateRequest};
use crate::error::{rejected_error, Error};

/// The three backend calls the booking page makes.
#[async_trait]
pub trait CourierBackend {
    /// `Ok(None)` when the backend answered but left out the code.
    async fn resolve_digipin(&self, coordinates: Coordinates) -> Result<Option<String>, Error>;
    async fn estimate(&self, request: &EstimateRequest) -> Result<Estimate, Error>;
    async fn book(&self, request: &BookingRequest) -> Result<BookingConfirmation, Error>;
}

#[derive(Clone, Debug)]
pub struct HttpBackend {
    inner: reqwest::Client,
    base: String,
}

#[derive(Deserialize)]
struct DigipinBody {
    digipin: Option<String>,
}

impl HttpBackend {
    /// `base_url` is the server origin, `app_root` the path prefix the application is mounted on.
    pub fn new(base_url: &str, app_root: &str) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base: format!("{}{}", base_url.trim_end_matches('/'), app_root),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.backend_url, &config.app_root)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

#[async_trait]
impl CourierBackend for HttpBackend {
    #[tracing::instrument(skip(self))]
    async fn resolve_digipin(&self, coordinates: Coordinates) -> Result<Option<String>, Error> {
        let url = self.url(&format!(
            "/api/location/digipin?latitude={:.6}&longitude={:.6}",
            coordinates.latitude, coordinates.longitude
        ));
        tracing::debug!("fetching {}", url);

        let res = self.inner.get(url).send().await?;
        let res = ensure_success(res, "error", "Failed to fetch DigiPin").await?;

        let data: DigipinBody = res.json().await?;

        Ok(data.digipin.filter(|digipin| !digipin.is_empty()))
    }

    #[tracing::instrument(skip(self))]
    async fn estimate(&self, request: &EstimateRequest) -> Result<Estimate, Error> {
        let res = self
            .inner
            .post(self.url("/api/courier/estimate"))
            .json(request)
            .send()
            .await?;
        let res = ensure_success(res, "message", "Failed to get estimation").await?;

        Ok(res.json().await?)
    }

    #[tracing::instrument(skip(self))]
    async fn book(&self, request: &BookingRequest) -> Result<BookingConfirmation, Error> {
        let res = self
            .inner
            .post(self.url("/api/courier/book"))
            .json(request)
            .send()
            .await?;
        let res = ensure_success(res, "message", "Booking failed").await?;

        Ok(res.json().await?)
    }
}

async fn ensure_success(res: Response, key: &str, fallback: &str) -> Result<Response, Error> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await?;
    tracing::warn!(status = status.as_u16(), %body, "backend call failed");

    Err(rejected_error(error_message(status, &body, key, fallback)))
}

/// Human-readable message for a failed call: the body's `key` field when it is JSON,
/// the raw body when it is not.
pub fn error_message(status: StatusCode, body: &str, key: &str, fallback: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match value.get(key).and_then(|message| message.as_str()) {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => format!("{}. Status: {}", fallback, status.as_u16()),
        },
        Err(_) => format!("HTTP error! status: {}. Response: {}", status.as_u16(), body),
    }
}
