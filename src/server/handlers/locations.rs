use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::{Coordinates, DigiPin};
use crate::error::{invalid_input_with, Error};

#[derive(Serialize, Deserialize)]
pub struct DigipinParams {
    latitude: Option<String>,
    longitude: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct DigipinResponse {
    digipin: DigiPin,
}

pub async fn digipin(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<DigipinParams>,
) -> Result<Json<DigipinResponse>, Error> {
    let coordinates = parse_coordinates(params)?;
    let digipin = api.digipin_for(coordinates).await?;

    Ok(DigipinResponse { digipin }.into())
}

fn parse_coordinates(params: DigipinParams) -> Result<Coordinates, Error> {
    let (latitude, longitude) = match (params.latitude, params.longitude) {
        (Some(lat), Some(lng)) if !lat.trim().is_empty() && !lng.trim().is_empty() => (lat, lng),
        _ => return Err(invalid_input_with("Missing latitude or longitude parameters.")),
    };

    let invalid = |_| invalid_input_with("Invalid latitude or longitude format.");
    let latitude: f64 = latitude.trim().parse().map_err(invalid)?;
    let longitude: f64 = longitude.trim().parse().map_err(invalid)?;

    Ok(Coordinates::new(latitude, longitude))
}
