use axum::extract::{Extension, Json, Path};
use uuid::Uuid;

use crate::api::DynAPI;
use crate::entities::{Booking, BookingRequest, Estimate, EstimateRequest};
use crate::error::Error;

pub async fn estimate(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<EstimateRequest>,
) -> Result<Json<Estimate>, Error> {
    let estimate = api.create_estimate(params).await?;

    Ok(estimate.into())
}

pub async fn book(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<BookingRequest>,
) -> Result<Json<Booking>, Error> {
    let booking = api.create_booking(params).await?;

    Ok(booking.into())
}

pub async fn find_booking(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, Error> {
    let booking = api.find_booking(id).await?;

    Ok(booking.into())
}
