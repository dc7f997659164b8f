mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use crate::api::{DynAPI, API};
use crate::error::{upstream_error, Error};
use crate::server::handlers::{courier, locations};

/// Backend routes, nested under `app_root` unless it is empty.
pub fn router(api: DynAPI, app_root: &str) -> Router {
    let routes = Router::new()
        .route("/api/location/digipin", get(locations::digipin))
        .route("/api/courier/estimate", post(courier::estimate))
        .route("/api/courier/book", post(courier::book))
        .route("/api/courier/bookings/:id", get(courier::find_booking));

    let app = if app_root.is_empty() {
        routes
    } else {
        Router::new().nest(app_root, routes)
    };

    app.layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(
    api: T,
    addr: SocketAddr,
    app_root: &str,
) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;
    let app = router(api, app_root);

    tracing::info!("listening on {}{}", addr, app_root);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|e| upstream_error(format!("server error: {}", e)))
}
