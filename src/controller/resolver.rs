use super::{DynBackend, DynPage, Field, MISSING_DIGIPIN};
use crate::entities::{Coordinates, Role};

/// Fills the role's DigiPin field from the backend. On failure the field keeps its
/// previous value and the user is told why.
#[tracing::instrument(skip(backend, page))]
pub(super) async fn resolve_digipin(
    backend: DynBackend,
    page: DynPage,
    role: Role,
    at: Coordinates,
) {
    match backend.resolve_digipin(at).await {
        Ok(Some(digipin)) => page.set_field(Field::digipin(role), &digipin),
        Ok(None) => {
            tracing::warn!("response carried no digipin");
            page.set_field(Field::digipin(role), MISSING_DIGIPIN);
        }
        Err(err) => {
            tracing::warn!("could not resolve digipin: {}", err);
            page.notify(&format!("Could not fetch DigiPin: {}", err));
        }
    }
}
