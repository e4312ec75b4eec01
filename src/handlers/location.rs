// src/handlers/location.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::lookup::GeoLocation,
};

#[utoipa::path(
    get,
    path = "/api/location",
    tag = "Location",
    responses(
        (status = 200, description = "Última localização conhecida", body = GeoLocation),
        (status = 404, description = "Nenhuma localização salva")
    )
)]
pub async fn get_location(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let location = app_state
        .lookup_service
        .get_location()
        .await
        .and_then(|l| l.ok_or(AppError::NotFound))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(location)))
}

#[utoipa::path(
    put,
    path = "/api/location",
    tag = "Location",
    request_body = GeoLocation,
    responses(
        (status = 200, description = "Localização salva", body = GeoLocation),
        (status = 400, description = "Coordenadas fora do intervalo")
    )
)]
pub async fn save_location(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(location): Json<GeoLocation>,
) -> Result<impl IntoResponse, ApiError> {
    let location = app_state
        .lookup_service
        .save_location(location)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(location)))
}
