// src/handlers/reference.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::{
        leads::{INTERNET_PROVIDERS, PLANS},
        lookup::{CityInfo, StateInfo},
    },
};

#[utoipa::path(
    get,
    path = "/api/reference/states",
    tag = "Reference",
    responses(
        (status = 200, description = "Estados (IBGE), por nome", body = [StateInfo]),
        (status = 502, description = "Falha na consulta ao IBGE")
    )
)]
pub async fn list_states(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let states = app_state
        .lookup_service
        .list_states()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(states)))
}

#[utoipa::path(
    get,
    path = "/api/reference/states/{id}/cities",
    tag = "Reference",
    params(("id" = u32, Path, description = "ID do estado no IBGE")),
    responses(
        (status = 200, description = "Municípios do estado, por nome", body = [CityInfo]),
        (status = 502, description = "Falha na consulta ao IBGE")
    )
)]
pub async fn list_cities(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<u32>,
) -> Result<impl IntoResponse, ApiError> {
    let cities = app_state
        .lookup_service
        .list_cities(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(cities)))
}

#[utoipa::path(
    get,
    path = "/api/reference/plans",
    tag = "Reference",
    responses((status = 200, description = "Planos disponíveis", body = [String]))
)]
pub async fn list_plans() -> Json<Vec<&'static str>> {
    Json(PLANS.to_vec())
}

#[utoipa::path(
    get,
    path = "/api/reference/internet-providers",
    tag = "Reference",
    responses((status = 200, description = "Provedores de internet conhecidos", body = [String]))
)]
pub async fn list_internet_providers() -> Json<Vec<&'static str>> {
    Json(INTERNET_PROVIDERS.to_vec())
}
