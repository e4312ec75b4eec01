// src/handlers/search.rs

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
    models::lookup::{CompanySummary, NearbySearchPayload, RegionSearchFilters},
};

#[utoipa::path(
    post,
    path = "/api/search/region",
    tag = "Search",
    request_body = RegionSearchFilters,
    responses(
        (status = 200, description = "Resultados simulados", body = [CompanySummary]),
        (status = 400, description = "Estado e cidade são obrigatórios")
    )
)]
pub async fn search_region(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(filters): Json<RegionSearchFilters>,
) -> Result<impl IntoResponse, ApiError> {
    let results = app_state
        .lookup_service
        .search_region(filters)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(results)))
}

#[utoipa::path(
    post,
    path = "/api/search/nearby",
    tag = "Search",
    request_body = NearbySearchPayload,
    responses(
        (status = 200, description = "Resultados simulados por GPS", body = [CompanySummary]),
        (status = 400, description = "Sem coordenadas e sem localização salva")
    )
)]
pub async fn search_nearby(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<NearbySearchPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let results = app_state
        .lookup_service
        .search_nearby(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(results)))
}

#[utoipa::path(
    get,
    path = "/api/search/cnpj/{cnpj}",
    tag = "Search",
    params(("cnpj" = String, Path, description = "CNPJ com ou sem máscara")),
    responses(
        (status = 200, description = "Empresa encontrada", body = CompanySummary),
        (status = 404, description = "CNPJ não encontrado"),
        (status = 502, description = "Falha na consulta externa")
    )
)]
pub async fn lookup_cnpj(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(cnpj): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let company = app_state
        .lookup_service
        .lookup_cnpj(&cnpj)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(company)))
}
