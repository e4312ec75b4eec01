// src/handlers/client_returns.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::CurrentSession, i18n::Locale},
    models::leads::{ClientReturn, ClientReturnPayload, ContactLink, UpcomingClientReturn},
    services::lead_service::client_return_contact_link,
};

// Todos os endpoints enxergam apenas os registros criados pelo usuário da sessão.

#[utoipa::path(
    get,
    path = "/api/client-returns",
    tag = "Client Returns",
    responses((status = 200, description = "Retornos criados pelo usuário", body = [ClientReturn]))
)]
pub async fn list_client_returns(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentSession(session): CurrentSession,
) -> Result<impl IntoResponse, ApiError> {
    let records = app_state
        .lead_service
        .list_client_returns_for(&session.email)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(records)))
}

#[utoipa::path(
    post,
    path = "/api/client-returns",
    tag = "Client Returns",
    request_body = ClientReturnPayload,
    responses(
        (status = 201, description = "Retorno agendado", body = ClientReturn),
        (status = 400, description = "Campos obrigatórios ausentes")
    )
)]
pub async fn create_client_return(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<ClientReturnPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let record = app_state
        .lead_service
        .register_client_return(payload, &session.email)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/api/client-returns/upcoming",
    tag = "Client Returns",
    responses((status = 200, description = "Retornos do usuário de hoje em diante, por data", body = [UpcomingClientReturn]))
)]
pub async fn upcoming_client_returns(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentSession(session): CurrentSession,
) -> Result<impl IntoResponse, ApiError> {
    let upcoming = app_state
        .lead_service
        .upcoming_client_returns_for(&session.email)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(upcoming)))
}

#[utoipa::path(
    get,
    path = "/api/client-returns/{id}",
    tag = "Client Returns",
    params(("id" = String, Path, description = "ID do retorno")),
    responses(
        (status = 200, description = "Retorno", body = ClientReturn),
        (status = 404, description = "Inexistente ou de outro usuário")
    )
)]
pub async fn get_client_return(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let record = app_state
        .lead_service
        .get_client_return(&id, &session.email)
        .await
        .and_then(|r| r.ok_or(AppError::NotFound))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(record)))
}

#[utoipa::path(
    delete,
    path = "/api/client-returns/{id}",
    tag = "Client Returns",
    params(("id" = String, Path, description = "ID do retorno")),
    responses((status = 204, description = "Removido (ou já inexistente)"))
)]
pub async fn delete_client_return(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .lead_service
        .remove_client_return_for(&id, &session.email)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/client-returns/{id}/whatsapp",
    tag = "Client Returns",
    params(("id" = String, Path, description = "ID do retorno")),
    responses(
        (status = 200, description = "Link wa.me com a mensagem de retorno", body = ContactLink),
        (status = 404, description = "Inexistente ou contato sem dígitos")
    )
)]
pub async fn client_return_whatsapp(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let url = app_state
        .lead_service
        .get_client_return(&id, &session.email)
        .await
        .and_then(|r| {
            r.as_ref()
                .and_then(client_return_contact_link)
                .ok_or(AppError::NotFound)
        })
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(ContactLink { url })))
}
