// src/handlers/leads.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::leads::{
        ContactLink, InterestedLead, InterestedLeadPatch, LeadProfile, ScheduleLeadReturnPayload,
        UpcomingLeadReturn,
    },
    services::lead_service::{lead_contact_link, lead_follow_up_link},
};

// ---
// Leads interessados
// ---

#[utoipa::path(
    get,
    path = "/api/leads/interested",
    tag = "Leads",
    responses((status = 200, description = "Leads marcados como interessados", body = [InterestedLead]))
)]
pub async fn list_interested(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let leads = app_state
        .lead_service
        .list_interested_leads()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(leads)))
}

#[utoipa::path(
    post,
    path = "/api/leads/interested",
    tag = "Leads",
    request_body = ScheduleLeadReturnPayload,
    responses(
        (status = 201, description = "Lead salvo (e retorno agendado, se pedido)", body = InterestedLead),
        (status = 400, description = "Data/horário do retorno ausentes")
    )
)]
pub async fn mark_interested(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<ScheduleLeadReturnPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let lead = app_state
        .lead_service
        .schedule_lead_return(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(lead)))
}

#[utoipa::path(
    get,
    path = "/api/leads/interested/{cnpj}",
    tag = "Leads",
    params(("cnpj" = String, Path, description = "CNPJ do lead")),
    responses(
        (status = 200, description = "Lead interessado", body = InterestedLead),
        (status = 404, description = "Lead não marcado como interessado")
    )
)]
pub async fn get_interested(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(cnpj): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let lead = app_state
        .lead_service
        .get_interested_lead(&cnpj)
        .await
        .and_then(|lead| lead.ok_or(AppError::NotFound))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(lead)))
}

#[utoipa::path(
    get,
    path = "/api/leads/interested/upcoming",
    tag = "Leads",
    responses((status = 200, description = "Retornos de hoje em diante, por data", body = [UpcomingLeadReturn]))
)]
pub async fn upcoming_returns(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let upcoming = app_state
        .lead_service
        .upcoming_lead_returns()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(upcoming)))
}

#[utoipa::path(
    get,
    path = "/api/leads/interested/{cnpj}/whatsapp",
    tag = "Leads",
    params(("cnpj" = String, Path, description = "CNPJ do lead")),
    responses(
        (status = 200, description = "Link wa.me com a mensagem de retorno", body = ContactLink),
        (status = 404, description = "Lead não marcado como interessado ou sem telefone")
    )
)]
pub async fn interested_whatsapp(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(cnpj): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let url = app_state
        .lead_service
        .get_interested_lead(&cnpj)
        .await
        .and_then(|lead| {
            lead.as_ref()
                .and_then(lead_follow_up_link)
                .ok_or(AppError::NotFound)
        })
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(ContactLink { url })))
}

// Atualização parcial (ex.: provedor de internet atual).
// Cnpj desconhecido não altera nada e responde 404.
#[utoipa::path(
    patch,
    path = "/api/leads/interested/{cnpj}",
    tag = "Leads",
    request_body = InterestedLeadPatch,
    params(("cnpj" = String, Path, description = "CNPJ do lead")),
    responses(
        (status = 200, description = "Lead atualizado", body = InterestedLead),
        (status = 404, description = "Lead não marcado como interessado")
    )
)]
pub async fn update_interested(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(cnpj): Path<String>,
    Json(patch): Json<InterestedLeadPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let lead = app_state
        .lead_service
        .update_interested_lead(&cnpj, patch)
        .await
        .and_then(|lead| lead.ok_or(AppError::NotFound))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(lead)))
}

// ---
// Ficha do lead (busca B2B)
// ---

#[utoipa::path(
    get,
    path = "/api/leads/{cnpj}",
    tag = "Leads",
    params(("cnpj" = String, Path, description = "CNPJ do lead")),
    responses((status = 200, description = "Ficha da empresa", body = LeadProfile))
)]
pub async fn get_lead_profile(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(cnpj): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = app_state
        .lookup_service
        .lead_profile(&cnpj)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(profile)))
}

#[utoipa::path(
    get,
    path = "/api/leads/{cnpj}/whatsapp",
    tag = "Leads",
    params(("cnpj" = String, Path, description = "CNPJ do lead")),
    responses(
        (status = 200, description = "Link wa.me com a mensagem de apresentação", body = ContactLink),
        (status = 404, description = "Lead sem telefone")
    )
)]
pub async fn lead_whatsapp(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(cnpj): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let url = app_state
        .lookup_service
        .lead_profile(&cnpj)
        .await
        .and_then(|profile| lead_contact_link(&profile).ok_or(AppError::NotFound))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(ContactLink { url })))
}
