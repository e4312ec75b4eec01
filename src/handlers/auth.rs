// src/handlers/auth.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::CurrentSession, i18n::Locale},
    models::auth::{LoginResponse, LoginUserPayload, Session},
};

// Corpo de uma tentativa de login recusada
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginFailure {
    pub success: bool,
    #[schema(example = "Acesso expirado.")]
    pub message: String,
}

fn login_failure(err: AppError, locale: &Locale, app_state: &AppState) -> Response {
    let api = err.to_api_error(locale, &app_state.i18n_store);
    match err {
        // Erro por campo segue o formato padrão
        AppError::ValidationError(_) => api.into_response(),
        _ => (
            api.status,
            Json(LoginFailure {
                success: false,
                message: api.message,
            }),
        )
            .into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Login bem-sucedido", body = LoginResponse),
        (status = 401, description = "Credenciais inválidas", body = LoginFailure),
        (status = 403, description = "Acesso expirado", body = LoginFailure)
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<LoginResponse>, Response> {
    if let Err(e) = payload.validate() {
        return Err(login_failure(AppError::ValidationError(e), &locale, &app_state));
    }

    match app_state
        .auth_service
        .login(payload.email.trim(), &payload.password)
        .await
    {
        Ok(session) => Ok(Json(LoginResponse {
            success: true,
            is_admin: session.is_admin,
        })),
        Err(e) => {
            tracing::info!(email = %payload.email, reason = %e, "Login recusado");
            Err(login_failure(e, &locale, &app_state))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses((status = 204, description = "Sessão encerrada"))
)]
pub async fn logout(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .auth_service
        .logout()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = "Auth",
    responses(
        (status = 200, description = "Sessão corrente", body = Session),
        (status = 401, description = "Nenhuma sessão ativa")
    )
)]
pub async fn get_session(CurrentSession(session): CurrentSession) -> Json<Session> {
    Json(session)
}
