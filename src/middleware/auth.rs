// src/middleware/auth.rs

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::auth::Session,
};

// Quem pode passar por cada guarda
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Audience {
    AnySession,
    AdminOnly,
    SellerOnly,
}

async fn authorize(app_state: &AppState, audience: Audience) -> Result<Session, AppError> {
    let session = app_state
        .auth_service
        .current_session()
        .await?
        .ok_or(AppError::Unauthenticated)?;

    let allowed = match audience {
        Audience::AnySession => true,
        Audience::AdminOnly => session.is_admin,
        Audience::SellerOnly => !session.is_admin,
    };

    if allowed {
        Ok(session)
    } else {
        Err(AppError::Forbidden)
    }
}

async fn guard(
    app_state: AppState,
    locale: Locale,
    audience: Audience,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = authorize(&app_state, audience)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    // Insere a sessão nos "extensions" da requisição
    request.extensions_mut().insert(CurrentSession(session));
    Ok(next.run(request).await)
}

/// Exige uma sessão ativa.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    guard(app_state, locale, Audience::AnySession, request, next).await
}

/// Exige a sessão do administrador.
pub async fn admin_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    guard(app_state, locale, Audience::AdminOnly, request, next).await
}

/// Exige um vendedor (conta provisionada); o administrador não usa as
/// telas de leads.
pub async fn seller_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    guard(app_state, locale, Audience::SellerOnly, request, next).await
}

// Extrator para obter a sessão autorizada diretamente nos handlers
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<CurrentSession>() {
            return Ok(session.clone());
        }

        // Rota sem guarda: trata como não autenticado
        let app_state = AppState::from_ref(state);
        let locale = Locale::from_request_parts(parts, state)
            .await
            .unwrap_or_default();
        Err(AppError::Unauthenticated.to_api_error(&locale, &app_state.i18n_store))
    }
}
