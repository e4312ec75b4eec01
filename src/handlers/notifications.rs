// src/handlers/notifications.rs

use std::{convert::Infallible, time::Duration};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Json,
};
use futures::stream::{self, Stream};
use tokio::sync::broadcast;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::notifications::{CreateReminderPayload, PendingReminders, Reminder},
};

#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notifications",
    responses((status = 200, description = "Todos os lembretes", body = [Reminder]))
)]
pub async fn list_notifications(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let reminders = app_state
        .notification_service
        .list_notifications()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(reminders)))
}

#[utoipa::path(
    post,
    path = "/api/notifications",
    tag = "Notifications",
    request_body = CreateReminderPayload,
    responses(
        (status = 201, description = "Lembrete criado", body = Reminder),
        (status = 400, description = "Campos inválidos")
    )
)]
pub async fn create_notification(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateReminderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let reminder = app_state
        .notification_service
        .create_from_payload(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(reminder)))
}

#[utoipa::path(
    get,
    path = "/api/notifications/pending",
    tag = "Notifications",
    responses((status = 200, description = "Hoje em diante, ainda não exibidos", body = PendingReminders))
)]
pub async fn pending_notifications(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state
        .notification_service
        .pending_notifications()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        Json(PendingReminders {
            count: items.len(),
            items,
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    tag = "Notifications",
    params(("id" = String, Path, description = "ID do lembrete")),
    responses((status = 204, description = "Removido (ou já inexistente)"))
)]
pub async fn delete_notification(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .notification_service
        .remove_notification(&id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// Alertas disparados pelo verificador, em tempo real (evento `reminder`).
#[utoipa::path(
    get,
    path = "/api/notifications/stream",
    tag = "Notifications",
    responses((status = 200, description = "Fluxo SSE de ReminderAlert", content_type = "text/event-stream"))
)]
pub async fn notification_stream(
    State(app_state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = app_state.notification_service.subscribe();

    let stream = stream::unfold(rx, |mut rx| async move {
        match rx.recv().await {
            Ok(alert) => {
                let json = serde_json::to_string(&alert).unwrap_or_default();
                Some((Ok(Event::default().event("reminder").data(json)), rx))
            }
            Err(broadcast::error::RecvError::Lagged(count)) => {
                tracing::warn!("Cliente SSE atrasado em {} alertas", count);
                Some((
                    Ok(Event::default().event("warning").data("Alguns alertas foram perdidos")),
                    rx,
                ))
            }
            Err(broadcast::error::RecvError::Closed) => None,
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
