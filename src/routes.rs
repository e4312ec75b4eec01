// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::AppState,
    docs::ApiDoc,
    handlers,
    middleware::auth::{admin_guard, auth_guard, seller_guard},
};

pub fn router(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route(
            "/session",
            get(handlers::auth::get_session).layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth_guard,
            )),
        );

    let admin_routes = Router::new()
        .route(
            "/users",
            get(handlers::admin::list_users).post(handlers::admin::create_user),
        )
        .route("/users/{id}", axum::routing::delete(handlers::admin::delete_user))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            admin_guard,
        ));

    let reference_routes = Router::new()
        .route("/states", get(handlers::reference::list_states))
        .route("/states/{id}/cities", get(handlers::reference::list_cities))
        .route("/plans", get(handlers::reference::list_plans))
        .route(
            "/internet-providers",
            get(handlers::reference::list_internet_providers),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Telas do vendedor: o administrador não entra aqui
    let seller_routes = Router::new()
        .route(
            "/leads/interested",
            get(handlers::leads::list_interested).post(handlers::leads::mark_interested),
        )
        .route("/leads/interested/upcoming", get(handlers::leads::upcoming_returns))
        .route(
            "/leads/interested/{cnpj}",
            get(handlers::leads::get_interested).patch(handlers::leads::update_interested),
        )
        .route(
            "/leads/interested/{cnpj}/whatsapp",
            get(handlers::leads::interested_whatsapp),
        )
        .route("/leads/{cnpj}", get(handlers::leads::get_lead_profile))
        .route("/leads/{cnpj}/whatsapp", get(handlers::leads::lead_whatsapp))
        .route("/search/region", post(handlers::search::search_region))
        .route("/search/nearby", post(handlers::search::search_nearby))
        .route("/search/cnpj/{cnpj}", get(handlers::search::lookup_cnpj))
        .route(
            "/location",
            get(handlers::location::get_location).put(handlers::location::save_location),
        )
        .route(
            "/client-returns",
            get(handlers::client_returns::list_client_returns)
                .post(handlers::client_returns::create_client_return),
        )
        .route(
            "/client-returns/upcoming",
            get(handlers::client_returns::upcoming_client_returns),
        )
        .route(
            "/client-returns/{id}",
            get(handlers::client_returns::get_client_return)
                .delete(handlers::client_returns::delete_client_return),
        )
        .route(
            "/client-returns/{id}/whatsapp",
            get(handlers::client_returns::client_return_whatsapp),
        )
        .route(
            "/notifications",
            get(handlers::notifications::list_notifications)
                .post(handlers::notifications::create_notification),
        )
        .route(
            "/notifications/pending",
            get(handlers::notifications::pending_notifications),
        )
        .route(
            "/notifications/stream",
            get(handlers::notifications::notification_stream),
        )
        .route(
            "/notifications/{id}",
            axum::routing::delete(handlers::notifications::delete_notification),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            seller_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/reference", reference_routes)
        .nest("/api", seller_routes)
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration as StdDuration};

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use chrono::{Duration, Utc};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        clients::{CompanyLookup, RegionDirectory},
        common::{
            clock::{Clock, ManualClock},
            error::AppError,
        },
        config::Collaborators,
        db::MemoryKvStore,
        models::lookup::{CityInfo, CompanySummary, StateInfo},
        services::{AdminCredential, MockLeadSearchProvider},
    };

    struct OfflineLookup;

    #[async_trait]
    impl CompanyLookup for OfflineLookup {
        async fn find_by_cnpj(&self, _cnpj: &str) -> Result<CompanySummary, AppError> {
            Err(AppError::LookupNotFound)
        }
    }

    #[async_trait]
    impl RegionDirectory for OfflineLookup {
        async fn list_states(&self) -> Result<Vec<StateInfo>, AppError> {
            Ok(vec![StateInfo {
                id: 35,
                sigla: "SP".into(),
                nome: "São Paulo".into(),
            }])
        }

        async fn list_cities(&self, _state_id: u32) -> Result<Vec<CityInfo>, AppError> {
            Ok(Vec::new())
        }
    }

    fn app() -> (Router, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let state = AppState::from_parts(Collaborators {
            store: Arc::new(MemoryKvStore::new()),
            clock: clock.clone(),
            companies: Arc::new(OfflineLookup),
            regions: Arc::new(OfflineLookup),
            search: Arc::new(MockLeadSearchProvider::new(StdDuration::ZERO)),
            admin: AdminCredential {
                email: "admin".into(),
                password: Some("admin123".into()),
            },
            bcrypt_cost: 4,
        });
        (router(state), clock)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
        send(
            app,
            "POST",
            "/api/auth/login",
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    async fn provision(app: &Router, email: &str, days: u32) {
        login(app, "admin", "admin123").await;
        let (status, _) = send(
            app,
            "POST",
            "/api/admin/users",
            Some(json!({ "email": email, "password": "p", "validityDays": days })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn health_is_public() {
        let (app, _) = app();
        let response = app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn protected_routes_need_a_session() {
        let (app, _) = app();
        let (status, body) = send(&app, "GET", "/api/leads/interested", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Faça login para continuar.");

        let (status, _) = send(&app, "GET", "/api/auth/session", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_manages_accounts_but_not_leads() {
        let (app, _) = app();
        let (status, body) = login(&app, "admin", "admin123").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "isAdmin": true }));

        let (status, _) = send(&app, "GET", "/api/leads/interested", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(
            &app,
            "POST",
            "/api/admin/users",
            Some(json!({ "email": "", "password": "p", "validityDays": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"]["email"].is_array());

        provision(&app, "u1@x.com", 7).await;
        let (_, users) = send(&app, "GET", "/api/admin/users", None).await;
        assert_eq!(users.as_array().unwrap().len(), 1);
        assert!(users[0].get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn expired_seller_gets_a_failure_body() {
        let (app, clock) = app();
        provision(&app, "u1", 7).await;

        let (status, body) = login(&app, "u1", "p").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isAdmin"], false);

        let (status, _) = send(&app, "GET", "/api/admin/users", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        clock.advance(Duration::days(8));
        let (status, body) = login(&app, "u1", "p").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Acesso expirado.");

        let (status, body) = login(&app, "u1", "errada").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Credenciais inválidas.");

        let (status, body) = login(&app, "   ", "p").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"]["email"].is_array());
    }

    #[tokio::test]
    async fn seller_schedules_and_sees_only_own_client_returns() {
        let (app, _) = app();
        provision(&app, "u1@x.com", 30).await;
        provision(&app, "u2@x.com", 30).await;

        login(&app, "u1@x.com", "p").await;
        let (status, record) = send(
            &app,
            "POST",
            "/api/client-returns",
            Some(json!({
                "nome": "Ana",
                "endereco": "Rua A, 1",
                "contato": "11999998888",
                "plano": "300 Mbps - R$ 119,90",
                "returnDate": "2025-01-10",
                "returnTime": "09:00"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(record["contato"], "(11) 99999-8888");
        assert_eq!(record["createdBy"], "u1@x.com");
        let id = record["id"].as_str().unwrap().to_string();

        let (_, link) = send(&app, "GET", &format!("/api/client-returns/{id}/whatsapp"), None).await;
        assert!(link["url"].as_str().unwrap().starts_with("https://wa.me/5511999998888?text="));

        let (_, reminders) = send(&app, "GET", "/api/notifications", None).await;
        assert_eq!(reminders[0]["type"], "Retorno de Cliente");

        let (status, upcoming) = send(&app, "GET", "/api/client-returns/upcoming", None).await;
        assert_eq!(status, StatusCode::OK);
        // 2025-01-10 já passou
        assert_eq!(upcoming, json!([]));

        login(&app, "u2@x.com", "p").await;
        let (_, list) = send(&app, "GET", "/api/client-returns", None).await;
        assert_eq!(list, json!([]));
        let (status, _) = send(&app, "GET", &format!("/api/client-returns/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_client_return_fields_are_reported_per_field() {
        let (app, _) = app();
        provision(&app, "u1@x.com", 30).await;
        login(&app, "u1@x.com", "p").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/client-returns",
            Some(json!({ "nome": "Ana", "plano": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["plano"], json!(["Campo obrigatório."]));
        assert!(body["details"].get("nome").is_none());
    }

    #[tokio::test]
    async fn interested_lead_flow() {
        let (app, clock) = app();
        provision(&app, "u1@x.com", 30).await;
        login(&app, "u1@x.com", "p").await;
        let tomorrow = (clock.local_now().date() + Duration::days(1)).to_string();

        let (status, _) = send(
            &app,
            "POST",
            "/api/leads/interested",
            Some(json!({
                "cnpj": "123",
                "razaoSocial": "Tech Solutions Ltda",
                "telefone": "(11) 98765-4321",
                "wantsReturn": true,
                "returnDate": tomorrow,
                "returnTime": "14:30"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, upcoming) = send(&app, "GET", "/api/leads/interested/upcoming", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(upcoming[0]["cnpj"], "123");
        assert_eq!(upcoming[0]["isToday"], false);

        let (status, link) = send(&app, "GET", "/api/leads/interested/123/whatsapp", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(link["url"]
            .as_str()
            .unwrap()
            .starts_with("https://wa.me/5511987654321?text=Ol%C3%A1%20Tech%20Solutions%20Ltda%21"));
        let (status, _) = send(&app, "GET", "/api/leads/interested/999/whatsapp", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, lead) = send(
            &app,
            "PATCH",
            "/api/leads/interested/123",
            Some(json!({ "currentInternet": "Vivo Fibra" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(lead["currentInternet"], "Vivo Fibra");
        assert_eq!(lead["razaoSocial"], "Tech Solutions Ltda");

        let (status, _) = send(
            &app,
            "PATCH",
            "/api/leads/interested/999",
            Some(json!({ "currentInternet": "Oi Fibra" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, pending) = send(&app, "GET", "/api/notifications/pending", None).await;
        assert!(pending["count"].is_number());
    }

    #[tokio::test]
    async fn cnpj_lookup_maps_not_found() {
        let (app, _) = app();
        provision(&app, "u1@x.com", 30).await;
        login(&app, "u1@x.com", "p").await;

        let (status, body) = send(&app, "GET", "/api/search/cnpj/00.000.000%2F0000-00", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "CNPJ não encontrado na base de dados da BrasilAPI.");

        let (status, _) = send(&app, "POST", "/api/search/region", Some(json!({ "estado": "SP" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn logout_ends_the_session() {
        let (app, _) = app();
        login(&app, "admin", "admin123").await;
        let (status, session) = send(&app, "GET", "/api/auth/session", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(session["isAdmin"], true);

        let (status, _) = send(&app, "POST", "/api/auth/logout", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "GET", "/api/reference/plans", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
