// src/db/session_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::{json_store::JsonDocument, keys, kv_store::KeyValueStore},
    models::{auth::Session, lookup::GeoLocation},
};

// Sessão corrente (`currentUser`) e última localização (`userLocation`).
#[derive(Clone)]
pub struct SessionRepository {
    current: JsonDocument<Session>,
    location: JsonDocument<GeoLocation>,
}

impl SessionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            current: JsonDocument::new(store.clone(), keys::CURRENT_USER),
            location: JsonDocument::new(store, keys::USER_LOCATION),
        }
    }

    pub async fn current(&self) -> Result<Option<Session>, AppError> {
        self.current.load().await
    }

    pub async fn save(&self, session: &Session) -> Result<(), AppError> {
        self.current.save(session).await
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        self.current.clear().await
    }

    pub async fn location(&self) -> Result<Option<GeoLocation>, AppError> {
        self.location.load().await
    }

    pub async fn save_location(&self, location: &GeoLocation) -> Result<(), AppError> {
        self.location.save(location).await
    }
}
