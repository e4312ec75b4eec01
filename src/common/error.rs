// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::common::{i18n::I18nStore, validation::FieldErrors};
use crate::middleware::i18n::Locale;

// Nosso tipo de erro de domínio. Os handlers o convertem em ApiError
// (já traduzido) com `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Acesso expirado")]
    AccessExpired,

    #[error("Nenhuma sessão ativa")]
    Unauthenticated,

    #[error("Acesso negado")]
    Forbidden,

    #[error("Recurso não encontrado")]
    NotFound,

    #[error("CNPJ não encontrado na base de consulta")]
    LookupNotFound,

    #[error("Falha na consulta externa: {0}")]
    LookupFailure(String),

    // Valor persistido corrompido (JSON inválido sob a chave)
    #[error("Falha ao interpretar dados persistidos em '{key}': {source}")]
    StorageParse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

// O erro que de fato vai para o cliente, com a mensagem já no idioma certo.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<HashMap<String, Vec<String>>>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    /// Código estável usado pelo catálogo de mensagens.
    pub fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation.failed",
            AppError::EmailAlreadyExists => "auth.email_exists",
            AppError::InvalidCredentials => "auth.invalid_credentials",
            AppError::AccessExpired => "auth.access_expired",
            AppError::Unauthenticated => "auth.unauthenticated",
            AppError::Forbidden => "auth.forbidden",
            AppError::NotFound => "resource.not_found",
            AppError::LookupNotFound => "lookup.not_found",
            AppError::LookupFailure(_) => "lookup.failure",
            AppError::StorageParse { .. }
            | AppError::DatabaseError(_)
            | AppError::BcryptError(_)
            | AppError::InternalServerError(_) => "internal.unexpected",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::AccessExpired | AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound | AppError::LookupNotFound => StatusCode::NOT_FOUND,
            AppError::LookupFailure(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let status = self.status_code();
        let message = i18n.translate(&locale.0, self.message_key());

        match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            // A mensagem do validator é um código ("required"); traduzimos aqui.
                            let code = e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string());
                            i18n.translate(&locale.0, &format!("field.{code}"))
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status,
                    message,
                    details: Some(details),
                }
            }
            AppError::LookupFailure(reason) => {
                tracing::warn!(%reason, "Consulta externa falhou");
                ApiError::new(status, format!("{message}: {reason}"))
            }
            e if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                ApiError::new(status, message)
            }
            _ => ApiError::new(status, message),
        }
    }
}

/// Monta um erro de validação para um único campo.
pub fn field_error(field: &'static str, code: &'static str) -> AppError {
    let mut errors = FieldErrors::new();
    errors.add(field, code);
    match errors.finish() {
        Err(e) => e,
        Ok(()) => AppError::InternalServerError(anyhow::anyhow!("erro de validação vazio")),
    }
}
