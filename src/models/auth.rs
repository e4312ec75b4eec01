// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

// Conta provisionada pelo administrador (chave `users`).
// `expiresAt` fica em epoch-milissegundos, como no layout persistido.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub validity_days: u32,
}

impl Account {
    // Comparação em milissegundos, a mesma precisão do valor persistido.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .is_some_and(|exp| now.timestamp_millis() > exp.timestamp_millis())
    }
}

// O que o painel administrativo enxerga (nunca o hash)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    #[schema(example = "0190b6a4-6f1e-7c3a-9a51-3f2d5d0e8c11")]
    pub id: String,
    #[schema(example = "vendedor@empresa.com.br")]
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    #[schema(example = 30)]
    pub validity_days: u32,
    pub expired: bool,
}

impl AccountSummary {
    pub fn from_account(account: &Account, now: DateTime<Utc>) -> Self {
        Self {
            id: account.id.clone(),
            email: account.email.clone(),
            created_at: account.created_at,
            expires_at: account.expires_at,
            validity_days: account.validity_days,
            expired: account.is_expired_at(now),
        }
    }
}

// Sessão corrente (chave `currentUser`). `expiresAt = null` nunca expira.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[schema(example = "vendedor@empresa.com.br")]
    pub email: String,
    pub is_admin: bool,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    #[schema(value_type = Option<i64>, example = 1767225600000i64)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .is_none_or(|exp| now.timestamp_millis() < exp.timestamp_millis())
    }
}

// Só espaços conta como vazio: o e-mail é gravado sem as pontas.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("required".into());
        return Err(error);
    }
    Ok(())
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "vendedor@empresa.com.br")]
    pub email: String,
    #[validate(length(min = 1, message = "required"))]
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub is_admin: bool,
}

fn default_validity_days() -> u32 {
    30
}

// Formulário do painel administrativo
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountPayload {
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "vendedor@empresa.com.br")]
    pub email: String,
    #[validate(length(min = 1, message = "required"))]
    pub password: String,
    #[serde(default = "default_validity_days")]
    #[validate(range(min = 1, message = "min_days"))]
    #[schema(example = 30)]
    pub validity_days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn blank_email_fails_validation() {
        let payload = CreateAccountPayload {
            email: "   ".into(),
            password: "p".into(),
            validity_days: 1,
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));

        let login = LoginUserPayload {
            email: " ".into(),
            password: "p".into(),
        };
        assert!(login.validate().is_err());
    }

    #[test]
    fn expiry_ignores_sub_millisecond_noise() {
        let exp = DateTime::from_timestamp_millis(1_767_225_600_000).unwrap();
        let account = Account {
            id: "1".into(),
            email: "u1".into(),
            password_hash: String::new(),
            created_at: exp,
            expires_at: Some(exp),
            validity_days: 1,
        };
        assert!(!account.is_expired_at(exp + Duration::microseconds(900)));
        assert!(account.is_expired_at(exp + Duration::milliseconds(1)));
    }
}
