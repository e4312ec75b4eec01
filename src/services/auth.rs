// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::{Duration, SubsecRound};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{clock::Clock, error::AppError},
    db::{SessionRepository, UserRepository},
    models::auth::{Account, AccountSummary, CreateAccountPayload, Session},
};

// Credencial do administrador vinda da configuração.
// Sem senha configurada, o login de administrador fica desligado.
#[derive(Debug, Clone)]
pub struct AdminCredential {
    pub email: String,
    pub password: Option<String>,
}

impl AdminCredential {
    fn matches(&self, email: &str, password: &str) -> bool {
        self.password
            .as_deref()
            .is_some_and(|secret| email == self.email && password == secret)
    }
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    session_repo: SessionRepository,
    clock: Arc<dyn Clock>,
    admin: AdminCredential,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        session_repo: SessionRepository,
        clock: Arc<dyn Clock>,
        admin: AdminCredential,
        bcrypt_cost: u32,
    ) -> Self {
        if admin.password.is_none() {
            tracing::warn!(
                "⚠️ ADMIN_PASSWORD não definido: login de administrador desativado."
            );
        }
        Self {
            user_repo,
            session_repo,
            clock,
            admin,
            bcrypt_cost,
        }
    }

    // =========================================================================
    //  SESSÃO
    // =========================================================================

    /// Administrador primeiro, depois as contas provisionadas.
    /// A sessão criada fica persistida como a sessão corrente.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let session = if self.admin.matches(email, password) {
            Session {
                email: email.to_string(),
                is_admin: true,
                expires_at: None,
            }
        } else {
            self.login_account(email, password).await?
        };

        self.session_repo.save(&session).await?;
        tracing::info!(email = %session.email, is_admin = session.is_admin, "🔑 Login realizado");
        Ok(session)
    }

    async fn login_account(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let account = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = account.password_hash.clone();

        // Verificação do bcrypt fora do runtime assíncrono
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        if account.is_expired_at(self.clock.now()) {
            tracing::info!(email = %account.email, "⏳ Login recusado: acesso expirado");
            return Err(AppError::AccessExpired);
        }

        Ok(Session {
            email: account.email,
            is_admin: false,
            expires_at: account.expires_at,
        })
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        self.session_repo.clear().await
    }

    pub async fn current_session(&self) -> Result<Option<Session>, AppError> {
        self.session_repo.current().await
    }

    /// Verificação feita uma única vez, na subida do processo: sessão
    /// expirada (ou ilegível) é descartada sem alarde.
    pub async fn restore_session(&self) -> Result<Option<Session>, AppError> {
        match self.session_repo.current().await {
            Ok(Some(session)) if session.is_valid_at(self.clock.now()) => {
                tracing::info!(email = %session.email, "♻️ Sessão restaurada");
                Ok(Some(session))
            }
            Ok(Some(session)) => {
                tracing::info!(email = %session.email, "Sessão persistida expirada; descartando");
                self.session_repo.clear().await?;
                Ok(None)
            }
            Ok(None) => Ok(None),
            Err(AppError::StorageParse { key, source }) => {
                tracing::warn!(%key, error = %source, "Sessão persistida ilegível; descartando");
                self.session_repo.clear().await?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    // =========================================================================
    //  CONTAS PROVISIONADAS
    // =========================================================================

    pub async fn create_account(&self, payload: CreateAccountPayload) -> Result<AccountSummary, AppError> {
        payload.validate()?;

        let password = payload.password;
        let cost = self.bcrypt_cost;
        let password_hash = tokio::task::spawn_blocking(move || hash(&password, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        // Truncado em milissegundos: é a precisão com que `expiresAt` é gravado.
        let now = self.clock.now().trunc_subsecs(3);
        let account = Account {
            id: Uuid::now_v7().to_string(),
            email: payload.email.trim().to_string(),
            password_hash,
            created_at: now,
            expires_at: Some(now + Duration::days(i64::from(payload.validity_days))),
            validity_days: payload.validity_days,
        };

        let account = self.user_repo.create(account).await?;
        tracing::info!(email = %account.email, days = account.validity_days, "👤 Conta criada");
        Ok(AccountSummary::from_account(&account, now))
    }

    pub async fn list_accounts(&self) -> Result<Vec<AccountSummary>, AppError> {
        let now = self.clock.now();
        Ok(self
            .user_repo
            .list()
            .await?
            .iter()
            .map(|a| AccountSummary::from_account(a, now))
            .collect())
    }

    pub async fn delete_account(&self, id: &str) -> Result<(), AppError> {
        if self.user_repo.delete(id).await? {
            tracing::info!(%id, "Conta removida");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::clock::ManualClock,
        db::{keys, KeyValueStore, MemoryKvStore},
    };
    use chrono::Utc;

    struct Fixture {
        auth: AuthService,
        clock: Arc<ManualClock>,
        store: Arc<MemoryKvStore>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryKvStore::new());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let auth = AuthService::new(
            UserRepository::new(store.clone()),
            SessionRepository::new(store.clone()),
            clock.clone(),
            AdminCredential {
                email: "admin".into(),
                password: Some("segredo".into()),
            },
            4,
        );
        Fixture { auth, clock, store }
    }

    fn account(email: &str, password: &str, days: u32) -> CreateAccountPayload {
        CreateAccountPayload {
            email: email.into(),
            password: password.into(),
            validity_days: days,
        }
    }

    #[tokio::test]
    async fn provisioned_account_expires_after_its_validity() {
        let f = fixture();
        f.auth.create_account(account("u1", "p", 7)).await.unwrap();

        let session = f.auth.login("u1", "p").await.unwrap();
        assert!(!session.is_admin);
        assert!(session.expires_at.is_some());

        f.clock.advance(Duration::days(8));
        let err = f.auth.login("u1", "p").await.unwrap_err();
        assert!(matches!(err, AppError::AccessExpired));

        // A conta continua lá, só é recusada
        assert_eq!(f.auth.list_accounts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn login_exactly_at_expiry_still_succeeds() {
        let f = fixture();
        f.auth.create_account(account("u1", "p", 1)).await.unwrap();
        f.clock.advance(Duration::days(1));
        assert!(f.auth.login("u1", "p").await.is_ok());
    }

    #[tokio::test]
    async fn returned_expiry_matches_the_stored_one() {
        let f = fixture();
        let created = f.auth.create_account(account("u1", "p", 1)).await.unwrap();
        let stored = f.auth.list_accounts().await.unwrap();
        assert_eq!(stored[0].expires_at, created.expires_at);
        assert_eq!(created.expires_at.unwrap().timestamp_subsec_nanos() % 1_000_000, 0);

        // Exatamente no instante gravado ainda entra
        f.clock.set(created.expires_at.unwrap());
        assert!(f.auth.login("u1", "p").await.is_ok());
    }

    #[tokio::test]
    async fn blank_email_is_rejected_on_creation() {
        let f = fixture();
        let err = f.auth.create_account(account("   ", "p", 1)).await.unwrap_err();
        let AppError::ValidationError(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.field_errors().contains_key("email"));
        assert!(f.auth.list_accounts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn admin_login_never_expires_and_ignores_accounts() {
        let f = fixture();
        f.auth.create_account(account("admin", "outra", 1)).await.unwrap();
        f.clock.advance(Duration::days(365));

        let session = f.auth.login("admin", "segredo").await.unwrap();
        assert!(session.is_admin);
        assert_eq!(session.expires_at, None);
        assert_eq!(f.auth.current_session().await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn wrong_or_unknown_credentials_are_rejected() {
        let f = fixture();
        f.auth.create_account(account("u1", "p", 7)).await.unwrap();

        assert!(matches!(
            f.auth.login("u1", "errada").await.unwrap_err(),
            AppError::InvalidCredentials
        ));
        assert!(matches!(
            f.auth.login("ninguem", "p").await.unwrap_err(),
            AppError::InvalidCredentials
        ));
        assert_eq!(f.auth.current_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn admin_login_is_disabled_without_password() {
        let store = Arc::new(MemoryKvStore::new());
        let auth = AuthService::new(
            UserRepository::new(store.clone()),
            SessionRepository::new(store),
            Arc::new(ManualClock::new(Utc::now())),
            AdminCredential {
                email: "admin".into(),
                password: None,
            },
            4,
        );
        assert!(matches!(
            auth.login("admin", "").await.unwrap_err(),
            AppError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let f = fixture();
        f.auth.create_account(account("u1", "p", 7)).await.unwrap();
        let err = f.auth.create_account(account("u1", "q", 3)).await.unwrap_err();
        assert!(matches!(err, AppError::EmailAlreadyExists));
    }

    #[tokio::test]
    async fn account_creation_validates_fields() {
        let f = fixture();
        let err = f.auth.create_account(account("", "", 0)).await.unwrap_err();
        let AppError::ValidationError(errors) = err else {
            panic!("expected validation error");
        };
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("validity_days"));
    }

    #[tokio::test]
    async fn passwords_are_not_stored_in_plaintext() {
        let f = fixture();
        f.auth.create_account(account("u1", "segredo123", 7)).await.unwrap();
        let raw = f.store.get(keys::USERS).await.unwrap().unwrap();
        assert!(!raw.contains("segredo123"));
        assert!(raw.contains("passwordHash"));
    }

    #[tokio::test]
    async fn delete_account_is_idempotent() {
        let f = fixture();
        let created = f.auth.create_account(account("u1", "p", 7)).await.unwrap();
        f.auth.delete_account(&created.id).await.unwrap();
        f.auth.delete_account(&created.id).await.unwrap();
        assert!(f.auth.list_accounts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn restore_discards_expired_session() {
        let f = fixture();
        f.auth.create_account(account("u1", "p", 2)).await.unwrap();
        f.auth.login("u1", "p").await.unwrap();

        assert!(f.auth.restore_session().await.unwrap().is_some());

        f.clock.advance(Duration::days(3));
        assert_eq!(f.auth.restore_session().await.unwrap(), None);
        assert_eq!(f.store.get(keys::CURRENT_USER).await.unwrap(), None);
    }

    #[tokio::test]
    async fn restore_discards_corrupt_session() {
        let f = fixture();
        f.store.set(keys::CURRENT_USER, "{not json").await.unwrap();
        assert_eq!(f.auth.restore_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn logout_always_succeeds() {
        let f = fixture();
        f.auth.logout().await.unwrap();
        f.auth.login("admin", "segredo").await.unwrap();
        f.auth.logout().await.unwrap();
        assert_eq!(f.auth.current_session().await.unwrap(), None);
    }
}
