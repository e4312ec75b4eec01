// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use tokio::sync::broadcast;

use crate::{
    clients::{
        brasil_api::BRASIL_API_URL, ibge::IBGE_API_URL, BrasilApiClient, CompanyLookup, IbgeClient,
        RegionDirectory,
    },
    common::{
        clock::{Clock, SystemClock},
        i18n::I18nStore,
    },
    db::{
        KeyValueStore, LeadRepository, NotificationRepository, SessionRepository, SqliteKvStore,
        UserRepository,
    },
    services::{
        AdminCredential, AuthService, LeadSearchProvider, LeadService, LookupService,
        MockLeadSearchProvider, NotificationService, PollerSettings,
    },
};

// Configuração lida do ambiente (.env opcional)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub admin_email: String,
    pub admin_password: Option<String>,
    pub bcrypt_cost: u32,
    pub reminder_tick_secs: u64,
    pub reminder_tolerance_minutes: u32,
    pub mock_search_delay_ms: u64,
    pub brasil_api_url: String,
    pub ibge_api_url: String,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env_or("DATABASE_URL", "sqlite://leads.db?mode=rwc".to_string())?,
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:3000".to_string())?,
            admin_email: env_or("ADMIN_EMAIL", "admin".to_string())?,
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty()),
            bcrypt_cost: env_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            reminder_tick_secs: env_or("REMINDER_TICK_SECS", 60)?,
            reminder_tolerance_minutes: env_or("REMINDER_TOLERANCE_MINUTES", 1)?,
            mock_search_delay_ms: env_or("MOCK_SEARCH_DELAY_MS", 2000)?,
            brasil_api_url: env_or("BRASIL_API_URL", BRASIL_API_URL.to_string())?,
            ibge_api_url: env_or("IBGE_API_URL", IBGE_API_URL.to_string())?,
            http_timeout_secs: env_or("HTTP_TIMEOUT_SECS", 10)?,
        })
    }

    pub fn poller_settings(&self) -> PollerSettings {
        PollerSettings {
            tick: Duration::from_secs(self.reminder_tick_secs.max(1)),
            tolerance_minutes: self.reminder_tolerance_minutes,
        }
    }
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("Valor inválido para {key}: '{raw}'")),
        _ => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub i18n_store: Arc<I18nStore>,
    pub clock: Arc<dyn Clock>,
    pub auth_service: AuthService,
    pub lead_service: LeadService,
    pub lookup_service: LookupService,
    pub notification_service: NotificationService,
}

// Colaboradores trocáveis (nos testes: memória, relógio manual, stubs)
pub struct Collaborators {
    pub store: Arc<dyn KeyValueStore>,
    pub clock: Arc<dyn Clock>,
    pub companies: Arc<dyn CompanyLookup>,
    pub regions: Arc<dyn RegionDirectory>,
    pub search: Arc<dyn LeadSearchProvider>,
    pub admin: AdminCredential,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let store = SqliteKvStore::connect(&config.database_url, 5)
            .await
            .context("Falha ao abrir o banco de dados")?;
        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let timeout = Duration::from_secs(config.http_timeout_secs);

        Ok(Self::from_parts(Collaborators {
            store: Arc::new(store),
            clock: Arc::new(SystemClock),
            companies: Arc::new(BrasilApiClient::new(&config.brasil_api_url, timeout)?),
            regions: Arc::new(IbgeClient::new(&config.ibge_api_url, timeout)?),
            search: Arc::new(MockLeadSearchProvider::new(Duration::from_millis(
                config.mock_search_delay_ms,
            ))),
            admin: AdminCredential {
                email: config.admin_email.clone(),
                password: config.admin_password.clone(),
            },
            bcrypt_cost: config.bcrypt_cost,
        }))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_parts(parts: Collaborators) -> Self {
        let Collaborators {
            store,
            clock,
            companies,
            regions,
            search,
            admin,
            bcrypt_cost,
        } = parts;

        let session_repo = SessionRepository::new(store.clone());
        let (event_bus, _) = broadcast::channel(64);

        let notification_service = NotificationService::new(
            NotificationRepository::new(store.clone()),
            clock.clone(),
            event_bus,
        );
        let auth_service = AuthService::new(
            UserRepository::new(store.clone()),
            session_repo.clone(),
            clock.clone(),
            admin,
            bcrypt_cost,
        );
        let lead_service = LeadService::new(
            LeadRepository::new(store),
            notification_service.clone(),
            clock.clone(),
        );
        let lookup_service = LookupService::new(companies, regions, search, session_repo);

        Self {
            i18n_store: Arc::new(I18nStore::new()),
            clock,
            auth_service,
            lead_service,
            lookup_service,
            notification_service,
        }
    }
}
