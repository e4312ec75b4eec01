// src/services/search_provider.rs
//
// Busca de leads B2B por região e por GPS. Não existe uma fonte real para
// essas buscas: o provedor padrão devolve dados de demonstração fixos.

use std::time::Duration;

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    models::{
        leads::LeadProfile,
        lookup::{CompanySummary, GeoLocation},
    },
};

#[async_trait]
pub trait LeadSearchProvider: Send + Sync {
    /// `estado` e `cidade` já validados pelo chamador.
    async fn search_region(&self, estado: &str, cidade: &str) -> Result<Vec<CompanySummary>, AppError>;

    async fn search_nearby(&self, location: GeoLocation) -> Result<Vec<CompanySummary>, AppError>;

    async fn lead_profile(&self, cnpj: &str) -> Result<LeadProfile, AppError>;
}

#[derive(Debug, Clone)]
pub struct MockLeadSearchProvider {
    delay: Duration,
}

impl MockLeadSearchProvider {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

fn company(cnpj: &str, name: &str, phone: &str, address: &str, city: &str, state: &str, cnae: Option<&str>) -> CompanySummary {
    CompanySummary {
        cnpj: cnpj.to_string(),
        company_name: name.to_string(),
        phone: Some(phone.to_string()),
        address: Some(address.to_string()),
        city: Some(city.to_string()),
        state: Some(state.to_string()),
        cnae: cnae.map(str::to_string),
    }
}

#[async_trait]
impl LeadSearchProvider for MockLeadSearchProvider {
    async fn search_region(&self, estado: &str, cidade: &str) -> Result<Vec<CompanySummary>, AppError> {
        tracing::info!(%estado, %cidade, "🔍 Busca simulada por região");
        self.simulate_latency().await;

        Ok(vec![
            company(
                "06990590000123",
                "NUBANK SA",
                "(11) 3333-3333",
                "Rua Capote Valente, 39",
                cidade,
                estado,
                Some("6422100"),
            ),
            company(
                "34028316000103",
                "Google Brasil Internet Ltda.",
                "(11) 2395-8400",
                "Av. Brigadeiro Faria Lima, 3477",
                cidade,
                estado,
                Some("6311900"),
            ),
            company(
                "03361252000104",
                "MercadoLivre.com Atividades de Internet Ltda.",
                "(11) 2543-4155",
                "Avenida das Nações Unidas, 3003",
                cidade,
                estado,
                Some("6319400"),
            ),
        ])
    }

    async fn search_nearby(&self, location: GeoLocation) -> Result<Vec<CompanySummary>, AppError> {
        tracing::info!(lat = location.latitude, lon = location.longitude, "📍 Busca simulada por GPS");
        self.simulate_latency().await;

        Ok(vec![company(
            "18727053000174",
            "UBER DO BRASIL TECNOLOGIA LTDA",
            "(11) 3333-4444",
            "Av. Juscelino Kubitschek, 1909",
            "São Paulo",
            "SP",
            None,
        )])
    }

    async fn lead_profile(&self, cnpj: &str) -> Result<LeadProfile, AppError> {
        self.simulate_latency().await;

        Ok(LeadProfile {
            cnpj: cnpj.to_string(),
            company_name: "Tech Solutions Ltda".to_string(),
            phone: Some("(11) 98765-4321".to_string()),
            address: Some("Av. Paulista, 1000".to_string()),
            city: Some("São Paulo".to_string()),
            state: Some("SP".to_string()),
            zip_code: Some("01310-100".to_string()),
            cnae: Some("6201-5/00".to_string()),
            activity: Some("Desenvolvimento de programas de computador sob encomenda".to_string()),
            email: Some("contato@techsolutions.com.br".to_string()),
            website: Some("www.techsolutions.com.br".to_string()),
        })
    }
}
