// src/clients/brasil_api.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    clients::CompanyLookup,
    common::error::AppError,
    models::lookup::CompanySummary,
};

pub const BRASIL_API_URL: &str = "https://brasilapi.com.br/api";

#[derive(Debug, Deserialize)]
struct BrasilApiCompany {
    cnpj: String,
    razao_social: String,
    ddd_telefone_1: Option<String>,
    logradouro: Option<String>,
    numero: Option<String>,
    municipio: Option<String>,
    uf: Option<String>,
    cnae_fiscal: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct BrasilApiError {
    message: Option<String>,
}

impl From<BrasilApiCompany> for CompanySummary {
    fn from(company: BrasilApiCompany) -> Self {
        let address: Vec<String> = [company.logradouro, company.numero]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect();

        Self {
            cnpj: company.cnpj,
            company_name: company.razao_social,
            phone: company.ddd_telefone_1.filter(|p| !p.trim().is_empty()),
            address: (!address.is_empty()).then(|| address.join(", ")),
            city: company.municipio,
            state: company.uf,
            cnae: company.cnae_fiscal.map(|c| c.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct BrasilApiClient {
    client: Client,
    base_url: String,
}

impl BrasilApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalServerError(e.into()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CompanyLookup for BrasilApiClient {
    async fn find_by_cnpj(&self, cnpj: &str) -> Result<CompanySummary, AppError> {
        let url = format!("{}/cnpj/v1/{}", self.base_url, cnpj);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::LookupFailure(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::LookupNotFound);
        }

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<BrasilApiError>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("Erro ao buscar dados do CNPJ (HTTP {status})."));
            return Err(AppError::LookupFailure(message));
        }

        let company: BrasilApiCompany = response
            .json()
            .await
            .map_err(|e| AppError::LookupFailure(e.to_string()))?;

        Ok(company.into())
    }
}
