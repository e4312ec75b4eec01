// Serviços externos de referência (consultas públicas, sem retry)

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    models::lookup::{CityInfo, CompanySummary, StateInfo},
};

pub mod brasil_api;
pub mod ibge;

pub use brasil_api::BrasilApiClient;
pub use ibge::IbgeClient;

/// Consulta de empresa por CNPJ (apenas dígitos).
/// `LookupNotFound` quando o CNPJ não existe; `LookupFailure` para o resto.
#[async_trait]
pub trait CompanyLookup: Send + Sync {
    async fn find_by_cnpj(&self, cnpj: &str) -> Result<CompanySummary, AppError>;
}

/// Estados e municípios para os filtros de busca.
#[async_trait]
pub trait RegionDirectory: Send + Sync {
    async fn list_states(&self) -> Result<Vec<StateInfo>, AppError>;

    async fn list_cities(&self, state_id: u32) -> Result<Vec<CityInfo>, AppError>;
}
