// src/models/lookup.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Resultado de busca (por CNPJ, região ou GPS)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompanySummary {
    #[schema(example = "06990590000123")]
    pub cnpj: String,
    #[serde(rename = "razaoSocial")]
    #[schema(example = "NUBANK SA")]
    pub company_name: String,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    #[serde(rename = "endereco")]
    pub address: Option<String>,
    #[serde(rename = "cidade")]
    pub city: Option<String>,
    #[serde(rename = "estado")]
    pub state: Option<String>,
    pub cnae: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RegionSearchFilters {
    #[schema(example = "SP")]
    pub estado: Option<String>,
    #[schema(example = "São Paulo")]
    pub cidade: Option<String>,
    // Aceitos no formulário, mas ainda sem efeito no resultado
    pub bairro: Option<String>,
    pub cep: Option<String>,
    pub cnae: Option<String>,
}

// Última localização conhecida (chave `userLocation`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct GeoLocation {
    #[validate(range(min = -90.0, max = 90.0, message = "invalid_latitude"))]
    #[schema(example = -23.5613)]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "invalid_longitude"))]
    #[schema(example = -46.6565)]
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NearbySearchPayload {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

// Referências do IBGE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StateInfo {
    #[schema(example = 35)]
    pub id: u32,
    #[schema(example = "SP")]
    pub sigla: String,
    #[schema(example = "São Paulo")]
    pub nome: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CityInfo {
    #[schema(example = 3550308)]
    pub id: u32,
    #[schema(example = "São Paulo")]
    pub nome: String,
}
