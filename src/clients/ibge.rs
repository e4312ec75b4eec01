// src/clients/ibge.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    clients::RegionDirectory,
    common::error::AppError,
    models::lookup::{CityInfo, StateInfo},
};

pub const IBGE_API_URL: &str = "https://servicodados.ibge.gov.br/api/v1/localidades";

#[derive(Clone)]
pub struct IbgeClient {
    client: Client,
    base_url: String,
}

impl IbgeClient {
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

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::LookupFailure(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::LookupFailure(format!(
                "IBGE respondeu HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::LookupFailure(e.to_string()))
    }
}

#[async_trait]
impl RegionDirectory for IbgeClient {
    async fn list_states(&self) -> Result<Vec<StateInfo>, AppError> {
        let mut states: Vec<StateInfo> = self.get_json("/estados").await?;
        states.sort_by(|a, b| a.nome.cmp(&b.nome));
        Ok(states)
    }

    async fn list_cities(&self, state_id: u32) -> Result<Vec<CityInfo>, AppError> {
        let mut cities: Vec<CityInfo> = self
            .get_json(&format!("/estados/{state_id}/municipios"))
            .await?;
        cities.sort_by(|a, b| a.nome.cmp(&b.nome));
        Ok(cities)
    }
}
