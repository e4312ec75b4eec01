// src/services/lookup_service.rs

use std::sync::Arc;

use validator::Validate;

use crate::{
    clients::{CompanyLookup, RegionDirectory},
    common::{
        error::{field_error, AppError},
        text,
        validation::FieldErrors,
    },
    db::SessionRepository,
    models::{
        leads::LeadProfile,
        lookup::{CityInfo, CompanySummary, GeoLocation, NearbySearchPayload, RegionSearchFilters, StateInfo},
    },
    services::search_provider::LeadSearchProvider,
};

// Consultas externas (CNPJ, IBGE), busca de leads e última localização.
#[derive(Clone)]
pub struct LookupService {
    companies: Arc<dyn CompanyLookup>,
    regions: Arc<dyn RegionDirectory>,
    search: Arc<dyn LeadSearchProvider>,
    session_repo: SessionRepository,
}

impl LookupService {
    pub fn new(
        companies: Arc<dyn CompanyLookup>,
        regions: Arc<dyn RegionDirectory>,
        search: Arc<dyn LeadSearchProvider>,
        session_repo: SessionRepository,
    ) -> Self {
        Self {
            companies,
            regions,
            search,
            session_repo,
        }
    }

    /// Aceita o CNPJ com ou sem máscara.
    pub async fn lookup_cnpj(&self, raw: &str) -> Result<CompanySummary, AppError> {
        let cnpj = text::digits_only(raw);
        if cnpj.is_empty() {
            return Err(field_error("cnpj", "invalid_cnpj"));
        }
        self.companies.find_by_cnpj(&cnpj).await
    }

    pub async fn list_states(&self) -> Result<Vec<StateInfo>, AppError> {
        self.regions.list_states().await
    }

    pub async fn list_cities(&self, state_id: u32) -> Result<Vec<CityInfo>, AppError> {
        self.regions.list_cities(state_id).await
    }

    pub async fn search_region(&self, filters: RegionSearchFilters) -> Result<Vec<CompanySummary>, AppError> {
        let mut errors = FieldErrors::new();
        let estado = errors.require("estado", filters.estado.as_deref());
        let cidade = errors.require("cidade", filters.cidade.as_deref());
        errors.finish()?;

        // Bairro, CEP e CNAE seguem só para o log: o provedor atual não filtra por eles.
        tracing::debug!(
            bairro = ?filters.bairro,
            cep = ?filters.cep,
            cnae = ?filters.cnae,
            "Busca por região"
        );

        match (estado, cidade) {
            (Some(estado), Some(cidade)) => self.search.search_region(estado, cidade).await,
            _ => Ok(Vec::new()),
        }
    }

    /// Usa as coordenadas da requisição (e as guarda) ou, na falta delas,
    /// a última localização conhecida.
    pub async fn search_nearby(&self, payload: NearbySearchPayload) -> Result<Vec<CompanySummary>, AppError> {
        let location = match (payload.latitude, payload.longitude) {
            (Some(latitude), Some(longitude)) => {
                let location = GeoLocation { latitude, longitude };
                self.save_location(location).await?;
                location
            }
            _ => self
                .session_repo
                .location()
                .await?
                .ok_or_else(|| field_error("location", "missing_location"))?,
        };

        self.search.search_nearby(location).await
    }

    pub async fn lead_profile(&self, cnpj: &str) -> Result<LeadProfile, AppError> {
        self.search.lead_profile(cnpj).await
    }

    pub async fn save_location(&self, location: GeoLocation) -> Result<GeoLocation, AppError> {
        location.validate()?;
        self.session_repo.save_location(&location).await?;
        Ok(location)
    }

    pub async fn get_location(&self) -> Result<Option<GeoLocation>, AppError> {
        self.session_repo.location().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::MemoryKvStore, services::search_provider::MockLeadSearchProvider};
    use async_trait::async_trait;
    use std::{sync::Mutex, time::Duration};

    #[derive(Default)]
    struct RecordingLookup {
        asked: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CompanyLookup for RecordingLookup {
        async fn find_by_cnpj(&self, cnpj: &str) -> Result<CompanySummary, AppError> {
            self.asked.lock().unwrap().push(cnpj.to_string());
            if cnpj == "00000000000000" {
                return Err(AppError::LookupNotFound);
            }
            Ok(CompanySummary {
                cnpj: cnpj.to_string(),
                company_name: "Empresa".into(),
                phone: None,
                address: None,
                city: None,
                state: None,
                cnae: None,
            })
        }
    }

    struct NoRegions;

    #[async_trait]
    impl RegionDirectory for NoRegions {
        async fn list_states(&self) -> Result<Vec<StateInfo>, AppError> {
            Err(AppError::LookupFailure("offline".into()))
        }

        async fn list_cities(&self, _state_id: u32) -> Result<Vec<CityInfo>, AppError> {
            Ok(Vec::new())
        }
    }

    fn service(lookup: Arc<RecordingLookup>) -> LookupService {
        let store = Arc::new(MemoryKvStore::new());
        LookupService::new(
            lookup,
            Arc::new(NoRegions),
            Arc::new(MockLeadSearchProvider::new(Duration::ZERO)),
            SessionRepository::new(store),
        )
    }

    #[tokio::test]
    async fn cnpj_is_reduced_to_digits_before_lookup() {
        let lookup = Arc::new(RecordingLookup::default());
        let service = service(lookup.clone());

        service.lookup_cnpj("06.990.590/0001-23").await.unwrap();
        assert_eq!(lookup.asked.lock().unwrap().as_slice(), ["06990590000123"]);

        assert!(matches!(
            service.lookup_cnpj("00.000.000/0000-00").await.unwrap_err(),
            AppError::LookupNotFound
        ));
        assert!(matches!(
            service.lookup_cnpj("abc").await.unwrap_err(),
            AppError::ValidationError(_)
        ));
    }

    #[tokio::test]
    async fn region_search_requires_state_and_city() {
        let service = service(Arc::default());
        let err = service
            .search_region(RegionSearchFilters {
                estado: Some("SP".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        let AppError::ValidationError(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.field_errors().contains_key("cidade"));

        let results = service
            .search_region(RegionSearchFilters {
                estado: Some("SP".into()),
                cidade: Some("Campinas".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn nearby_search_falls_back_to_the_stored_location() {
        let service = service(Arc::default());

        assert!(matches!(
            service.search_nearby(NearbySearchPayload::default()).await.unwrap_err(),
            AppError::ValidationError(_)
        ));

        service
            .search_nearby(NearbySearchPayload {
                latitude: Some(-23.56),
                longitude: Some(-46.65),
            })
            .await
            .unwrap();
        assert_eq!(
            service.get_location().await.unwrap(),
            Some(GeoLocation {
                latitude: -23.56,
                longitude: -46.65
            })
        );

        let results = service.search_nearby(NearbySearchPayload::default()).await.unwrap();
        assert_eq!(results[0].company_name, "UBER DO BRASIL TECNOLOGIA LTDA");
    }

    #[tokio::test]
    async fn out_of_range_coordinates_are_rejected() {
        let service = service(Arc::default());
        let err = service
            .save_location(GeoLocation {
                latitude: 91.0,
                longitude: 0.0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(service.get_location().await.unwrap(), None);
    }

    #[tokio::test]
    async fn reference_failures_surface_as_lookup_failures() {
        let service = service(Arc::default());
        assert!(matches!(
            service.list_states().await.unwrap_err(),
            AppError::LookupFailure(_)
        ));
    }
}
