// src/db/lead_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::{json_store::JsonCollection, keys, kv_store::KeyValueStore},
    models::leads::{ClientReturn, InterestedLead, InterestedLeadPatch},
};

// Leads interessados (únicos por cnpj) e retornos de clientes (lista simples).
// As duas coleções são independentes: não há transação entre elas.
#[derive(Clone)]
pub struct LeadRepository {
    interested: JsonCollection<InterestedLead>,
    returns: JsonCollection<ClientReturn>,
}

impl LeadRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            interested: JsonCollection::new(store.clone(), keys::INTERESTED_LEADS),
            returns: JsonCollection::new(store, keys::CLIENT_RETURNS),
        }
    }

    // =========================================================================
    //  LEADS INTERESSADOS
    // =========================================================================

    pub async fn list_interested(&self) -> Result<Vec<InterestedLead>, AppError> {
        self.interested.load().await
    }

    pub async fn find_interested(&self, cnpj: &str) -> Result<Option<InterestedLead>, AppError> {
        Ok(self
            .list_interested()
            .await?
            .into_iter()
            .find(|l| l.cnpj() == cnpj))
    }

    /// Upsert por cnpj: substitui no lugar ou acrescenta no fim.
    pub async fn upsert_interested(&self, lead: InterestedLead) -> Result<(), AppError> {
        self.interested
            .update(move |leads| {
                match leads.iter().position(|l| l.cnpj() == lead.cnpj()) {
                    Some(index) => leads[index] = lead,
                    None => leads.push(lead),
                }
            })
            .await
    }

    /// Mescla os campos presentes. Cnpj inexistente: nada muda, sem erro.
    pub async fn update_interested(
        &self,
        cnpj: &str,
        patch: InterestedLeadPatch,
    ) -> Result<Option<InterestedLead>, AppError> {
        self.interested
            .update(move |leads| {
                leads.iter_mut().find(|l| l.cnpj() == cnpj).map(|lead| {
                    patch.apply_to(lead);
                    lead.clone()
                })
            })
            .await
    }

    // =========================================================================
    //  RETORNOS DE CLIENTES
    // =========================================================================

    pub async fn list_returns(&self) -> Result<Vec<ClientReturn>, AppError> {
        self.returns.load().await
    }

    pub async fn add_return(&self, record: ClientReturn) -> Result<(), AppError> {
        self.returns.update(move |records| records.push(record)).await
    }

    /// Remove pelo id; idempotente.
    pub async fn remove_return(&self, id: &str) -> Result<bool, AppError> {
        self.returns
            .update(|records| {
                let before = records.len();
                records.retain(|r| r.id != id);
                records.len() != before
            })
            .await
    }
}
