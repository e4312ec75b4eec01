// src/services/lead_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{clock::Clock, error::AppError, text, validation::FieldErrors},
    db::LeadRepository,
    models::{
        leads::{
            ClientReturn, ClientReturnPayload, InterestedLead, InterestedLeadPatch, LeadProfile,
            ScheduleLeadReturnPayload, UpcomingClientReturn, UpcomingLeadReturn,
        },
        notifications::{NewReminder, CLIENT_RETURN_KIND, LEAD_RETURN_KIND},
    },
    services::notification_service::NotificationService,
};

const LEAD_CONTACT_MESSAGE: &str = "Olá! Encontrei sua empresa através de nossa busca de leads B2B. Gostaria de conversar sobre nossos serviços.";

pub fn lead_contact_link(company: &LeadProfile) -> Option<String> {
    text::whatsapp_link(company.phone.as_deref()?, LEAD_CONTACT_MESSAGE)
}

/// Mensagem de retorno para um lead já marcado como interessado.
pub fn lead_follow_up_link(lead: &InterestedLead) -> Option<String> {
    let message = format!(
        "Olá {}! Conforme combinado, estou retornando o contato. Como posso ajudá-los?",
        lead.company.company_name
    );
    text::whatsapp_link(lead.company.phone.as_deref()?, &message)
}

pub fn client_return_contact_link(record: &ClientReturn) -> Option<String> {
    let message = format!(
        "Olá {}! Conforme combinado, estou retornando o contato sobre o plano {}. Como posso ajudá-lo?",
        record.name, record.plan
    );
    text::whatsapp_link(&record.contact, &message)
}

#[derive(Clone)]
pub struct LeadService {
    repo: LeadRepository,
    notifications: NotificationService,
    clock: Arc<dyn Clock>,
}

impl LeadService {
    pub fn new(repo: LeadRepository, notifications: NotificationService, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            notifications,
            clock,
        }
    }

    // =========================================================================
    //  LEADS INTERESSADOS
    // =========================================================================

    pub async fn add_interested_lead(&self, lead: InterestedLead) -> Result<(), AppError> {
        tracing::debug!(cnpj = %lead.cnpj(), "Salvando lead interessado");
        self.repo.upsert_interested(lead).await
    }

    /// Cnpj desconhecido: devolve `None` e não altera nada.
    pub async fn update_interested_lead(
        &self,
        cnpj: &str,
        patch: InterestedLeadPatch,
    ) -> Result<Option<InterestedLead>, AppError> {
        self.repo.update_interested(cnpj, patch).await
    }

    pub async fn list_interested_leads(&self) -> Result<Vec<InterestedLead>, AppError> {
        self.repo.list_interested().await
    }

    pub async fn get_interested_lead(&self, cnpj: &str) -> Result<Option<InterestedLead>, AppError> {
        self.repo.find_interested(cnpj).await
    }

    /// Leads com retorno pedido para hoje ou depois, do mais próximo ao mais distante.
    pub async fn upcoming_lead_returns(&self) -> Result<Vec<UpcomingLeadReturn>, AppError> {
        let today = self.clock.local_now().date();
        let mut upcoming: Vec<UpcomingLeadReturn> = self
            .repo
            .list_interested()
            .await?
            .into_iter()
            .filter_map(|lead| {
                let date = lead.return_date.filter(|d| lead.wants_return && *d >= today)?;
                Some(UpcomingLeadReturn {
                    is_today: date == today,
                    lead,
                })
            })
            .collect();
        upcoming.sort_by(|a, b| {
            (a.lead.return_date, &a.lead.return_time).cmp(&(b.lead.return_date, &b.lead.return_time))
        });
        Ok(upcoming)
    }

    /// Marca o lead como interessado e, se pedido, agenda o retorno.
    /// São duas gravações independentes: o lead fica salvo mesmo se o
    /// lembrete falhar.
    pub async fn schedule_lead_return(
        &self,
        payload: ScheduleLeadReturnPayload,
    ) -> Result<InterestedLead, AppError> {
        let mut errors = FieldErrors::new();
        errors.require("cnpj", Some(payload.company.cnpj.as_str()));
        errors.require("razaoSocial", Some(payload.company.company_name.as_str()));

        let (return_date, return_time) = if payload.wants_return {
            (
                errors.date("returnDate", payload.return_date.as_deref()),
                errors.time("returnTime", payload.return_time.as_deref()),
            )
        } else {
            (None, None)
        };
        errors.finish()?;

        let lead = InterestedLead {
            company: payload.company,
            is_interested: true,
            wants_return: payload.wants_return,
            return_date,
            return_time,
            current_internet: None,
            added_at: self.clock.now(),
        };
        self.repo.upsert_interested(lead.clone()).await?;

        if let (true, Some(date), Some(time)) = (lead.wants_return, lead.return_date, lead.return_time.clone()) {
            self.notifications
                .add_notification(NewReminder {
                    client_name: lead.company.company_name.clone(),
                    date,
                    time,
                    kind: LEAD_RETURN_KIND.to_string(),
                })
                .await?;
        }

        tracing::info!(cnpj = %lead.cnpj(), wants_return = lead.wants_return, "✅ Lead marcado como interessado");
        Ok(lead)
    }

    // =========================================================================
    //  RETORNOS DE CLIENTES
    // =========================================================================

    pub async fn add_client_return(&self, record: ClientReturn) -> Result<(), AppError> {
        self.repo.add_return(record).await
    }

    /// Idempotente: id ausente não é erro.
    pub async fn remove_client_return(&self, id: &str) -> Result<(), AppError> {
        self.repo.remove_return(id).await?;
        Ok(())
    }

    /// Remove apenas se o registro pertencer a `email`; caso contrário nada muda.
    pub async fn remove_client_return_for(&self, id: &str, email: &str) -> Result<(), AppError> {
        if self.get_client_return(id, email).await?.is_some() {
            self.remove_client_return(id).await?;
        }
        Ok(())
    }

    pub async fn list_client_returns_for(&self, email: &str) -> Result<Vec<ClientReturn>, AppError> {
        Ok(self
            .repo
            .list_returns()
            .await?
            .into_iter()
            .filter(|r| r.created_by == email)
            .collect())
    }

    pub async fn upcoming_client_returns_for(&self, email: &str) -> Result<Vec<UpcomingClientReturn>, AppError> {
        let today = self.clock.local_now().date();
        let mut upcoming: Vec<UpcomingClientReturn> = self
            .list_client_returns_for(email)
            .await?
            .into_iter()
            .filter(|r| r.return_date >= today)
            .map(|record| UpcomingClientReturn {
                is_today: record.return_date == today,
                record,
            })
            .collect();
        upcoming.sort_by(|a, b| {
            (a.record.return_date, &a.record.return_time).cmp(&(b.record.return_date, &b.record.return_time))
        });
        Ok(upcoming)
    }

    pub async fn get_client_return(&self, id: &str, email: &str) -> Result<Option<ClientReturn>, AppError> {
        Ok(self
            .repo
            .list_returns()
            .await?
            .into_iter()
            .find(|r| r.id == id && r.created_by == email))
    }

    /// Cadastro completo vindo do formulário: valida, normaliza o contato,
    /// grava o registro e agenda o lembrete.
    pub async fn register_client_return(
        &self,
        form: ClientReturnPayload,
        creator: &str,
    ) -> Result<ClientReturn, AppError> {
        let mut errors = FieldErrors::new();
        let name = errors.require("nome", form.nome.as_deref()).map(str::to_string);
        let address = errors.require("endereco", form.endereco.as_deref()).map(str::to_string);
        // Normaliza antes de exigir: contato sem dígitos conta como vazio.
        let contact = form.contato.as_deref().map(text::format_whatsapp);
        let contact = errors.require("contato", contact.as_deref()).map(str::to_string);
        let plan = errors.require("plano", form.plano.as_deref()).map(str::to_string);
        let date = errors.date("returnDate", form.return_date.as_deref());
        let time = errors.time("returnTime", form.return_time.as_deref());
        errors.finish()?;

        let (Some(name), Some(address), Some(contact), Some(plan), Some(return_date), Some(return_time)) =
            (name, address, contact, plan, date, time)
        else {
            return Err(AppError::InternalServerError(anyhow::anyhow!(
                "retorno validado sem todos os campos"
            )));
        };

        let record = ClientReturn {
            id: Uuid::now_v7().to_string(),
            name,
            address,
            contact,
            plan,
            return_date,
            return_time,
            created_by: creator.to_string(),
            created_at: self.clock.now(),
        };
        self.repo.add_return(record.clone()).await?;

        self.notifications
            .add_notification(NewReminder {
                client_name: record.name.clone(),
                date: record.return_date,
                time: record.return_time.clone(),
                kind: CLIENT_RETURN_KIND.to_string(),
            })
            .await?;

        tracing::info!(id = %record.id, created_by = %record.created_by, "📅 Retorno de cliente agendado");
        Ok(record)
    }
}
