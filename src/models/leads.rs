// src/models/leads.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- ENUMS / CATÁLOGOS ---

pub const PLANS: [&str; 7] = [
    "100 Mbps - R$ 79,90",
    "200 Mbps - R$ 99,90",
    "300 Mbps - R$ 119,90",
    "500 Mbps - R$ 149,90",
    "1 Gbps - R$ 199,90",
    "Empresarial 500 Mbps - R$ 299,90",
    "Empresarial 1 Gbps - R$ 399,90",
];

pub const INTERNET_PROVIDERS: [&str; 6] = [
    "Vivo Fibra",
    "Claro Internet",
    "Tim Live",
    "NET Virtua",
    "Oi Fibra",
    "Algar Telecom",
];

// ---
// 1. Empresa (identidade e contato do lead)
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeadProfile {
    #[schema(example = "06990590000123")]
    pub cnpj: String,

    #[serde(rename = "razaoSocial")]
    #[schema(example = "Tech Solutions Ltda")]
    pub company_name: String,

    #[serde(rename = "telefone", skip_serializing_if = "Option::is_none")]
    #[schema(example = "(11) 98765-4321")]
    pub phone: Option<String>,

    #[serde(rename = "endereco", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(rename = "cidade", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    #[schema(example = "SP")]
    pub state: Option<String>,

    #[serde(rename = "cep", skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnae: Option<String>,

    #[serde(rename = "atividade", skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(rename = "site", skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

// ---
// 2. Lead interessado (chave `interestedLeads`, único por cnpj)
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterestedLead {
    #[serde(flatten)]
    pub company: LeadProfile,
    pub is_interested: bool,
    #[serde(default)]
    pub wants_return: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "14:30")]
    pub return_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Vivo Fibra")]
    pub current_internet: Option<String>,
    pub added_at: DateTime<Utc>,
}

impl InterestedLead {
    pub fn cnpj(&self) -> &str {
        &self.company.cnpj
    }
}

// Atualização parcial: só os campos presentes sobrescrevem o registro.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterestedLeadPatch {
    pub razao_social: Option<String>,
    pub telefone: Option<String>,
    pub endereco: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub cep: Option<String>,
    pub cnae: Option<String>,
    pub atividade: Option<String>,
    pub email: Option<String>,
    pub site: Option<String>,
    pub is_interested: Option<bool>,
    pub wants_return: Option<bool>,
    pub return_date: Option<NaiveDate>,
    pub return_time: Option<String>,
    #[schema(example = "Claro Internet")]
    pub current_internet: Option<String>,
}

impl InterestedLeadPatch {
    pub fn apply_to(self, lead: &mut InterestedLead) {
        let company = &mut lead.company;
        if let Some(v) = self.razao_social {
            company.company_name = v;
        }
        merge(&mut company.phone, self.telefone);
        merge(&mut company.address, self.endereco);
        merge(&mut company.city, self.cidade);
        merge(&mut company.state, self.estado);
        merge(&mut company.zip_code, self.cep);
        merge(&mut company.cnae, self.cnae);
        merge(&mut company.activity, self.atividade);
        merge(&mut company.email, self.email);
        merge(&mut company.website, self.site);

        if let Some(v) = self.is_interested {
            lead.is_interested = v;
        }
        if let Some(v) = self.wants_return {
            lead.wants_return = v;
        }
        merge(&mut lead.return_date, self.return_date);
        merge(&mut lead.return_time, self.return_time);
        merge(&mut lead.current_internet, self.current_internet);
    }
}

fn merge<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

// Marcar interesse (com retorno opcional)
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleLeadReturnPayload {
    #[serde(flatten)]
    pub company: LeadProfile,
    #[serde(default)]
    pub wants_return: bool,
    #[schema(example = "2026-10-20")]
    pub return_date: Option<String>,
    #[schema(example = "14:30")]
    pub return_time: Option<String>,
}

// ---
// 3. Retorno de cliente (chave `clientReturns`, só o id é único)
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientReturn {
    pub id: String,
    #[serde(rename = "nome")]
    #[schema(example = "Ana Souza")]
    pub name: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "contato")]
    #[schema(example = "(11) 99999-8888")]
    pub contact: String,
    #[serde(rename = "plano")]
    #[schema(example = "300 Mbps - R$ 119,90")]
    pub plan: String,
    pub return_date: NaiveDate,
    #[schema(example = "09:00")]
    pub return_time: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

// Formulário de cadastro. Tudo opcional aqui para que campos ausentes virem
// erros de validação por campo, não falha de desserialização.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientReturnPayload {
    pub nome: Option<String>,
    pub endereco: Option<String>,
    pub contato: Option<String>,
    pub plano: Option<String>,
    #[schema(example = "2026-10-20")]
    pub return_date: Option<String>,
    #[schema(example = "09:00")]
    pub return_time: Option<String>,
}

// ---
// 4. Próximos retornos (hoje em diante, em ordem de data)
// ---
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingLeadReturn {
    #[serde(flatten)]
    pub lead: InterestedLead,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingClientReturn {
    #[serde(flatten)]
    pub record: ClientReturn,
    pub is_today: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContactLink {
    #[schema(example = "https://wa.me/5511999998888?text=Ol%C3%A1")]
    pub url: String,
}
