// src/models/notifications.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const LEAD_RETURN_KIND: &str = "Retorno de Lead B2B";
pub const CLIENT_RETURN_KIND: &str = "Retorno de Cliente";

// Lembrete (chave `notifications`). `shown` só vai de false para true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    #[schema(example = "Ana Souza")]
    pub client_name: String,
    #[schema(example = "2026-10-20")]
    pub date: NaiveDate,
    #[schema(example = "09:00")]
    pub time: String,
    #[serde(rename = "type")]
    #[schema(example = "Retorno de Cliente")]
    pub kind: String,
    #[serde(default)]
    pub shown: bool,
}

// Entrada para criar um lembrete; id e `shown` são do serviço.
#[derive(Debug, Clone)]
pub struct NewReminder {
    pub client_name: String,
    pub date: NaiveDate,
    pub time: String,
    pub kind: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReminderPayload {
    pub client_name: Option<String>,
    #[schema(example = "2026-10-20")]
    pub date: Option<String>,
    #[schema(example = "09:00")]
    pub time: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

// O alerta visível emitido uma única vez quando o lembrete dispara.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderAlert {
    pub reminder_id: String,
    #[schema(example = "🔔 Lembrete de Retorno")]
    pub title: String,
    #[schema(example = "Cliente: Ana Souza - Retorno de Cliente")]
    pub description: String,
}

impl From<&Reminder> for ReminderAlert {
    fn from(reminder: &Reminder) -> Self {
        Self {
            reminder_id: reminder.id.clone(),
            title: "🔔 Lembrete de Retorno".to_string(),
            description: format!("Cliente: {} - {}", reminder.client_name, reminder.kind),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PendingReminders {
    pub count: usize,
    pub items: Vec<Reminder>,
}
