// src/services/notification_service.rs

use std::sync::Arc;

use chrono::{NaiveDateTime, Timelike};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::{
    common::{clock::Clock, error::AppError, text, validation::FieldErrors},
    db::NotificationRepository,
    models::notifications::{CreateReminderPayload, NewReminder, Reminder, ReminderAlert},
};

#[derive(Clone)]
pub struct NotificationService {
    repo: NotificationRepository,
    clock: Arc<dyn Clock>,
    events: broadcast::Sender<ReminderAlert>,
}

impl NotificationService {
    pub fn new(
        repo: NotificationRepository,
        clock: Arc<dyn Clock>,
        events: broadcast::Sender<ReminderAlert>,
    ) -> Self {
        Self { repo, clock, events }
    }

    pub async fn add_notification(&self, reminder: NewReminder) -> Result<Reminder, AppError> {
        let reminder = Reminder {
            id: Uuid::now_v7().to_string(),
            client_name: reminder.client_name,
            date: reminder.date,
            time: reminder.time,
            kind: reminder.kind,
            shown: false,
        };
        self.repo.add(reminder.clone()).await?;
        tracing::debug!(id = %reminder.id, date = %reminder.date, time = %reminder.time, "Lembrete agendado");
        Ok(reminder)
    }

    // Lembrete avulso vindo da API; todos os campos são obrigatórios.
    pub async fn create_from_payload(&self, payload: CreateReminderPayload) -> Result<Reminder, AppError> {
        let mut errors = FieldErrors::new();
        let client_name = errors.require("clientName", payload.client_name.as_deref()).map(str::to_string);
        let date = errors.date("date", payload.date.as_deref());
        let time = errors.time("time", payload.time.as_deref());
        let kind = errors.require("type", payload.kind.as_deref()).map(str::to_string);
        errors.finish()?;

        match (client_name, date, time, kind) {
            (Some(client_name), Some(date), Some(time), Some(kind)) => {
                self.add_notification(NewReminder {
                    client_name,
                    date,
                    time,
                    kind,
                })
                .await
            }
            _ => Err(AppError::InternalServerError(anyhow::anyhow!(
                "lembrete validado sem todos os campos"
            ))),
        }
    }

    pub async fn remove_notification(&self, id: &str) -> Result<(), AppError> {
        self.repo.remove(id).await?;
        Ok(())
    }

    pub async fn list_notifications(&self) -> Result<Vec<Reminder>, AppError> {
        self.repo.list().await
    }

    /// Hoje ou depois, ainda não exibidos (contador do sino).
    pub async fn pending_notifications(&self) -> Result<Vec<Reminder>, AppError> {
        let today = self.clock.local_now().date();
        Ok(self
            .repo
            .list()
            .await?
            .into_iter()
            .filter(|r| r.date >= today && !r.shown)
            .collect())
    }

    /// Dispara os lembretes de hoje cujo horário está a até `tolerance_minutes`
    /// de `now`. O `shown` é gravado antes da entrega; horário perdido além
    /// da tolerância nunca dispara.
    pub async fn fire_due(
        &self,
        now: NaiveDateTime,
        tolerance_minutes: u32,
    ) -> Result<Vec<Reminder>, AppError> {
        let today = now.date();
        let now_minutes = i64::from(now.hour() * 60 + now.minute());
        let tolerance = i64::from(tolerance_minutes);

        // Horário ilegível é marcado como exibido sem entrega: avisa uma vez só.
        let fired: Vec<Reminder> = self
            .repo
            .mark_due_as_shown(move |reminder| {
                if reminder.date != today {
                    return false;
                }
                match text::parse_hhmm(&reminder.time) {
                    Some(minutes) => (now_minutes - i64::from(minutes)).abs() <= tolerance,
                    None => {
                        tracing::warn!(id = %reminder.id, time = %reminder.time, "Horário de lembrete inválido; descartando");
                        true
                    }
                }
            })
            .await?
            .into_iter()
            .filter(|r| text::parse_hhmm(&r.time).is_some())
            .collect();

        for reminder in &fired {
            let alert = ReminderAlert::from(reminder);
            tracing::info!(
                id = %reminder.id,
                client = %reminder.client_name,
                kind = %reminder.kind,
                "{}", alert.title
            );
            // Sem ouvintes conectados o envio falha; o log acima já basta.
            let _ = self.events.send(alert);
        }

        Ok(fired)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReminderAlert> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{common::clock::ManualClock, db::MemoryKvStore, models::notifications::CLIENT_RETURN_KIND};
    use chrono::{NaiveDate, Utc};

    fn service() -> NotificationService {
        let store = Arc::new(MemoryKvStore::new());
        let (tx, _) = broadcast::channel(16);
        NotificationService::new(
            NotificationRepository::new(store),
            Arc::new(ManualClock::new(Utc::now())),
            tx,
        )
    }

    fn at(date: NaiveDate, hh: u32, mm: u32) -> NaiveDateTime {
        date.and_hms_opt(hh, mm, 0).unwrap()
    }

    fn reminder(date: NaiveDate, time: &str) -> NewReminder {
        NewReminder {
            client_name: "Ana".into(),
            date,
            time: time.into(),
            kind: CLIENT_RETURN_KIND.into(),
        }
    }

    #[tokio::test]
    async fn fires_within_tolerance_exactly_once() {
        let service = service();
        let mut alerts = service.subscribe();
        let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let created = service.add_notification(reminder(day, "09:00")).await.unwrap();

        assert!(service.fire_due(at(day, 8, 58), 1).await.unwrap().is_empty());

        let fired = service.fire_due(at(day, 9, 1), 1).await.unwrap();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].id, created.id);

        let alert = alerts.try_recv().unwrap();
        assert_eq!(alert.title, "🔔 Lembrete de Retorno");
        assert_eq!(alert.description, "Cliente: Ana - Retorno de Cliente");

        // Mesmo minuto de novo: nada
        assert!(service.fire_due(at(day, 9, 1), 1).await.unwrap().is_empty());
        assert!(alerts.try_recv().is_err());
        assert!(service.list_notifications().await.unwrap()[0].shown);
    }

    #[tokio::test]
    async fn missed_and_other_day_reminders_never_fire() {
        let service = service();
        let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        service.add_notification(reminder(day, "09:00")).await.unwrap();
        service.add_notification(reminder(day.succ_opt().unwrap(), "10:00")).await.unwrap();

        assert!(service.fire_due(at(day, 9, 5), 1).await.unwrap().is_empty());
        assert!(service.fire_due(at(day, 10, 0), 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unparseable_time_is_retired_without_delivery() {
        let service = service();
        let mut alerts = service.subscribe();
        let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        service.add_notification(reminder(day, "manhã")).await.unwrap();
        service.add_notification(reminder(day.succ_opt().unwrap(), "tarde")).await.unwrap();

        assert!(service.fire_due(at(day, 9, 0), 1).await.unwrap().is_empty());
        assert!(alerts.try_recv().is_err());

        // Só o de hoje sai da fila; os próximos ciclos não o reavaliam
        let stored = service.list_notifications().await.unwrap();
        assert!(stored[0].shown);
        assert!(!stored[1].shown);
        assert!(service.fire_due(at(day, 9, 1), 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn pending_excludes_past_and_shown() {
        let store = Arc::new(MemoryKvStore::new());
        let (tx, _) = broadcast::channel(16);
        let now = NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let clock = Arc::new(ManualClock::new(
            now.and_local_timezone(chrono::Local).unwrap().with_timezone(&Utc),
        ));
        let service = NotificationService::new(NotificationRepository::new(store), clock, tx);

        let today = now.date();
        service.add_notification(reminder(today.pred_opt().unwrap(), "09:00")).await.unwrap();
        service.add_notification(reminder(today, "11:00")).await.unwrap();
        service.add_notification(reminder(today, "12:00")).await.unwrap();
        service.add_notification(reminder(today.succ_opt().unwrap(), "09:00")).await.unwrap();

        service.fire_due(now, 1).await.unwrap();

        let pending = service.pending_notifications().await.unwrap();
        // Ontem fica de fora; 12:00 já foi exibido; 11:00 de hoje ainda conta.
        assert_eq!(pending.len(), 2);
        assert!(pending.iter().all(|r| r.date >= today && !r.shown));
    }

    #[tokio::test]
    async fn payload_requires_every_field() {
        let service = service();
        let err = service
            .create_from_payload(CreateReminderPayload {
                client_name: Some("Ana".into()),
                date: Some("2025-13-01".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        let AppError::ValidationError(errors) = err else {
            panic!("expected validation error");
        };
        let fields = errors.field_errors();
        assert!(fields.contains_key("date"));
        assert!(fields.contains_key("time"));
        assert!(fields.contains_key("type"));
        assert!(!fields.contains_key("clientName"));
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let service = service();
        let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let created = service.add_notification(reminder(day, "09:00")).await.unwrap();
        service.remove_notification(&created.id).await.unwrap();
        service.remove_notification(&created.id).await.unwrap();
        assert!(service.list_notifications().await.unwrap().is_empty());
    }
}
