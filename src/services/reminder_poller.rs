// src/services/reminder_poller.rs

use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time::MissedTickBehavior};

use crate::{common::clock::Clock, services::notification_service::NotificationService};

#[derive(Debug, Clone, Copy)]
pub struct PollerSettings {
    pub tick: Duration,
    pub tolerance_minutes: u32,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(60),
            tolerance_minutes: 1,
        }
    }
}

// Tarefa de fundo que compara os lembretes com o relógio a cada tick.
pub struct ReminderPoller {
    notifications: NotificationService,
    clock: Arc<dyn Clock>,
    settings: PollerSettings,
}

impl ReminderPoller {
    pub fn new(
        notifications: NotificationService,
        clock: Arc<dyn Clock>,
        settings: PollerSettings,
    ) -> Self {
        Self {
            notifications,
            clock,
            settings,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }

    pub async fn run(self) {
        tracing::info!(
            tick_secs = self.settings.tick.as_secs(),
            tolerance = self.settings.tolerance_minutes,
            "⏰ Verificador de lembretes iniciado"
        );

        let mut ticker = tokio::time::interval(self.settings.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            self.tick_once().await;
        }
    }

    /// Uma verificação. Erros de armazenamento são logados e o laço segue.
    pub async fn tick_once(&self) -> usize {
        let now = self.clock.local_now();
        match self
            .notifications
            .fire_due(now, self.settings.tolerance_minutes)
            .await
        {
            Ok(fired) => fired.len(),
            Err(e) => {
                tracing::error!(error = %e, "Falha ao verificar lembretes");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::clock::ManualClock,
        db::{keys, KeyValueStore, MemoryKvStore, NotificationRepository},
        models::notifications::{NewReminder, LEAD_RETURN_KIND},
    };
    use chrono::{Local, NaiveDate, Utc};
    use tokio::sync::broadcast;

    fn local(date: NaiveDate, hh: u32, mm: u32) -> chrono::DateTime<Utc> {
        date.and_hms_opt(hh, mm, 0)
            .unwrap()
            .and_local_timezone(Local)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[tokio::test]
    async fn tick_fires_due_reminder_and_survives_corrupt_storage() {
        let store = Arc::new(MemoryKvStore::new());
        let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let clock = Arc::new(ManualClock::new(local(day, 14, 29)));
        let (tx, mut rx) = broadcast::channel(8);
        let notifications =
            NotificationService::new(NotificationRepository::new(store.clone()), clock.clone(), tx);

        notifications
            .add_notification(NewReminder {
                client_name: "Tech Solutions Ltda".into(),
                date: day,
                time: "14:30".into(),
                kind: LEAD_RETURN_KIND.into(),
            })
            .await
            .unwrap();

        let poller = ReminderPoller::new(notifications, clock.clone(), PollerSettings::default());
        assert_eq!(poller.tick_once().await, 1);
        assert!(rx.try_recv().unwrap().description.contains("Tech Solutions Ltda"));
        assert_eq!(poller.tick_once().await, 0);

        store.set(keys::NOTIFICATIONS, "[{").await.unwrap();
        assert_eq!(poller.tick_once().await, 0);
    }
}
