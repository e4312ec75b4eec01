// src/db/notification_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::{json_store::JsonCollection, keys, kv_store::KeyValueStore},
    models::notifications::Reminder,
};

#[derive(Clone)]
pub struct NotificationRepository {
    reminders: JsonCollection<Reminder>,
}

impl NotificationRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            reminders: JsonCollection::new(store, keys::NOTIFICATIONS),
        }
    }

    pub async fn list(&self) -> Result<Vec<Reminder>, AppError> {
        self.reminders.load().await
    }

    pub async fn add(&self, reminder: Reminder) -> Result<(), AppError> {
        self.reminders.update(move |items| items.push(reminder)).await
    }

    pub async fn remove(&self, id: &str) -> Result<bool, AppError> {
        self.reminders
            .update(|items| {
                let before = items.len();
                items.retain(|r| r.id != id);
                items.len() != before
            })
            .await
    }

    /// Marca como exibidos, no mesmo ciclo de escrita, os lembretes que
    /// `is_due` aceitar. Devolve os que foram marcados agora.
    pub async fn mark_due_as_shown<F>(&self, is_due: F) -> Result<Vec<Reminder>, AppError>
    where
        F: Fn(&Reminder) -> bool + Send,
    {
        self.reminders
            .update(move |items| {
                let mut fired = Vec::new();
                for reminder in items.iter_mut().filter(|r| !r.shown) {
                    if is_due(reminder) {
                        reminder.shown = true;
                        fired.push(reminder.clone());
                    }
                }
                fired
            })
            .await
    }
}
