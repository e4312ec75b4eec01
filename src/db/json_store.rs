// src/db/json_store.rs

use std::marker::PhantomData;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;

use crate::{common::error::AppError, db::kv_store::KeyValueStore};

// Uma coleção JSON inteira sob uma chave: carrega tudo, altera, persiste tudo.
// O mutex serializa os ciclos leitura-alteração-escrita da mesma coleção.
pub struct JsonCollection<T> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    write_lock: Arc<Mutex<()>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonCollection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            key: self.key,
            write_lock: self.write_lock.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            write_lock: Arc::new(Mutex::new(())),
            _marker: PhantomData,
        }
    }

    /// Chave ausente = coleção vazia.
    pub async fn load(&self) -> Result<Vec<T>, AppError> {
        match self.store.get(self.key).await? {
            Some(raw) => decode(self.key, &raw),
            None => Ok(Vec::new()),
        }
    }

    pub async fn update<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> Result<R, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        let out = f(&mut items);
        self.save(&items).await?;
        Ok(out)
    }

    async fn save(&self, items: &[T]) -> Result<(), AppError> {
        let raw = serde_json::to_string(items).map_err(|e| AppError::InternalServerError(e.into()))?;
        self.store.set(self.key, &raw).await
    }
}

// Um único valor JSON sob uma chave (sessão corrente, localização).
pub struct JsonDocument<T> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonDocument<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            key: self.key,
            _marker: PhantomData,
        }
    }
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _marker: PhantomData,
        }
    }

    pub async fn load(&self) -> Result<Option<T>, AppError> {
        match self.store.get(self.key).await? {
            Some(raw) => decode(self.key, &raw).map(Some),
            None => Ok(None),
        }
    }

    pub async fn save(&self, value: &T) -> Result<(), AppError> {
        let raw = serde_json::to_string(value).map_err(|e| AppError::InternalServerError(e.into()))?;
        self.store.set(self.key, &raw).await
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        self.store.remove(self.key).await
    }
}

fn decode<V: DeserializeOwned>(key: &str, raw: &str) -> Result<V, AppError> {
    serde_json::from_str(raw).map_err(|source| AppError::StorageParse {
        key: key.to_string(),
        source,
    })
}
