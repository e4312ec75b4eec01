// src/db/user_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::{json_store::JsonCollection, keys, kv_store::KeyValueStore},
    models::auth::Account,
};

// O repositório de contas provisionadas (chave `users`)
#[derive(Clone)]
pub struct UserRepository {
    accounts: JsonCollection<Account>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            accounts: JsonCollection::new(store, keys::USERS),
        }
    }

    pub async fn list(&self) -> Result<Vec<Account>, AppError> {
        self.accounts.load().await
    }

    // Busca uma conta pelo e-mail (comparação exata)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        Ok(self.list().await?.into_iter().find(|a| a.email == email))
    }

    // Cria a conta; e-mail repetido vira EmailAlreadyExists
    pub async fn create(&self, account: Account) -> Result<Account, AppError> {
        self.accounts
            .update(move |accounts| {
                if accounts.iter().any(|a| a.email == account.email) {
                    return Err(AppError::EmailAlreadyExists);
                }
                accounts.push(account.clone());
                Ok(account)
            })
            .await?
    }

    /// Remove pelo id. Retorna se algo foi removido.
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        self.accounts
            .update(|accounts| {
                let before = accounts.len();
                accounts.retain(|a| a.id != id);
                accounts.len() != before
            })
            .await
    }
}
