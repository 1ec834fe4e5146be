// src/db/user_repo.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::document_store::{to_document, DocumentStore, Filter, USERS},
    models::auth::{NewUser, User},
};

// O repositório de usuários, responsável por todas as interações com a coleção 'user'
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    // Busca um usuário pelo seu e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.store
            .find_one(USERS, &Filter::new().eq("email", email))
            .await?
            .map(|doc| doc.into_record())
            .transpose()
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        self.store
            .find_by_id(USERS, id)
            .await?
            .map(|doc| doc.into_record())
            .transpose()
    }

    // Cria um novo usuário. No Postgres, e-mail duplicado já vira
    // AppError::EmailAlreadyExists pelo índice único.
    pub async fn create_user(&self, user: &NewUser) -> Result<User, AppError> {
        self.store
            .insert(USERS, to_document(user)?)
            .await?
            .into_record()
    }
}
