// src/services/auth.rs

use bcrypt::{hash, verify};
use validator::Validate;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{LoginUserPayload, NewUser, RegisterUserPayload, User},
};

// Registro e login simples: senha com bcrypt, sem emissão de token
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    hash_cost: u32,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, hash_cost: u32) -> Self {
        Self { user_repo, hash_cost }
    }

    pub async fn register_user(&self, payload: RegisterUserPayload) -> Result<User, AppError> {
        payload.validate()?;

        if self.user_repo.find_by_email(&payload.email).await?.is_some() {
            return Err(AppError::EmailAlreadyExists);
        }

        // Hashing fora do runtime assíncrono
        let password = payload.password;
        let cost = self.hash_cost;
        let password_hash = tokio::task::spawn_blocking(move || hash(&password, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let user = self
            .user_repo
            .create_user(&NewUser {
                name: payload.name,
                email: payload.email,
                password_hash,
                role: payload.role,
                avatar_url: None,
                is_active: true,
            })
            .await?;

        tracing::info!(user_id = %user.id, role = ?user.role, "👤 Usuário registrado");

        Ok(user)
    }

    pub async fn login_user(&self, payload: LoginUserPayload) -> Result<User, AppError> {
        payload.validate()?;

        let user = self
            .user_repo
            .find_by_email(&payload.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password = payload.password;
        let password_hash = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }
}
