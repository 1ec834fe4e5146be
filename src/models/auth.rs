// src/models/auth.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Operator,
    Admin,
}

// Representa um usuário vindo do document store
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    #[schema(example = "Siti Rahma")]
    pub name: String,
    #[schema(example = "siti@example.com")]
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    #[serde(default)]
    pub role: Role,
    pub avatar_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

// O que é gravado no registro (aqui o hash vai junto)
#[derive(Debug, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub avatar_url: Option<String>,
    pub is_active: bool,
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    #[validate(email(message = "Email tidak valid."))]
    pub email: String,
    #[validate(length(min = 1, message = "required"))]
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "Email tidak valid."))]
    pub email: String,
    pub password: String,
}

// Login sem token: devolve só o perfil
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: User,
}
