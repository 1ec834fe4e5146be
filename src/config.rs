// src/config.rs

use std::{env, fmt::Display, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        ComplaintRepository, ContentRepository, DashboardRepository, DocumentStore,
        MemoryDocumentStore, PgDocumentStore, UserRepository,
    },
    services::{
        auth::AuthService, complaint_service::ComplaintService, content_service::ContentService,
        dashboard_service::DashboardService,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBackend {
    Postgres,
    Memory,
}

impl FromStr for DataBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(DataBackend::Postgres),
            "memory" => Ok(DataBackend::Memory),
            other => anyhow::bail!("DATA_BACKEND desconhecido: '{}' (use postgres ou memory)", other),
        }
    }
}

// Configuração lida do ambiente (e do .env, se existir)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub data_backend: DataBackend,
    pub port: u16,
    pub store_timeout: Duration,
    pub max_connections: u32,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty());

        // Sem DATABASE_URL, o padrão é o store em memória
        let data_backend = match env::var("DATA_BACKEND") {
            Ok(raw) => raw.parse()?,
            Err(_) if database_url.is_some() => DataBackend::Postgres,
            Err(_) => DataBackend::Memory,
        };
        if data_backend == DataBackend::Postgres && database_url.is_none() {
            anyhow::bail!("DATA_BACKEND=postgres exige DATABASE_URL");
        }

        Ok(Self {
            database_url,
            data_backend,
            port: env_or("PORT", 8000)?,
            store_timeout: Duration::from_millis(env_or("STORE_TIMEOUT_MS", 5000)?),
            max_connections: env_or("DB_MAX_CONNECTIONS", 5)?,
            bcrypt_cost: env_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
        })
    }
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} inválido ('{}'): {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub db_pool: Option<PgPool>,
    pub auth_service: AuthService,
    pub complaint_service: ComplaintService,
    pub content_service: ContentService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        match (config.data_backend, config.database_url.as_deref()) {
            (DataBackend::Postgres, Some(database_url)) => {
                // Conecta ao banco de dados, usando '?' para propagar erros
                let db_pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .acquire_timeout(config.store_timeout)
                    .connect(database_url)
                    .await
                    .context("Falha ao conectar ao banco de dados")?;

                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                let store = Arc::new(PgDocumentStore::new(db_pool.clone(), config.store_timeout));
                Ok(Self::with_store(store, Some(db_pool), config.bcrypt_cost))
            }
            _ => {
                tracing::warn!("⚠️ Usando document store em memória: os dados somem ao reiniciar");
                let store = Arc::new(MemoryDocumentStore::new());
                Ok(Self::with_store(store, None, config.bcrypt_cost))
            }
        }
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_store(
        store: Arc<dyn DocumentStore>,
        db_pool: Option<PgPool>,
        bcrypt_cost: u32,
    ) -> Self {
        let user_repo = UserRepository::new(store.clone());
        let complaint_repo = ComplaintRepository::new(store.clone());

        Self {
            auth_service: AuthService::new(user_repo.clone(), bcrypt_cost),
            complaint_service: ComplaintService::new(complaint_repo, user_repo),
            content_service: ContentService::new(ContentRepository::new(store.clone())),
            dashboard_service: DashboardService::new(DashboardRepository::new(store.clone())),
            store,
            db_pool,
        }
    }
}
