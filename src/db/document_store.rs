// src/db/document_store.rs

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::common::error::AppError;

/// Corpo de um documento: um objeto JSON livre.
pub type Document = Map<String, Value>;

// Nomes das coleções usadas pela aplicação
pub const USERS: &str = "user";
pub const COMPLAINTS: &str = "complaint";
pub const FAQS: &str = "faq";
pub const NEWS: &str = "news";
pub const CONTACT_MESSAGES: &str = "contactmessage";

/// Carimbo de tempo no formato gravado nos documentos (RFC 3339, UTC).
pub fn timestamp_now() -> Value {
    Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// Serializa um registro tipado como corpo de documento.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, AppError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(body)) => Ok(body),
        Ok(other) => Err(anyhow::anyhow!("documento precisa ser um objeto, veio {}", other).into()),
        Err(e) => Err(anyhow::Error::from(e).into()),
    }
}

/// Um documento persistido: a identidade interna do store mais o corpo.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: Uuid,
    pub body: Document,
}

impl StoredDocument {
    /// Converte para o formato exposto ao cliente: o id interno vira o campo `id`.
    pub fn into_record<T: DeserializeOwned>(self) -> Result<T, AppError> {
        let mut body = self.body;
        body.insert("id".to_string(), Value::String(self.id.to_string()));
        serde_json::from_value(Value::Object(body))
            .map_err(|e| AppError::CorruptDocument(format!("{}: {}", self.id, e)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `campo == valor`
    Eq(String, Value),
    /// `campo` (texto) é um dos valores
    AnyOf(String, Vec<String>),
}

/// Filtro conjuntivo: todas as condições precisam valer (AND).
/// Um filtro vazio casa com todos os documentos da coleção.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition::Eq(field.to_string(), value.into()));
        self
    }

    pub fn any_of<I, S>(mut self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions.push(Condition::AnyOf(
            field.to_string(),
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Avaliação em memória. Campo ausente só casa com `Eq(campo, null)`.
    pub fn matches(&self, body: &Document) -> bool {
        self.conditions.iter().all(|condition| match condition {
            Condition::Eq(field, expected) => {
                body.get(field).unwrap_or(&Value::Null) == expected
            }
            Condition::AnyOf(field, allowed) => body
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|actual| allowed.iter().any(|a| a == actual)),
        })
    }
}

/// Persistência genérica de coleções nomeadas.
///
/// As duas implementações (Postgres/JSONB e memória) garantem:
/// - `insert` gera o id e carimba `created_at`/`updated_at` no corpo;
/// - `set_fields` e `append_to_list` são operações atômicas únicas
///   (nunca ler-modificar-escrever) e atualizam `updated_at`;
/// - `find_many` não impõe ordenação. Hoje o resultado sai na ordem de
///   inserção, mas isso não é garantido.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Nome do backend, para diagnóstico.
    fn backend(&self) -> &'static str;

    async fn insert(&self, collection: &str, body: Document) -> Result<StoredDocument, AppError>;

    async fn find_by_id(&self, collection: &str, id: Uuid)
        -> Result<Option<StoredDocument>, AppError>;

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<StoredDocument>, AppError>;

    /// `limit = None` devolve tudo.
    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<u64>,
    ) -> Result<Vec<StoredDocument>, AppError>;

    /// Mescla `fields` no corpo. Retorna quantos documentos casaram (0 ou 1).
    async fn set_fields(&self, collection: &str, id: Uuid, fields: Document)
        -> Result<u64, AppError>;

    /// Anexa `item` ao array `field`, criando-o se não existir.
    async fn append_to_list(
        &self,
        collection: &str,
        id: Uuid,
        field: &str,
        item: Value,
    ) -> Result<u64, AppError>;

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, AppError>;

    async fn list_collections(&self) -> Result<Vec<String>, AppError>;
}
