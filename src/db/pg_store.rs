// src/db/pg_store.rs

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{types::Json, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::document_store::{
        timestamp_now, Condition, Document, DocumentStore, Filter, StoredDocument,
    },
};

// Nome do índice único criado na migration para o e-mail dos usuários
const USER_EMAIL_INDEX: &str = "idx_documents_user_email";

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Json<Document>,
}

impl From<DocumentRow> for StoredDocument {
    fn from(row: DocumentRow) -> Self {
        StoredDocument { id: row.id, body: row.body.0 }
    }
}

/// Document store sobre a tabela `documents` (uma linha por documento,
/// corpo em JSONB). Toda chamada ao banco tem tempo limite.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    // Aplica o tempo limite e traduz os erros do sqlx para o AppError
    async fn bounded<T, F>(&self, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(map_sqlx_error(e)),
            Err(_) => Err(AppError::StoreTimeout),
        }
    }
}

fn map_sqlx_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::PoolTimedOut => return AppError::StoreTimeout,
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            if db_err.constraint() == Some(USER_EMAIL_INDEX) {
                return AppError::EmailAlreadyExists;
            }
        }
        _ => {}
    }
    e.into()
}

// Acrescenta as condições do filtro ao WHERE já aberto (`collection = $1`)
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    for condition in filter.conditions() {
        match condition {
            // `@>` não casa chave ausente, então null é tratado à parte
            Condition::Eq(field, Value::Null) => {
                builder
                    .push(" AND ((body -> ")
                    .push_bind(field.clone())
                    .push(") IS NULL OR (body -> ")
                    .push_bind(field.clone())
                    .push(") = 'null'::jsonb)");
            }
            Condition::Eq(field, value) => {
                let mut probe = Document::new();
                probe.insert(field.clone(), value.clone());
                builder.push(" AND body @> ").push_bind(Json(probe));
            }
            Condition::AnyOf(field, values) => {
                builder
                    .push(" AND (body ->> ")
                    .push_bind(field.clone())
                    .push(") = ANY(")
                    .push_bind(values.clone())
                    .push(")");
            }
        }
    }
}

fn select_where<'a>(collection: &str, filter: &Filter) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new("SELECT id, body FROM documents WHERE collection = ");
    builder.push_bind(collection.to_string());
    if !filter.is_empty() {
        push_filter(&mut builder, filter);
    }
    builder
}

fn updated_at_patch() -> Document {
    let mut patch = Document::new();
    patch.insert("updated_at".to_string(), timestamp_now());
    patch
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, collection: &str, mut body: Document) -> Result<StoredDocument, AppError> {
        let now = timestamp_now();
        body.insert("created_at".to_string(), now.clone());
        body.insert("updated_at".to_string(), now);

        let row = self
            .bounded(
                sqlx::query_as::<_, DocumentRow>(
                    r#"
                    INSERT INTO documents (id, collection, body)
                    VALUES ($1, $2, $3)
                    RETURNING id, body
                    "#,
                )
                .bind(Uuid::new_v4())
                .bind(collection)
                .bind(Json(body))
                .fetch_one(&self.pool),
            )
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: Uuid,
    ) -> Result<Option<StoredDocument>, AppError> {
        let row = self
            .bounded(
                sqlx::query_as::<_, DocumentRow>(
                    "SELECT id, body FROM documents WHERE collection = $1 AND id = $2",
                )
                .bind(collection)
                .bind(id)
                .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<StoredDocument>, AppError> {
        let mut builder = select_where(collection, filter);
        builder.push(" LIMIT 1");

        let row = self
            .bounded(builder.build_query_as::<DocumentRow>().fetch_optional(&self.pool))
            .await?;

        Ok(row.map(Into::into))
    }

    // Sem ORDER BY: a ordem é a que o Postgres devolver
    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<u64>,
    ) -> Result<Vec<StoredDocument>, AppError> {
        let mut builder = select_where(collection, filter);
        if let Some(limit) = limit {
            builder
                .push(" LIMIT ")
                .push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let rows = self
            .bounded(builder.build_query_as::<DocumentRow>().fetch_all(&self.pool))
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn set_fields(
        &self,
        collection: &str,
        id: Uuid,
        mut fields: Document,
    ) -> Result<u64, AppError> {
        fields.extend(updated_at_patch());

        let result = self
            .bounded(
                sqlx::query(
                    "UPDATE documents SET body = body || $3 WHERE collection = $1 AND id = $2",
                )
                .bind(collection)
                .bind(id)
                .bind(Json(fields))
                .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected())
    }

    // Um único UPDATE: appends concorrentes não se perdem
    async fn append_to_list(
        &self,
        collection: &str,
        id: Uuid,
        field: &str,
        item: Value,
    ) -> Result<u64, AppError> {
        let result = self
            .bounded(
                sqlx::query(
                    r#"
                    UPDATE documents
                    SET body = jsonb_set(
                            body,
                            ARRAY[$3::text],
                            CASE WHEN jsonb_typeof(body -> $3::text) = 'array'
                                 THEN body -> $3::text
                                 ELSE '[]'::jsonb
                            END || jsonb_build_array($4::jsonb),
                            true
                        ) || $5
                    WHERE collection = $1 AND id = $2
                    "#,
                )
                .bind(collection)
                .bind(id)
                .bind(field)
                .bind(Json(item))
                .bind(Json(updated_at_patch()))
                .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected())
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, AppError> {
        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM documents WHERE collection = ");
        builder.push_bind(collection.to_string());
        push_filter(&mut builder, filter);

        let total = self
            .bounded(builder.build_query_scalar::<i64>().fetch_one(&self.pool))
            .await?;

        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn list_collections(&self) -> Result<Vec<String>, AppError> {
        self.bounded(
            sqlx::query_scalar::<_, String>(
                "SELECT DISTINCT collection FROM documents ORDER BY collection",
            )
            .fetch_all(&self.pool),
        )
        .await
    }
}
