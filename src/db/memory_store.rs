// src/db/memory_store.rs

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::document_store::{timestamp_now, Document, DocumentStore, Filter, StoredDocument, USERS},
};

// Mesma regra do índice único `idx_documents_user_email` do Postgres
fn email_taken(docs: &[StoredDocument], body: &Document) -> bool {
    let Some(email) = body.get("email").and_then(Value::as_str) else {
        return false;
    };
    docs.iter()
        .any(|d| d.body.get("email").and_then(Value::as_str) == Some(email))
}

/// Document store em memória do processo.
/// Cada coleção é um `Vec` (ordem de inserção); toda escrita acontece sob o
/// mesmo lock de escrita, então `set_fields`/`append_to_list` são atômicos.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<RwLock<HashMap<String, Vec<StoredDocument>>>>,
    writes: Arc<AtomicU64>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantas escritas efetivas (insert/set/append) já aconteceram.
    #[cfg(test)]
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, collection: &str, mut body: Document) -> Result<StoredDocument, AppError> {
        let now = timestamp_now();
        body.insert("created_at".to_string(), now.clone());
        body.insert("updated_at".to_string(), now);

        let stored = StoredDocument { id: Uuid::new_v4(), body };

        let mut guard = self.collections.write().await;
        let docs = guard.entry(collection.to_string()).or_default();
        if collection == USERS && email_taken(docs, &stored.body) {
            return Err(AppError::EmailAlreadyExists);
        }
        docs.push(stored.clone());
        self.record_write();

        Ok(stored)
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: Uuid,
    ) -> Result<Option<StoredDocument>, AppError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<StoredDocument>, AppError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(&d.body)))
            .cloned())
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<u64>,
    ) -> Result<Vec<StoredDocument>, AppError> {
        let guard = self.collections.read().await;
        let Some(docs) = guard.get(collection) else {
            return Ok(Vec::new());
        };

        let take = limit
            .and_then(|l| usize::try_from(l).ok())
            .unwrap_or(usize::MAX);

        Ok(docs
            .iter()
            .filter(|d| filter.matches(&d.body))
            .take(take)
            .cloned()
            .collect())
    }

    async fn set_fields(
        &self,
        collection: &str,
        id: Uuid,
        fields: Document,
    ) -> Result<u64, AppError> {
        let mut guard = self.collections.write().await;
        let Some(doc) = guard
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
        else {
            return Ok(0);
        };

        doc.body.extend(fields);
        doc.body.insert("updated_at".to_string(), timestamp_now());
        self.record_write();

        Ok(1)
    }

    async fn append_to_list(
        &self,
        collection: &str,
        id: Uuid,
        field: &str,
        item: Value,
    ) -> Result<u64, AppError> {
        let mut guard = self.collections.write().await;
        let Some(doc) = guard
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
        else {
            return Ok(0);
        };

        match doc.body.get_mut(field) {
            Some(Value::Array(items)) => items.push(item),
            _ => {
                doc.body.insert(field.to_string(), Value::Array(vec![item]));
            }
        }
        doc.body.insert("updated_at".to_string(), timestamp_now());
        self.record_write();

        Ok(1)
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, AppError> {
        let guard = self.collections.read().await;
        let total = guard
            .get(collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(&d.body)).count())
            .unwrap_or(0);

        Ok(total as u64)
    }

    async fn list_collections(&self) -> Result<Vec<String>, AppError> {
        let guard = self.collections.read().await;
        let mut names: Vec<String> = guard.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_id_and_timestamps() {
        let store = MemoryDocumentStore::new();
        let stored = store.insert("faq", doc(json!({"question": "q"}))).await.unwrap();

        assert!(stored.body.contains_key("created_at"));
        assert!(stored.body.contains_key("updated_at"));

        let found = store.find_by_id("faq", stored.id).await.unwrap();
        assert_eq!(found, Some(stored));
    }

    #[tokio::test]
    async fn find_many_respects_filter_and_limit() {
        let store = MemoryDocumentStore::new();
        for status in ["baru", "baru", "selesai", "baru"] {
            store.insert("complaint", doc(json!({"status": status}))).await.unwrap();
        }

        let filter = Filter::new().eq("status", "baru");
        assert_eq!(store.find_many("complaint", &filter, None).await.unwrap().len(), 3);
        assert_eq!(store.find_many("complaint", &filter, Some(2)).await.unwrap().len(), 2);
        assert!(store.find_many("other", &filter, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn updates_on_missing_id_match_nothing() {
        let store = MemoryDocumentStore::new();
        let missing = Uuid::new_v4();

        let set = store
            .set_fields("complaint", missing, doc(json!({"status": "selesai"})))
            .await
            .unwrap();
        let appended = store
            .append_to_list("complaint", missing, "notes", json!({"text": "x"}))
            .await
            .unwrap();

        assert_eq!((set, appended), (0, 0));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn concurrent_appends_are_not_lost() {
        let store = MemoryDocumentStore::new();
        let stored = store
            .insert("complaint", doc(json!({"notes": []})))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .append_to_list("complaint", stored.id, "notes", json!({"text": i}))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let found = store.find_by_id("complaint", stored.id).await.unwrap().unwrap();
        assert_eq!(found.body["notes"].as_array().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn user_email_is_unique() {
        let store = MemoryDocumentStore::new();
        store.insert(USERS, doc(json!({"email": "a@example.com"}))).await.unwrap();

        let again = store.insert(USERS, doc(json!({"email": "a@example.com"}))).await;
        assert!(matches!(again, Err(AppError::EmailAlreadyExists)));

        // Outras coleções podem repetir e-mail
        store.insert("contactmessage", doc(json!({"email": "a@example.com"}))).await.unwrap();
        store.insert("contactmessage", doc(json!({"email": "a@example.com"}))).await.unwrap();

        assert_eq!(store.count(USERS, &Filter::new()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn count_and_collection_names() {
        let store = MemoryDocumentStore::new();
        store.insert("news", doc(json!({"is_published": true}))).await.unwrap();
        store.insert("news", doc(json!({"is_published": false}))).await.unwrap();
        store.insert("faq", doc(json!({"is_active": true}))).await.unwrap();

        let published = Filter::new().eq("is_published", true);
        assert_eq!(store.count("news", &published).await.unwrap(), 1);
        assert_eq!(store.count("news", &Filter::new()).await.unwrap(), 2);
        assert_eq!(store.list_collections().await.unwrap(), vec!["faq", "news"]);
    }
}
