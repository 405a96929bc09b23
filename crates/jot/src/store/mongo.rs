//! MongoDB-backed note store.

use async_trait::async_trait;
use bson::doc;
use bson::oid::ObjectId;
use futures::StreamExt;
use mongodb::error::ErrorKind;
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use crate::note::{Note, NoteDraft, NoteId};
use crate::store::{NoteStore, NoteStream, StoreError};

/// Where the notes live: connection string, database, and collection name.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// MongoDB connection string.
    pub uri: String,
    /// Database holding the note collection.
    pub database: String,
    /// Name of the note collection.
    pub collection: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "jot".to_string(),
            collection: "notes".to_string(),
        }
    }
}

/// Stored shape of a note. `_id` is omitted on insert so the store assigns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct NoteDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    author_id: String,
    title: String,
    content: String,
}

impl NoteDocument {
    fn from_draft(draft: NoteDraft) -> Self {
        Self {
            id: None,
            author_id: draft.author_id,
            title: draft.title,
            content: draft.content,
        }
    }

    fn into_note(self) -> Result<Note, StoreError> {
        let id = self
            .id
            .ok_or_else(|| StoreError::Decode("stored note has no _id".to_string()))?;
        Ok(Note {
            id: NoteId::from(id),
            author_id: self.author_id,
            title: self.title,
            content: self.content,
        })
    }
}

/// Note store backed by a MongoDB collection.
///
/// Holds the single long-lived client for the process. The driver's handles
/// are internally synchronized, so one `MongoStore` serves every in-flight
/// call.
pub struct MongoStore {
    client: Client,
    notes: Collection<NoteDocument>,
}

impl std::fmt::Debug for MongoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoStore")
            .field("collection", &self.notes.name())
            .finish_non_exhaustive()
    }
}

impl MongoStore {
    /// Connect to the store named by `config` and verify it is reachable
    /// with a `ping`.
    pub async fn connect(config: &MongoConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(|e| StoreError::Backend(format!("connect to {}: {e}", config.uri)))?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Backend(format!("ping {}: {e}", config.uri)))?;

        tracing::info!(
            uri = %config.uri,
            database = %config.database,
            collection = %config.collection,
            "connected to note store"
        );

        let notes = client
            .database(&config.database)
            .collection(&config.collection);

        Ok(Self { client, notes })
    }

    /// Disconnect, waiting for in-flight operations to finish.
    pub async fn close(&self) {
        // Client clones share one topology; shutting any of them down
        // shuts them all down.
        self.client.clone().shutdown().await;
        tracing::info!("note store connection closed");
    }
}

fn store_error(err: mongodb::error::Error) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::BsonDeserialization(e) => StoreError::Decode(e.to_string()),
        _ => StoreError::Backend(err.to_string()),
    }
}

#[async_trait]
impl NoteStore for MongoStore {
    async fn insert(&self, draft: NoteDraft) -> Result<Note, StoreError> {
        let mut doc = NoteDocument::from_draft(draft);
        let result = self.notes.insert_one(&doc).await.map_err(store_error)?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::Backend("insert returned a non-ObjectId id".to_string())
        })?;
        doc.id = Some(id);
        doc.into_note()
    }

    async fn find(&self, id: &NoteId) -> Result<Note, StoreError> {
        self.notes
            .find_one(doc! { "_id": id.as_object_id() })
            .await
            .map_err(store_error)?
            .ok_or(StoreError::NotFound)?
            .into_note()
    }

    async fn update(&self, id: &NoteId, draft: NoteDraft) -> Result<Note, StoreError> {
        let update = doc! { "$set": {
            "author_id": draft.author_id,
            "title": draft.title,
            "content": draft.content,
        } };

        self.notes
            .find_one_and_update(doc! { "_id": id.as_object_id() }, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(store_error)?
            .ok_or(StoreError::NotFound)?
            .into_note()
    }

    async fn delete(&self, id: &NoteId) -> Result<(), StoreError> {
        let result = self
            .notes
            .delete_one(doc! { "_id": id.as_object_id() })
            .await
            .map_err(store_error)?;

        if result.deleted_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn all(&self) -> Result<NoteStream, StoreError> {
        let cursor = self.notes.find(doc! {}).await.map_err(store_error)?;
        Ok(cursor
            .map(|item| item.map_err(store_error).and_then(NoteDocument::into_note))
            .boxed())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn draft_serializes_without_an_id() {
        let doc = bson::to_document(&NoteDocument::from_draft(NoteDraft {
            author_id: "ada".to_string(),
            title: "first".to_string(),
            content: "hello".to_string(),
        }))
        .unwrap();

        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("author_id").unwrap(), "ada");
        assert_eq!(doc.get_str("title").unwrap(), "first");
        assert_eq!(doc.get_str("content").unwrap(), "hello");
    }

    #[test]
    fn stored_document_decodes_into_a_note() {
        let id = ObjectId::new();
        let stored = doc! {
            "_id": id,
            "author_id": "ada",
            "title": "first",
            "content": "hello",
        };

        let doc: NoteDocument = bson::from_document(stored).unwrap();
        let note = doc.into_note().unwrap();
        assert_eq!(note.id.to_string(), id.to_hex());
        assert_eq!(note.author_id, "ada");
        assert_eq!(note.title, "first");
    }

    #[test]
    fn document_without_id_does_not_decode_into_a_note() {
        let doc = NoteDocument::from_draft(NoteDraft::default());
        let err = doc.into_note().unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }

    #[test]
    fn default_config_points_at_localhost() {
        let config = MongoConfig::default();
        assert_eq!(config.uri, "mongodb://localhost:27017");
        assert_eq!(config.database, "jot");
        assert_eq!(config.collection, "notes");
    }
}
