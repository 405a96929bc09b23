//! In-memory note store.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::{StreamExt, stream};
use tokio::sync::RwLock;

use crate::note::{Note, NoteDraft, NoteId};
use crate::store::{NoteStore, NoteStream, StoreError};

/// Note store backed by a process-local map.
///
/// Assigns ids the same way the real store does, so identifiers created here
/// parse and round-trip like stored ones.
#[derive(Debug, Default)]
pub struct MemoryStore {
    notes: RwLock<HashMap<NoteId, Note>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notes currently held.
    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    /// Whether the store holds no notes.
    pub async fn is_empty(&self) -> bool {
        self.notes.read().await.is_empty()
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn insert(&self, draft: NoteDraft) -> Result<Note, StoreError> {
        let note = Note {
            id: NoteId::generate(),
            author_id: draft.author_id,
            title: draft.title,
            content: draft.content,
        };
        self.notes.write().await.insert(note.id, note.clone());
        Ok(note)
    }

    async fn find(&self, id: &NoteId) -> Result<Note, StoreError> {
        self.notes
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, id: &NoteId, draft: NoteDraft) -> Result<Note, StoreError> {
        let mut notes = self.notes.write().await;
        let note = notes.get_mut(id).ok_or(StoreError::NotFound)?;
        note.author_id = draft.author_id;
        note.title = draft.title;
        note.content = draft.content;
        Ok(note.clone())
    }

    async fn delete(&self, id: &NoteId) -> Result<(), StoreError> {
        self.notes
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn all(&self) -> Result<NoteStream, StoreError> {
        let snapshot: Vec<Note> = self.notes.read().await.values().cloned().collect();
        Ok(stream::iter(snapshot).map(Ok).boxed())
    }
}
