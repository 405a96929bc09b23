//! The store seam and its backends.
//!
//! [`NoteStore`] is the set of collection primitives the service layer
//! consumes: insert, find, update, delete, and a full-collection scan.
//! [`MongoStore`] is the production backend; [`MemoryStore`] holds notes in a
//! process-local map for tests and local development.

mod memory;
mod mongo;

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

pub use memory::MemoryStore;
pub use mongo::{MongoConfig, MongoStore};

use crate::note::{Note, NoteDraft, NoteId};

/// Errors reported by a [`NoteStore`] backend.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// No stored note matched the requested identifier.
    #[error("note not found")]
    NotFound,
    /// A stored document could not be decoded into a note.
    #[error("could not decode stored note: {0}")]
    Decode(String),
    /// The backing store failed or was unreachable.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// A lazy, finite sequence of decoded notes.
///
/// Item errors abort the scan: after the first `Err` the stream yields
/// nothing further.
pub type NoteStream = BoxStream<'static, Result<Note, StoreError>>;

/// Collection primitives over a single note collection.
///
/// One shared instance serves every in-flight call, so implementations must
/// be safe for concurrent use.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Insert `draft` as a new note and return it with its assigned id.
    async fn insert(&self, draft: NoteDraft) -> Result<Note, StoreError>;

    /// Fetch the note with the given id.
    async fn find(&self, id: &NoteId) -> Result<Note, StoreError>;

    /// Replace every draft field of the note with the given id and return
    /// the note as it now stands.
    async fn update(&self, id: &NoteId, draft: NoteDraft) -> Result<Note, StoreError>;

    /// Remove the note with the given id.
    async fn delete(&self, id: &NoteId) -> Result<(), StoreError>;

    /// Open an unfiltered scan over the whole collection.
    ///
    /// Notes are yielded in store-native order; nothing further is
    /// guaranteed about ordering.
    async fn all(&self) -> Result<NoteStream, StoreError>;
}
