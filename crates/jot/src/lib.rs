//! Jot: a single note collection behind a uniform store interface.
//!
//! The crate models one document type, the [`Note`], and the [`NoteStore`]
//! primitives a service needs on top of it: insert, find, update, delete,
//! and a full-collection scan. [`MongoStore`] is the production backend;
//! [`MemoryStore`] keeps notes in a process-local map for tests and local
//! development.
//!
//! Identifiers are store-assigned. [`NoteId`] wraps the store's native
//! object id and is the only way an id enters the system: client-supplied
//! text must go through [`NoteId::parse`], which rejects anything that is
//! not a 24-character hex string before a store call is made.

mod note;
mod store;

pub use note::{InvalidIdError, Note, NoteDraft, NoteId};
pub use store::{MemoryStore, MongoConfig, MongoStore, NoteStore, NoteStream, StoreError};
