//! The note model and its store-assigned identifier.

use std::fmt;

use bson::oid::ObjectId;
use thiserror::Error;

/// Error returned when a note identifier fails to parse.
#[derive(Debug, Error)]
#[error("invalid note id {id:?}: {source}")]
pub struct InvalidIdError {
    id: String,
    source: bson::oid::Error,
}

/// Store-assigned identifier of a [`Note`].
///
/// Wraps the store's native object id. The canonical text form is the
/// 24-character hex rendering, which is what travels over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteId(ObjectId);

impl NoteId {
    /// Generate a fresh identifier.
    ///
    /// Stores call this when assigning an id to a newly inserted note.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parse the hex form of an identifier.
    ///
    /// Fails unless `s` is a 24-character hex string.
    pub fn parse(s: &str) -> Result<Self, InvalidIdError> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|source| InvalidIdError {
                id: s.to_owned(),
                source,
            })
    }

    /// The store's native form of this identifier.
    pub(crate) fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<ObjectId> for NoteId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

/// A note as stored and served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Store-assigned identifier, immutable once created.
    pub id: NoteId,
    /// Identifier of the author the note belongs to.
    pub author_id: String,
    /// Short title.
    pub title: String,
    /// Body text.
    pub content: String,
}

/// The writable fields of a note, without an identifier.
///
/// Input to create (the store assigns the id) and to update (the id is
/// supplied separately and every field here is replaced as given).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    /// Identifier of the author the note belongs to.
    pub author_id: String,
    /// Short title.
    pub title: String,
    /// Body text.
    pub content: String,
}
