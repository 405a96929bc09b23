//! Jot gRPC Server
//!
//! A gRPC service exposing create, read, update, delete, and list over a
//! single note collection.
//!
//! # Architecture
//!
//! The service is stateless - every RPC decodes its request, issues exactly
//! one call on the shared [`jot::NoteStore`], and translates the outcome into
//! a response or a gRPC status. The store provides all concurrency control.
//!
//! List is server-streaming: notes are emitted one at a time as the
//! underlying scan yields them, so the server never holds the whole
//! collection in memory. A note that fails to decode mid-scan ends the
//! stream with a status; responses already sent stay sent.
//!
//! # Example Flow
//!
//! ```text
//! Client                                    Server
//! │                                           │
//! │  CreateNoteRequest{note}                  │
//! │ ─────────────────────────────────────────>│
//! │                                           │
//! │       CreateNoteResponse{note with id}    │
//! │<───────────────────────────────────────── │
//! │                                           │
//! │  ListNotesRequest{}                       │
//! │ ─────────────────────────────────────────>│
//! │                                           │
//! │       ListNotesResponse{note}  (×N)       │
//! │<───────────────────────────────────────── │
//! ```

pub mod proto {
    #![allow(missing_docs)]
    #![allow(clippy::doc_markdown)]
    tonic::include_proto!("jot.v1");
}

mod server;

pub use server::{NoteServer, NoteService};

// Re-export proto types for convenience
pub use proto::{
    Note, notes_client::NotesClient, notes_server::NotesServer as NotesGrpcServer,
};
