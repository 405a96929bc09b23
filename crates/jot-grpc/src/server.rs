//! gRPC server implementation for the Notes service.

use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::{Stream, StreamExt, wrappers::ReceiverStream};
use tonic::{Request, Response, Status};

use jot::{NoteDraft, NoteId, NoteStore, StoreError};

use crate::proto::{
    self, CreateNoteRequest, CreateNoteResponse, DeleteNoteRequest, DeleteNoteResponse,
    ListNotesRequest, ListNotesResponse, ReadNoteRequest, ReadNoteResponse, UpdateNoteRequest,
    UpdateNoteResponse,
};

/// The Notes gRPC service implementation.
///
/// Holds no per-call state: every RPC parses its input, issues exactly one
/// call on the shared store, and maps the outcome onto a status code.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl std::fmt::Debug for NoteService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteService").finish_non_exhaustive()
    }
}

impl NoteService {
    /// Create a new note service over the given store.
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }
}

type ListNotesStream = Pin<Box<dyn Stream<Item = Result<ListNotesResponse, Status>> + Send>>;

#[tonic::async_trait]
impl proto::notes_server::Notes for NoteService {
    type ListNotesStream = ListNotesStream;

    async fn create_note(
        &self,
        request: Request<CreateNoteRequest>,
    ) -> Result<Response<CreateNoteResponse>, Status> {
        let note = request
            .into_inner()
            .note
            .ok_or_else(|| Status::invalid_argument("note is required"))?;

        let created = self
            .store
            .insert(draft_from_proto(note))
            .await
            .map_err(|e| Status::internal(format!("could not create note: {e}")))?;

        tracing::debug!(id = %created.id, "created note");

        Ok(Response::new(CreateNoteResponse {
            note: Some(note_to_proto(created)),
        }))
    }

    async fn read_note(
        &self,
        request: Request<ReadNoteRequest>,
    ) -> Result<Response<ReadNoteResponse>, Status> {
        let id = parse_id(&request.into_inner().id)?;

        let note = self
            .store
            .find(&id)
            .await
            .map_err(|e| lookup_failure(&id, e))?;

        tracing::debug!(id = %id, "read note");

        Ok(Response::new(ReadNoteResponse {
            note: Some(note_to_proto(note)),
        }))
    }

    async fn update_note(
        &self,
        request: Request<UpdateNoteRequest>,
    ) -> Result<Response<UpdateNoteResponse>, Status> {
        let note = request
            .into_inner()
            .note
            .ok_or_else(|| Status::invalid_argument("note is required"))?;
        let id = parse_id(&note.id)?;

        let updated = self
            .store
            .update(&id, draft_from_proto(note))
            .await
            .map_err(|e| lookup_failure(&id, e))?;

        tracing::debug!(id = %id, "updated note");

        Ok(Response::new(UpdateNoteResponse {
            note: Some(note_to_proto(updated)),
        }))
    }

    async fn delete_note(
        &self,
        request: Request<DeleteNoteRequest>,
    ) -> Result<Response<DeleteNoteResponse>, Status> {
        let id = parse_id(&request.into_inner().id)?;

        // Every delete failure is reported as not-found, including a delete
        // that matched nothing.
        self.store
            .delete(&id)
            .await
            .map_err(|e| Status::not_found(format!("could not delete note {id}: {e}")))?;

        tracing::debug!(id = %id, "deleted note");

        Ok(Response::new(DeleteNoteResponse { success: true }))
    }

    async fn list_notes(
        &self,
        _request: Request<ListNotesRequest>,
    ) -> Result<Response<Self::ListNotesStream>, Status> {
        let mut notes = self
            .store
            .all()
            .await
            .map_err(|e| Status::internal(format!("could not open note scan: {e}")))?;

        tracing::debug!("listing notes");

        let (tx, rx) = mpsc::channel(32);

        // Drain the scan into the response channel. The first item error ends
        // the stream; notes already sent stay sent. A send failure means the
        // client went away, so stop either way.
        tokio::spawn(async move {
            while let Some(item) = notes.next().await {
                let msg = match item {
                    Ok(note) => Ok(ListNotesResponse {
                        note: Some(note_to_proto(note)),
                    }),
                    Err(StoreError::Decode(e)) => {
                        tracing::error!("note scan yielded an undecodable note: {e}");
                        Err(Status::unavailable(format!("could not decode note: {e}")))
                    }
                    Err(e) => {
                        tracing::error!("note scan failed: {e}");
                        Err(Status::internal(format!("note scan failed: {e}")))
                    }
                };

                let failed = msg.is_err();
                if tx.send(msg).await.is_err() || failed {
                    break;
                }
            }
        });

        Ok(Response::new(
            Box::pin(ReceiverStream::new(rx)) as ListNotesStream
        ))
    }
}

fn parse_id(id: &str) -> Result<NoteId, Status> {
    NoteId::parse(id).map_err(|e| Status::invalid_argument(e.to_string()))
}

/// Status for a failed find or update. Missing and undecodable notes are
/// reported identically: from the caller's view the note is not there.
fn lookup_failure(id: &NoteId, err: StoreError) -> Status {
    match err {
        StoreError::NotFound => Status::not_found(format!("no note with id {id}")),
        StoreError::Decode(e) => Status::not_found(format!("could not decode note {id}: {e}")),
        StoreError::Backend(e) => Status::internal(format!("store error: {e}")),
    }
}

fn note_to_proto(note: jot::Note) -> proto::Note {
    proto::Note {
        id: note.id.to_string(),
        author_id: note.author_id,
        title: note.title,
        content: note.content,
    }
}

fn draft_from_proto(note: proto::Note) -> NoteDraft {
    NoteDraft {
        author_id: note.author_id,
        title: note.title,
        content: note.content,
    }
}

/// Server configuration and runner.
pub struct NoteServer {
    addr: std::net::SocketAddr,
    store: Arc<dyn NoteStore>,
}

impl std::fmt::Debug for NoteServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteServer")
            .field("addr", &self.addr)
            .finish_non_exhaustive()
    }
}

impl NoteServer {
    /// Create a new server bound to the given address, serving the given
    /// store.
    pub fn new(addr: std::net::SocketAddr, store: Arc<dyn NoteStore>) -> Self {
        Self { addr, store }
    }

    /// Run the server until shutdown signal.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let service = NoteService::new(self.store);

        tracing::info!("Starting gRPC server on {}", self.addr);

        tonic::transport::Server::builder()
            .add_service(proto::notes_server::NotesServer::new(service))
            .serve_with_shutdown(self.addr, shutdown_signal())
            .await?;

        tracing::info!("gRPC server shut down");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                // Fall through to let ctrl_c handle shutdown
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
