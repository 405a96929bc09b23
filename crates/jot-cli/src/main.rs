//! Jot CLI - command line client for the note service
//!
//! Usage:
//!   jot create <author> <title> <content>    Store a new note
//!   jot get <id>                             Fetch one note
//!   jot update <id> <author> <title> <content>
//!   jot delete <id>                          Delete one note
//!   jot list                                 Stream every note

use clap::{Parser, Subcommand};

use jot_grpc::proto::{
    CreateNoteRequest, DeleteNoteRequest, ListNotesRequest, Note, ReadNoteRequest,
    UpdateNoteRequest, notes_client::NotesClient,
};

/// Command line client for the jot note service
#[derive(Parser, Debug)]
#[command(name = "jot")]
#[command(about = "Create, read, update, delete, and list notes over gRPC")]
struct Args {
    /// Server endpoint
    #[arg(long, default_value = "http://[::1]:50051")]
    endpoint: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store a new note and print it with its assigned id
    Create {
        /// Author the note belongs to
        author: String,
        /// Note title
        title: String,
        /// Note body
        content: String,
    },
    /// Fetch one note by id
    Get {
        /// Note id (24-character hex)
        id: String,
    },
    /// Replace every field of an existing note
    Update {
        /// Note id (24-character hex)
        id: String,
        /// New author
        author: String,
        /// New title
        title: String,
        /// New body
        content: String,
    },
    /// Delete one note by id
    Delete {
        /// Note id (24-character hex)
        id: String,
    },
    /// List every note in the collection
    List,
}

fn print_note(note: &Note) {
    println!(
        "{}\t{}\t{}\t{}",
        note.id, note.author_id, note.title, note.content
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut client = NotesClient::connect(args.endpoint).await?;

    match args.command {
        Command::Create {
            author,
            title,
            content,
        } => {
            let response = client
                .create_note(CreateNoteRequest {
                    note: Some(Note {
                        id: String::new(),
                        author_id: author,
                        title,
                        content,
                    }),
                })
                .await?
                .into_inner();
            if let Some(note) = response.note {
                print_note(&note);
            }
        }
        Command::Get { id } => {
            let response = client.read_note(ReadNoteRequest { id }).await?.into_inner();
            if let Some(note) = response.note {
                print_note(&note);
            }
        }
        Command::Update {
            id,
            author,
            title,
            content,
        } => {
            let response = client
                .update_note(UpdateNoteRequest {
                    note: Some(Note {
                        id,
                        author_id: author,
                        title,
                        content,
                    }),
                })
                .await?
                .into_inner();
            if let Some(note) = response.note {
                print_note(&note);
            }
        }
        Command::Delete { id } => {
            let response = client
                .delete_note(DeleteNoteRequest { id })
                .await?
                .into_inner();
            println!("deleted: {}", response.success);
        }
        Command::List => {
            let mut stream = client
                .list_notes(ListNotesRequest {})
                .await?
                .into_inner();
            while let Some(response) = stream.message().await? {
                if let Some(note) = response.note {
                    print_note(&note);
                }
            }
        }
    }

    Ok(())
}
