//! Jot gRPC Server
//!
//! Runs the note service against a MongoDB-backed store: CRUD plus a
//! streaming list over one note collection.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use jot::{MongoConfig, MongoStore};
use jot_grpc::NoteServer;

/// Jot gRPC Server - CRUD over a note collection
#[derive(Parser, Debug)]
#[command(name = "jot-grpc")]
#[command(about = "gRPC server providing CRUD over a note collection")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "[::1]:50051")]
    addr: SocketAddr,

    /// MongoDB connection string
    #[arg(long, default_value = "mongodb://localhost:27017")]
    mongo_uri: String,

    /// Database holding the note collection
    #[arg(long, default_value = "jot")]
    database: String,

    /// Name of the note collection
    #[arg(long, default_value = "notes")]
    collection: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();

    let config = MongoConfig {
        uri: args.mongo_uri,
        database: args.database,
        collection: args.collection,
    };
    let store = Arc::new(MongoStore::connect(&config).await?);

    let server = NoteServer::new(args.addr, store.clone());
    // Close the store even when the server exits with an error.
    let result = server.run().await;
    store.close().await;
    result?;

    Ok(())
}
