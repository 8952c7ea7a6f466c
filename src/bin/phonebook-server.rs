use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use log::info;
use tokio::sync::RwLock;

use phonebook::model::{Person, PersonDraft, PersonId, PersonPatch};

#[path = "phonebook_server/types.rs"]
mod types;
use self::types::*;
#[path = "phonebook_server/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "phonebook_server/persistence.rs"]
mod persistence;
use self::persistence::*;
#[path = "phonebook_server/handlers_persons.rs"]
mod handlers_persons;
use self::handlers_persons::*;
#[path = "phonebook_server/routes.rs"]
mod routes;
use self::routes::*;

#[derive(Parser)]
#[command(name = "phonebook-server")]
#[command(about = "Development REST store for the phonebook (/persons)", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3001")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Data directory; contacts live in persons.json
    #[arg(long, default_value = "./phonebook-data")]
    data_dir: PathBuf,

    /// Log level for stderr output
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();
    phonebook::logging::init_stderr_logging(&args.log_level)?;

    std::fs::create_dir_all(&args.data_dir)
        .with_context(|| format!("create data dir {}", args.data_dir.display()))?;

    let data_path = args.data_dir.join(PERSONS_FILE);
    let persons = load_persons(&data_path).context("load persons")?;
    info!(
        "event=store_load status=ok count={} path={}",
        persons.len(),
        data_path.display()
    );

    let state = Arc::new(AppState {
        data_path,
        persons: RwLock::new(persons),
    });

    let app = router().with_state(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    info!("phonebook-server listening on {}", local_addr);

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
