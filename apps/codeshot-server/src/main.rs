mod auth;
mod config;
mod error;
mod handlers;
mod metrics;
mod server;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::routing::get;
use clap::{Parser, Subcommand};
use codeshot_storage::{CreateUserParams, Store};
use codeshot_store_sqlite::SqliteStore;

use config::ServerConfig;
use server::ApiServer;

// ────────────────────────────────── CLI Types ──────────────────────────────────

#[derive(Parser)]
#[command(name = "codeshot-server")]
#[command(about = "Codeshot API server CLI for administration and serving")]
struct Cli {
    /// Database URL (sqlite://path/to/db.db or sqlite::memory:)
    #[arg(
        long,
        global = true,
        env = "DATABASE_URL",
        default_value = "sqlite://codeshot.db"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve {
        /// Server address
        #[arg(long, default_value = "0.0.0.0:3000")]
        addr: String,
    },
    /// User management commands
    User {
        #[command(subcommand)]
        user_cmd: UserCommand,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    /// Create a new user (accounts are provisioned by the operator; the
    /// authenticating edge proxy maps credentials to the returned id)
    Create {
        /// Email address, unique per user
        email: String,
    },
}

// ─────────────────────────────────── Entry ─────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { addr } => serve(&cli.database_url, &addr).await,
        Command::User { user_cmd } => match user_cmd {
            UserCommand::Create { email } => user_create(&cli.database_url, &email).await,
        },
    }
}

async fn serve(database_url: &str, addr: &str) -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env()?;
    let store = SqliteStore::open(database_url).await?;
    let server = ApiServer::new(Arc::new(store));

    let metrics_handle = metrics::init_metrics()?;
    let app = handlers::router(server, &config).route(
        "/metrics",
        get(move || {
            let handle = metrics_handle.clone();
            async move { handle.render() }
        }),
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "codeshot-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn user_create(database_url: &str, email: &str) -> anyhow::Result<()> {
    let store = SqliteStore::open(database_url).await?;
    let user = store
        .create_user(&CreateUserParams {
            email: email.to_string(),
        })
        .await?;

    println!("✓ User created!");
    println!("Id:    {}", user.id);
    println!("Email: {}", user.email);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received SIGINT, shutting down gracefully"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down gracefully"),
    }
}
