//! CSE Motors web server binary.
//!
//! `serve` (the default) runs the site against PostgreSQL, or against an
//! in-memory store with `--memory`. `grant-role` promotes an existing account
//! to Employee or Admin, which the web interface never does.

use std::str::FromStr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use cse_core::models::Role;
use cse_core::store::{AccountStore, MemoryStore, PgStore, Store};
use cse_web::config::WebConfig;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::{info, warn};

/// CLI arguments for the web server.
#[derive(Parser, Debug)]
#[command(name = "cse_server", about = "CSE Motors web server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:5500")]
    bind_addr: String,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/cse_motors"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Development mode: session cookies without `Secure`, SQL statements
    /// logged at debug level.
    #[arg(long, env = "APP_DEV", default_value_t = false)]
    development: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the site (default).
    Serve {
        /// Use a throwaway in-memory store instead of PostgreSQL.
        #[arg(long, default_value_t = false)]
        memory: bool,
    },
    /// Give an existing account the Employee or Admin role.
    GrantRole {
        /// Email of the account.
        email: String,
        /// `Client`, `Employee` or `Admin`.
        role: String,
    },
}

async fn connect(args: &Args) -> Result<PgPool, Box<dyn std::error::Error>> {
    let mut options = PgConnectOptions::from_str(&args.database_url)?;
    options = if args.development {
        options.log_statements(log::LevelFilter::Debug)
    } else {
        options.disable_statement_logging()
    };

    info!(max_connections = args.max_connections, "configuring connection pool");
    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect_with(options)
        .await?;

    info!("running database migrations");
    cse_core::migrate::migrate(&pool).await?;
    Ok(pool)
}

async fn serve(args: &Args, memory: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store: Arc<dyn Store> = if memory {
        warn!("using in-memory store; data is lost on exit");
        Arc::new(MemoryStore::with_classifications([
            "Custom", "Sedan", "Sport", "SUV", "Truck",
        ]))
    } else {
        Arc::new(PgStore::new(connect(args).await?))
    };

    let config = WebConfig {
        bind_addr: args.bind_addr.clone(),
        development: args.development,
        ..WebConfig::from_env()
    };
    if config.development {
        warn!("development mode: session cookies are sent without Secure");
    }

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    let app = cse_web::router(cse_web::AppState::new(store, config));

    info!(addr = %local_addr, "CSE Motors listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "could not listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            info!("shutting down");
        })
        .await?;
    Ok(())
}

async fn grant_role(
    args: &Args,
    email: &str,
    role: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let role = Role::from_str(role)?;
    let store = PgStore::new(connect(args).await?);
    match store.grant_role(email, role).await? {
        0 => Err(format!("no account registered for {email}").into()),
        _ => {
            info!(email, %role, "role granted");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cse_web=debug,cse_core=debug".into()),
        )
        .init();

    let args = Args::parse();
    info!(version = cse_core::version(), "starting cse_server");

    match &args.command {
        Some(Command::GrantRole { email, role }) => grant_role(&args, email, role).await,
        Some(Command::Serve { memory }) => serve(&args, *memory).await,
        None => serve(&args, false).await,
    }
}
