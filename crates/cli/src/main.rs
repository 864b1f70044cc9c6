//! School Admin CLI - Database migrations and admin account tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply the admin schema
//! school-admin migrate
//!
//! # Seed an admin user (hash produced by the client-side bcrypt tooling)
//! school-admin admin create -u admin -p '$2b$10$...' -r super_admin
//!
//! # List admin users
//! school-admin admin list
//! ```
//!
//! # Commands
//!
//! - `migrate` - Apply database migrations
//! - `admin create` - Create admin users
//! - `admin list` - List admin users
//!
//! Every command targets `--db`, falling back to `ADMIN_API_DB_PATH` and then
//! `database/school_schedule.db`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use school_admin_api::config::DEFAULT_DB_PATH;
use school_admin_api::db::Database;

mod commands;

#[derive(Parser)]
#[command(name = "school-admin")]
#[command(author, version, about = "School Admin API tools")]
struct Cli {
    /// Path to the `SQLite` database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations (creates the file if missing)
    Migrate,
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Pre-computed bcrypt hash of the password
        #[arg(short, long)]
        password_hash: String,

        /// Display name
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Admin role (`super_admin`, `admin`)
        #[arg(short, long, default_value = "admin")]
        role: String,

        /// Create the account disabled
        #[arg(long)]
        inactive: bool,
    },
    /// List admin users
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::new(resolve_db_path(cli.db));

    match cli.command {
        Commands::Migrate => commands::migrate::run(&db).await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                username,
                password_hash,
                full_name,
                role,
                inactive,
            } => {
                commands::admin::create_user(
                    &db,
                    &username,
                    &password_hash,
                    full_name.as_deref(),
                    &role,
                    !inactive,
                )
                .await?;
            }
            AdminAction::List => commands::admin::list_users(&db).await?,
        },
    }
    Ok(())
}

/// `--db` wins, then `ADMIN_API_DB_PATH`, then the default location.
fn resolve_db_path(flag: Option<PathBuf>) -> PathBuf {
    dotenvy::dotenv().ok();

    flag.or_else(|| {
        std::env::var("ADMIN_API_DB_PATH")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
    })
    .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
}
