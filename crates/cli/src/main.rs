//! Survived CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! survived-cli migrate
//!
//! # Seed demo users with back-dated check-in history
//! survived-cli seed --users 8 --history-days 30
//!
//! # Mint a development bearer token for a user
//! survived-cli token --user-id 1 --ttl-days 30
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed database with demo data
//! - `token` - Mint a signed development token (auth-collaborator stand-in)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "survived-cli")]
#[command(author, version, about = "Survived CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed demo users and check-in history
    Seed {
        /// Number of demo users to create
        #[arg(short, long, default_value_t = 8)]
        users: u32,

        /// Days of back-dated check-in history per user
        #[arg(long, default_value_t = 30)]
        history_days: u32,
    },
    /// Mint a signed development bearer token
    Token {
        /// User ID to mint the token for
        #[arg(short, long)]
        user_id: i32,

        /// Token lifetime in days
        #[arg(long, default_value_t = 30)]
        ttl_days: i64,
    },
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
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed {
            users,
            history_days,
        } => commands::seed::run(users, history_days).await?,
        Commands::Token { user_id, ttl_days } => commands::token::run(user_id, ttl_days)?,
    }
    Ok(())
}
