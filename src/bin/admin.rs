//! CLI administration tool for biolink.
//!
//! Bootstraps accounts and checks the database without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create an admin account interactively
//! cargo run --bin admin -- user create-admin
//!
//! # Count stored records
//! cargo run --bin admin -- db stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use biolink::domain::entities::NewUser;
use biolink::domain::repositories::UserRepository;
use biolink::infrastructure::persistence::PgUserRepository;
use biolink::utils::password::hash_password;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing biolink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Database tools
    Db {
        #[command(subcommand)]
        action: DbCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create an admin account interactively
    CreateAdmin,
}

#[derive(Subcommand)]
enum DbCommands {
    /// Verify the database connection
    Check,
    /// Print record counts
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User {
            action: UserCommands::CreateAdmin,
        } => create_admin(pool).await,
        Commands::Db {
            action: DbCommands::Check,
        } => db_check(pool).await,
        Commands::Db {
            action: DbCommands::Stats,
        } => db_stats(pool).await,
    }
}

/// Prompts for credentials and creates an admin account.
async fn create_admin(pool: PgPool) -> Result<()> {
    println!("{}", "Create admin account".bold());

    let username: String = Input::new().with_prompt("Username").interact_text()?;
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    if password.len() < 6 {
        anyhow::bail!("Password must be at least 6 characters");
    }

    let confirmed = Confirm::new()
        .with_prompt(format!("Create admin '{}' <{}>?", username, email))
        .default(true)
        .interact()?;

    if !confirmed {
        println!("{}", "Aborted.".yellow());
        return Ok(());
    }

    let repository = PgUserRepository::new(Arc::new(pool));

    let password_hash = hash_password(&password)?;

    let user = repository
        .create(NewUser {
            username,
            email: email.to_lowercase(),
            password_hash,
            display_name: String::new(),
            role: "admin".to_string(),
        })
        .await?;

    println!(
        "{} admin '{}' created with id {}",
        "✓".green(),
        user.username.bold(),
        user.id
    );

    Ok(())
}

/// Verifies database connectivity.
async fn db_check(pool: PgPool) -> Result<()> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&pool)
        .await
        .context("Database check failed")?;

    println!("{} database connection OK", "✓".green());

    Ok(())
}

/// Prints record counts per table.
async fn db_stats(pool: PgPool) -> Result<()> {
    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await?;
    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(&pool)
        .await?;
    let products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await?;

    println!("{}", "Record counts".bold());
    println!("  users:    {}", users);
    println!("  links:    {}", links);
    println!("  products: {}", products);

    Ok(())
}
