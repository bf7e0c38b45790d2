//! `delete_user` - Main Entry Point
//!
//! Deletes one Excelpoint account by username.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use console::style;
use tracing::info;

use excelpoint_admin::accounts::deletion::cleanup_avatar;
use excelpoint_admin::accounts::{
    delete_user, DeleteUserError, DeletionOutcome, PgAccountStore, StdinConfirm,
};
use excelpoint_admin::cli::{self, Cli};
use excelpoint_admin::{config, db, logging, storage};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", style(format!("Error: {e:#}")).red());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<ExitCode> {
    let config = config::Config::from_env()?;
    logging::init(config.log_format);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting delete_user");

    let pool = db::create_pool(&config.database_url, config.database_acquire_timeout).await?;
    let store = PgAccountStore::new(pool);

    let result = delete_user(&store, &mut StdinConfirm, &args.request()).await;
    store.pool().close().await;

    let code = match result {
        Ok(DeletionOutcome::Deleted(deleted)) => {
            // Committed already; report before touching storage
            println!("{}", cli::deleted_message(&deleted));

            if deleted.avatar_key.is_some() {
                if let Some(s3) = storage::connect(&config).await {
                    cleanup_avatar(&s3, &deleted).await;
                }
            }
            ExitCode::SUCCESS
        }
        Ok(DeletionOutcome::Cancelled { .. }) => {
            println!("{}", cli::cancelled_message());
            ExitCode::SUCCESS
        }
        Err(e @ (DeleteUserError::NotFound(_) | DeleteUserError::InvalidUsername)) => {
            println!("{}", cli::error_message(&e));
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{}", cli::error_message(&e));
            ExitCode::FAILURE
        }
    };

    Ok(code)
}
