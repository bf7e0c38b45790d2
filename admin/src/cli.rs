//! Command-line surface of `delete_user`.

use clap::Parser;
use console::style;

use crate::accounts::{DeleteUserError, DeletedAccount, DeletionRequest};

/// Deletes a user by username.
#[derive(Debug, Parser)]
#[command(name = "delete_user", version)]
pub struct Cli {
    /// Username of the user to delete
    pub username: String,

    /// Force deletion without confirmation
    #[arg(long)]
    pub force: bool,
}

impl Cli {
    pub fn request(&self) -> DeletionRequest {
        DeletionRequest::new(&self.username).force(self.force)
    }
}

pub fn deleted_message(deleted: &DeletedAccount) -> String {
    style(format!(
        "Successfully deleted user: {}",
        deleted.account.username
    ))
    .green()
    .to_string()
}

pub fn cancelled_message() -> String {
    style("User deletion cancelled.").yellow().to_string()
}

pub fn error_message(error: &DeleteUserError) -> String {
    style(error.to_string()).red().to_string()
}
