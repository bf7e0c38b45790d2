//! User Deletion
//!
//! Looks an account up by username, asks the operator to confirm unless the
//! request is forced, then removes the account and its dependent records in a
//! single transaction. Object storage is cleaned up only after commit.

use tracing::{info, warn};

use super::confirm::{is_affirmative, Confirm};
use super::error::{DeleteUserError, StoreError};
use super::store::{AccountStore, AccountTransaction};
use crate::db::{Account, PurgeSummary};
use crate::storage::{avatar_object_key, S3Client, S3Error, STORAGE_TIMEOUT};

/// Question put to the operator after the account is shown.
pub const CONFIRMATION_PROMPT: &str = "Are you sure you want to delete this user? [y/N]: ";

/// A request to delete one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionRequest {
    pub username: String,
    /// Skip the confirmation prompt.
    pub force: bool,
}

impl DeletionRequest {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            force: false,
        }
    }

    #[must_use]
    pub const fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// What was removed by a committed deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedAccount {
    pub account: Account,
    pub removed: PurgeSummary,
    /// Avatar object key captured before the profile row was deleted.
    pub avatar_key: Option<String>,
}

/// Non-error results of a deletion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    Deleted(DeletedAccount),
    /// The operator declined; nothing was changed.
    Cancelled { username: String },
}

/// Delete the account named by `request`.
///
/// 1. Look the account up (missing → [`DeleteUserError::NotFound`])
/// 2. Unless forced, ask `confirm`; anything but `y`/`Y` cancels
/// 3. Remove dependents and the account in one transaction, rolling back on any failure
pub async fn delete_user<S, C>(
    store: &S,
    confirm: &mut C,
    request: &DeletionRequest,
) -> Result<DeletionOutcome, DeleteUserError>
where
    S: AccountStore,
    C: Confirm + ?Sized,
{
    // Usernames are matched exactly; padding is never stripped.
    let username = request.username.as_str();
    if username.trim().is_empty() {
        return Err(DeleteUserError::InvalidUsername);
    }

    let Some(account) = store.find_by_username(username).await? else {
        warn!(username = %username, "User not found");
        return Err(DeleteUserError::NotFound(username.to_string()));
    };

    if !request.force {
        let message = format!(
            "User found: {} (ID: {})\n{CONFIRMATION_PROMPT}",
            account.username, account.id
        );
        let answer = confirm.confirm(&message)?;

        if !is_affirmative(&answer) {
            info!(
                user_id = account.id,
                username = %account.username,
                "User deletion cancelled"
            );
            return Ok(DeletionOutcome::Cancelled {
                username: account.username,
            });
        }
    }

    info!(
        user_id = account.id,
        username = %account.username,
        forced = request.force,
        "Processing account deletion"
    );

    let mut tx = store.begin().await?;

    match purge_account(&mut tx, &account).await {
        Ok(Some((removed, avatar_key))) => {
            tx.commit().await?;

            info!(
                user_id = account.id,
                username = %account.username,
                dependents_removed = removed.total(),
                "Account deletion completed"
            );

            Ok(DeletionOutcome::Deleted(DeletedAccount {
                account,
                removed,
                avatar_key,
            }))
        }
        Ok(None) => {
            rollback_logged(tx).await;
            warn!(user_id = account.id, "User already deleted, skipping");
            Err(DeleteUserError::NotFound(account.username))
        }
        Err(e) => {
            rollback_logged(tx).await;
            Err(e.into())
        }
    }
}

/// Roll back without masking the caller's outcome.
async fn rollback_logged<T: AccountTransaction>(tx: T) {
    if let Err(rollback_err) = tx.rollback().await {
        // Dropping the handle still discards the transaction.
        warn!(error = %rollback_err, "Explicit rollback failed");
    }
}

/// Everything that has to happen inside the transaction.
async fn purge_account<T: AccountTransaction>(
    tx: &mut T,
    account: &Account,
) -> Result<Option<(PurgeSummary, Option<String>)>, StoreError> {
    // Avatar key must be read while the profile row still exists
    let avatar_key = tx.profile_avatar(account).await?;

    Ok(tx
        .purge(account)
        .await?
        .map(|removed| (removed, avatar_key)))
}

/// Delete the account's avatar from object storage, logging but not failing on errors.
///
/// Returns `true` if an object was removed. Gives up after [`STORAGE_TIMEOUT`].
pub async fn cleanup_avatar(s3: &S3Client, deleted: &DeletedAccount) -> bool {
    let Some(key) = deleted.avatar_key.as_deref().and_then(avatar_object_key) else {
        return false;
    };

    let result = tokio::time::timeout(STORAGE_TIMEOUT, s3.delete(&key))
        .await
        .unwrap_or_else(|_| Err(S3Error::Timeout));

    match result {
        Ok(()) => {
            info!(user_id = deleted.account.id, s3_key = %key, "Avatar removed");
            true
        }
        Err(e) => {
            warn!(
                user_id = deleted.account.id,
                s3_key = %key,
                error = %e,
                "Failed to delete avatar during account deletion"
            );
            false
        }
    }
}
