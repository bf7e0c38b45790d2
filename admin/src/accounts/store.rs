//! Account persistence seam.
//!
//! The deletion workflow talks to storage only through these two traits, so it
//! can run against `PostgreSQL` in production and an in-memory store in tests.

use async_trait::async_trait;

use super::error::StoreError;
use crate::db::{Account, PurgeSummary};

/// Read access to accounts plus the ability to open a transaction.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Transaction handle returned by [`AccountStore::begin`].
    type Tx: AccountTransaction;

    /// Look up an account by its unique username.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;

    /// Open a transaction. Nothing done through it is visible until commit.
    async fn begin(&self) -> Result<Self::Tx, StoreError>;
}

/// A scoped unit of work.
///
/// Implementations must discard all staged changes when the handle is dropped
/// without [`AccountTransaction::commit`].
#[async_trait]
pub trait AccountTransaction: Send {
    /// Storage key of the account's avatar, read before the profile is removed.
    async fn profile_avatar(&mut self, account: &Account) -> Result<Option<String>, StoreError>;

    /// Remove the account's dependent records and then the account itself.
    ///
    /// Returns `None` if the account row was already gone.
    async fn purge(&mut self, account: &Account) -> Result<Option<PurgeSummary>, StoreError>;

    /// Publish every change made through this transaction.
    async fn commit(self) -> Result<(), StoreError>;

    /// Discard every change made through this transaction.
    async fn rollback(self) -> Result<(), StoreError>;
}
