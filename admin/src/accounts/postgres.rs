//! `PostgreSQL` account store.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::error::StoreError;
use super::store::{AccountStore, AccountTransaction};
use crate::db::{self, Account, PurgeSummary};

/// Account store backed by a `PostgreSQL` pool.
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    type Tx = PgAccountTransaction;

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        Ok(db::find_account_by_username(&self.pool, username).await?)
    }

    async fn begin(&self) -> Result<Self::Tx, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(PgAccountTransaction { tx })
    }
}

/// Open `PostgreSQL` transaction. `sqlx` rolls it back when dropped uncommitted.
pub struct PgAccountTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl AccountTransaction for PgAccountTransaction {
    async fn profile_avatar(&mut self, account: &Account) -> Result<Option<String>, StoreError> {
        Ok(db::find_profile_avatar(&mut *self.tx, account.id).await?)
    }

    async fn purge(&mut self, account: &Account) -> Result<Option<PurgeSummary>, StoreError> {
        // Children first; the schema cascades too, but explicit deletes give us counts.
        let summary = PurgeSummary {
            profiles: db::delete_user_profile(&mut *self.tx, account.id).await?,
            education: db::delete_user_education(&mut *self.tx, account.id).await?,
            certifications: db::delete_user_certifications(&mut *self.tx, account.id).await?,
            achievements: db::delete_user_achievements(&mut *self.tx, account.id).await?,
        };

        if db::delete_account(&mut *self.tx, account.id).await? == 0 {
            return Ok(None);
        }

        Ok(Some(summary))
    }

    async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
