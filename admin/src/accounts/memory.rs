//! In-memory account store.
//!
//! Transactions stage removals locally and publish them on commit, so a
//! dropped or rolled-back transaction leaves the shared state untouched.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use super::error::StoreError;
use super::store::{AccountStore, AccountTransaction};
use crate::db::{Account, PurgeSummary};

/// Records owned by one account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependents {
    /// `Some` when the account has a profile; the inner value is its avatar key.
    pub profile: Option<Option<String>>,
    pub education: u64,
    pub certifications: u64,
    pub achievements: u64,
}

#[derive(Debug, Default)]
struct State {
    accounts: BTreeMap<i64, Account>,
    dependents: BTreeMap<i64, Dependents>,
    next_id: i64,
}

/// Account store held entirely in process memory.
#[derive(Clone, Default)]
pub struct MemoryAccountStore {
    state: Arc<Mutex<State>>,
    fail_after_dependents: Arc<AtomicBool>,
    fail_rollback: Arc<AtomicBool>,
    lookups: Arc<AtomicUsize>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert an account with the next free id.
    pub fn insert(&self, username: &str) -> Account {
        let id = {
            let mut state = self.lock();
            state.next_id += 1;
            state.next_id
        };
        self.insert_with_id(id, username)
    }

    /// Insert an account with a fixed id.
    pub fn insert_with_id(&self, id: i64, username: &str) -> Account {
        let account = Account {
            id,
            username: username.to_string(),
            email: None,
            date_joined: Utc::now(),
        };

        let mut state = self.lock();
        state.next_id = state.next_id.max(id);
        state.accounts.insert(id, account.clone());
        state.dependents.entry(id).or_default();
        account
    }

    /// Give the account a profile, optionally with an avatar.
    pub fn set_profile(&self, user_id: i64, avatar_key: Option<&str>) {
        self.lock().dependents.entry(user_id).or_default().profile =
            Some(avatar_key.map(str::to_string));
    }

    pub fn add_education(&self, user_id: i64, count: u64) {
        self.lock().dependents.entry(user_id).or_default().education += count;
    }

    pub fn add_certifications(&self, user_id: i64, count: u64) {
        self.lock().dependents.entry(user_id).or_default().certifications += count;
    }

    pub fn add_achievements(&self, user_id: i64, count: u64) {
        self.lock().dependents.entry(user_id).or_default().achievements += count;
    }

    /// Make every subsequent purge fail after the dependent records are staged
    /// but before the account row is.
    pub fn fail_after_dependents(&self) {
        self.fail_after_dependents.store(true, Ordering::SeqCst);
    }

    /// Make every subsequent explicit rollback report an error. Staged changes
    /// are still discarded.
    pub fn fail_rollback(&self) {
        self.fail_rollback.store(true, Ordering::SeqCst);
    }

    /// Remove an account outside any transaction.
    pub fn remove(&self, username: &str) -> bool {
        let mut state = self.lock();
        let id = state
            .accounts
            .values()
            .find(|a| a.username == username)
            .map(|a| a.id);
        id.is_some_and(|id| {
            state.dependents.remove(&id);
            state.accounts.remove(&id).is_some()
        })
    }

    pub fn contains(&self, username: &str) -> bool {
        self.lock().accounts.values().any(|a| a.username == username)
    }

    /// All accounts, ordered by id.
    pub fn accounts(&self) -> Vec<Account> {
        self.lock().accounts.values().cloned().collect()
    }

    pub fn dependents(&self, user_id: i64) -> Option<Dependents> {
        self.lock().dependents.get(&user_id).cloned()
    }

    /// Number of `find_by_username` calls served.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    type Tx = MemoryTransaction;

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .lock()
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn begin(&self) -> Result<Self::Tx, StoreError> {
        Ok(MemoryTransaction {
            store: self.clone(),
            staged: Vec::new(),
            fail_after_dependents: self.fail_after_dependents.load(Ordering::SeqCst),
            fail_rollback: self.fail_rollback.load(Ordering::SeqCst),
        })
    }
}

/// Transaction over a [`MemoryAccountStore`].
pub struct MemoryTransaction {
    store: MemoryAccountStore,
    /// Account ids whose removal is staged.
    staged: Vec<i64>,
    fail_after_dependents: bool,
    fail_rollback: bool,
}

#[async_trait]
impl AccountTransaction for MemoryTransaction {
    async fn profile_avatar(&mut self, account: &Account) -> Result<Option<String>, StoreError> {
        if self.staged.contains(&account.id) {
            return Ok(None);
        }

        Ok(self
            .store
            .lock()
            .dependents
            .get(&account.id)
            .and_then(|d| d.profile.clone())
            .flatten())
    }

    async fn purge(&mut self, account: &Account) -> Result<Option<PurgeSummary>, StoreError> {
        if self.staged.contains(&account.id) {
            return Ok(None);
        }

        let state = self.store.lock();
        let dependents = state
            .dependents
            .get(&account.id)
            .cloned()
            .unwrap_or_default();
        let summary = PurgeSummary {
            profiles: u64::from(dependents.profile.is_some()),
            education: dependents.education,
            certifications: dependents.certifications,
            achievements: dependents.achievements,
        };

        if self.fail_after_dependents {
            return Err(StoreError::Injected(format!(
                "account {} failed after {} dependent rows",
                account.id,
                summary.total()
            )));
        }

        if !state.accounts.contains_key(&account.id) {
            return Ok(None);
        }
        drop(state);

        self.staged.push(account.id);
        Ok(Some(summary))
    }

    async fn commit(self) -> Result<(), StoreError> {
        let mut state = self.store.lock();
        for id in &self.staged {
            state.accounts.remove(id);
            state.dependents.remove(id);
        }
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        if self.fail_rollback {
            return Err(StoreError::Injected("rollback failed".into()));
        }
        Ok(())
    }
}
