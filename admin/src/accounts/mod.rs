//! Account Administration
//!
//! Operator-initiated account lifecycle actions.

pub mod confirm;
pub mod deletion;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use confirm::{Confirm, StdinConfirm};
pub use deletion::{delete_user, DeletedAccount, DeletionOutcome, DeletionRequest};
pub use error::{DeleteUserError, StoreError};
pub use memory::MemoryAccountStore;
pub use postgres::PgAccountStore;
pub use store::{AccountStore, AccountTransaction};
