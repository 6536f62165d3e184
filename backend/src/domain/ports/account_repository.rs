//! Port for account lookups.

use async_trait::async_trait;

use crate::domain::query::{AccountField, Predicate};
use crate::domain::{Account, AccountId};

use super::DirectoryRepositoryError;

/// Read access to accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Fetch one account. `None` when the id is unknown.
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, DirectoryRepositoryError>;

    /// Accounts matching `predicate`, ordered by primary key.
    async fn list(
        &self,
        predicate: &Predicate<AccountField>,
    ) -> Result<Vec<Account>, DirectoryRepositoryError>;
}
