//! Port for mailbox ownership.

use async_trait::async_trait;

use crate::domain::{AccountId, Mailbox};

use super::DirectoryRepositoryError;

/// Read access to the mailboxes an account owns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailboxRepository: Send + Sync {
    /// Number of mailboxes owned by `account`.
    async fn count_for_account(&self, account: AccountId) -> Result<u64, DirectoryRepositoryError>;

    /// Mailboxes owned by `account`, ordered by address.
    async fn list_for_account(
        &self,
        account: AccountId,
    ) -> Result<Vec<Mailbox>, DirectoryRepositoryError>;
}
