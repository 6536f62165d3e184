//! Precondition for operations that only make sense for mailbox owners.

use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::MailboxRepository;
use crate::domain::{Account, Error};

/// Rejects principals that own no mailbox.
pub struct MailboxGuard<M: ?Sized> {
    mailboxes: Arc<M>,
}

impl<M: ?Sized> Clone for MailboxGuard<M> {
    fn clone(&self) -> Self {
        Self {
            mailboxes: Arc::clone(&self.mailboxes),
        }
    }
}

impl<M: ?Sized> MailboxGuard<M> {
    pub fn new(mailboxes: Arc<M>) -> Self {
        Self { mailboxes }
    }
}

impl<M> MailboxGuard<M>
where
    M: MailboxRepository + ?Sized,
{
    /// Succeed when `principal` owns at least one mailbox.
    ///
    /// Fails with [`ErrorCode::NoMailbox`](crate::domain::ErrorCode::NoMailbox)
    /// otherwise.
    pub async fn require_mailbox(&self, principal: &Account) -> Result<(), Error> {
        let owned = self.mailboxes.count_for_account(principal.id).await?;
        if owned == 0 {
            debug!(principal = %principal.id, "principal owns no mailbox");
            return Err(Error::no_mailbox());
        }
        Ok(())
    }

    /// Check the precondition, then run `handler(args)`.
    ///
    /// The handler's output is returned untouched. It is never invoked when
    /// the check fails.
    pub async fn call_with<Args, F, Fut>(
        &self,
        principal: &Account,
        args: Args,
        handler: F,
    ) -> Result<Fut::Output, Error>
    where
        F: FnOnce(Args) -> Fut,
        Fut: Future,
    {
        self.require_mailbox(principal).await?;
        Ok(handler(args).await)
    }
}
