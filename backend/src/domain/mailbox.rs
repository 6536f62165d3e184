//! Mailboxes owned by accounts.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{AccountId, MailboxId};

/// A mailbox, identified by local part and domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    pub id: MailboxId,
    pub address: String,
    pub domain_name: String,
    pub owner: AccountId,
}

impl Mailbox {
    pub fn new(
        id: impl Into<MailboxId>,
        address: impl Into<String>,
        domain_name: impl Into<String>,
        owner: impl Into<AccountId>,
    ) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            domain_name: domain_name.into(),
            owner: owner.into(),
        }
    }

    /// `local@domain`.
    pub fn full_address(&self) -> String {
        format!("{}@{}", self.address, self.domain_name)
    }
}

/// Serialised row of `GET /api/v1/mailboxes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MailboxView {
    #[schema(example = 12)]
    pub id: i32,
    #[schema(example = "ada@example.org")]
    pub address: String,
}

impl From<&Mailbox> for MailboxView {
    fn from(mailbox: &Mailbox) -> Self {
        Self {
            id: mailbox.id.get(),
            address: mailbox.full_address(),
        }
    }
}
