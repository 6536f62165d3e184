//! Accounts and aliases listed side by side.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Account, Alias, AliasKind};

/// Display kind of an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum IdentityKind {
    /// A user account.
    #[serde(rename = "account")]
    Account,
    /// An alias delivering to local mailboxes or aliases.
    #[serde(rename = "alias")]
    Alias,
    /// An alias with at least one external recipient.
    #[serde(rename = "forward")]
    Forward,
    /// An alias with several local recipients.
    #[serde(rename = "dlist")]
    DistributionList,
}

impl IdentityKind {
    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Alias => "alias",
            Self::Forward => "forward",
            Self::DistributionList => "dlist",
        }
    }
}

impl From<AliasKind> for IdentityKind {
    fn from(kind: AliasKind) -> Self {
        match kind {
            AliasKind::Alias => Self::Alias,
            AliasKind::Forward => Self::Forward,
            AliasKind::DistributionList => Self::DistributionList,
        }
    }
}

impl fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entry of the identity listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Account(Account),
    Alias(Alias),
}

impl Identity {
    /// Account, or the kind derived from the alias recipients.
    pub fn kind(&self) -> IdentityKind {
        match self {
            Self::Account(_) => IdentityKind::Account,
            Self::Alias(alias) => alias.kind().into(),
        }
    }

    /// Display projection used by the HTTP layer and for sorting.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mailadmin::domain::{Account, Identity};
    /// let view = Identity::Account(Account::new(1, "ada").with_name("Ada", "Lovelace")).view();
    /// assert_eq!(view.identity, "ada");
    /// assert_eq!(view.name_or_rcpt, "Ada Lovelace");
    /// ```
    pub fn view(&self) -> IdentityView {
        match self {
            Self::Account(account) => IdentityView {
                id: account.id.get(),
                kind: IdentityKind::Account,
                identity: account.username.clone(),
                name_or_rcpt: account.full_name(),
                tags: account.tags(),
                scope: account
                    .email
                    .rsplit_once('@')
                    .map(|(_, domain)| domain.to_owned())
                    .filter(|domain| !domain.is_empty()),
            },
            Self::Alias(alias) => {
                let kind = IdentityKind::from(alias.kind());
                IdentityView {
                    id: alias.id.get(),
                    kind,
                    identity: alias.full_address(),
                    name_or_rcpt: alias.recipients_display(),
                    tags: vec![kind.as_str().to_owned()],
                    scope: Some(alias.domain_name.clone()),
                }
            }
        }
    }
}

/// Serialised row of `GET /api/v1/identities`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentityView {
    #[schema(example = 1)]
    pub id: i32,
    /// Identity kind, named `type` on the wire.
    #[serde(rename = "type")]
    pub kind: IdentityKind,
    /// Username, or the full alias address.
    #[schema(example = "ada@example.org")]
    pub identity: String,
    /// Full name of an account, or the recipients of an alias.
    #[schema(example = "Ada Lovelace")]
    pub name_or_rcpt: String,
    pub tags: Vec<String>,
    /// Owning domain, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}
