//! Mail aliases and their derived kind.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::query::{AliasField, Filterable};
use super::{AliasId, DomainId};

/// Where an alias delivers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "address", rename_all = "snake_case")]
pub enum AliasRecipient {
    /// A local mailbox.
    Mailbox(String),
    /// Another local alias.
    Alias(String),
    /// An address outside the managed domains.
    External(String),
}

impl AliasRecipient {
    /// Full address of the recipient.
    pub fn address(&self) -> &str {
        match self {
            Self::Mailbox(address) | Self::Alias(address) | Self::External(address) => address,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

/// Kind of an alias, derived from its recipients.
///
/// # Examples
///
/// ```
/// # use mailadmin::domain::{AliasKind, AliasRecipient};
/// let recipients = [AliasRecipient::External("bob@example.net".into())];
/// assert_eq!(AliasKind::of(&recipients), AliasKind::Forward);
/// assert_eq!(AliasKind::Forward.as_str(), "forward");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AliasKind {
    /// Local delivery.
    #[serde(rename = "alias")]
    Alias,
    /// External recipients only.
    #[serde(rename = "forward")]
    Forward,
    /// Several recipients.
    #[serde(rename = "dlist")]
    DistributionList,
}

impl AliasKind {
    /// Classify a recipient list.
    ///
    /// Forward when every recipient is external (and there is at least one),
    /// distribution list when there are several recipients, alias otherwise.
    pub fn of(recipients: &[AliasRecipient]) -> Self {
        if !recipients.is_empty() && recipients.iter().all(AliasRecipient::is_external) {
            Self::Forward
        } else if recipients.len() > 1 {
            Self::DistributionList
        } else {
            Self::Alias
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alias => "alias",
            Self::Forward => "forward",
            Self::DistributionList => "dlist",
        }
    }
}

impl fmt::Display for AliasKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown alias kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown alias kind: {input}")]
pub struct ParseAliasKindError {
    /// The unrecognised input value.
    pub input: String,
}

impl FromStr for AliasKind {
    type Err = ParseAliasKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alias" => Ok(Self::Alias),
            "forward" => Ok(Self::Forward),
            "dlist" => Ok(Self::DistributionList),
            other => Err(ParseAliasKindError {
                input: other.to_owned(),
            }),
        }
    }
}

/// A mail alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub id: AliasId,
    /// Local part of the alias address. Empty for a catch-all.
    pub address: String,
    pub domain_id: DomainId,
    pub domain_name: String,
    pub enabled: bool,
    pub recipients: Vec<AliasRecipient>,
}

impl Alias {
    /// Enabled alias with no recipients.
    pub fn new(
        id: impl Into<AliasId>,
        address: impl Into<String>,
        domain_id: impl Into<DomainId>,
        domain_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            domain_id: domain_id.into(),
            domain_name: domain_name.into(),
            enabled: true,
            recipients: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_recipient(mut self, recipient: AliasRecipient) -> Self {
        self.recipients.push(recipient);
        self
    }

    /// `local@domain`.
    pub fn full_address(&self) -> String {
        format!("{}@{}", self.address, self.domain_name)
    }

    pub fn kind(&self) -> AliasKind {
        AliasKind::of(&self.recipients)
    }

    /// Recipient addresses joined for display.
    pub fn recipients_display(&self) -> String {
        self.recipients
            .iter()
            .map(AliasRecipient::address)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Filterable<AliasField> for Alias {
    fn primary_key(&self) -> i32 {
        self.id.get()
    }

    fn text_values(&self, field: AliasField) -> Vec<&str> {
        match field {
            AliasField::Address => vec![self.address.as_str()],
            AliasField::DomainName => vec![self.domain_name.as_str()],
        }
    }

    fn flag_value(&self, _field: AliasField) -> Option<bool> {
        None
    }
}
