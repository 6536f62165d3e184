//! Administrator and user accounts.
//!
//! An [`Account`] is both the authorization principal of a listing request and
//! one of the two identity kinds the identity listing returns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::AccountId;
use super::query::{AccountField, Filterable};

/// Group name that selects superusers rather than a stored group.
pub const SUPER_ADMINS_GROUP: &str = "SuperAdmins";

/// Kind of object an access grant points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Account,
    Alias,
    Domain,
    RelayDomain,
}

impl ContentKind {
    /// Stored representation, as found in `core_objectaccess.content_type`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mailadmin::domain::ContentKind;
    /// assert_eq!(ContentKind::RelayDomain.as_str(), "relaydomain");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Alias => "alias",
            Self::Domain => "domain",
            Self::RelayDomain => "relaydomain",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown content kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown content kind: {input}")]
pub struct ParseContentKindError {
    /// The unrecognised input value.
    pub input: String,
}

impl FromStr for ContentKind {
    type Err = ParseContentKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "account" => Ok(Self::Account),
            "alias" => Ok(Self::Alias),
            "domain" => Ok(Self::Domain),
            "relaydomain" => Ok(Self::RelayDomain),
            other => Err(ParseContentKindError {
                input: other.to_owned(),
            }),
        }
    }
}

/// A directory account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_superuser: bool,
    pub is_active: bool,
    /// Names of the groups the account belongs to.
    pub groups: Vec<String>,
}

impl Account {
    /// Active, non-privileged account with no groups. `email` defaults to the
    /// username.
    pub fn new(id: impl Into<AccountId>, username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            id: id.into(),
            email: username.clone(),
            username,
            first_name: String::new(),
            last_name: String::new(),
            is_superuser: false,
            is_active: true,
            groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    #[must_use]
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    #[must_use]
    pub fn superuser(mut self) -> Self {
        self.is_superuser = true;
        self
    }

    /// "First Last", trimmed; empty when neither is set.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    /// Role tags shown next to the account in listings.
    ///
    /// Superusers are tagged with [`SUPER_ADMINS_GROUP`] ahead of their stored
    /// groups.
    pub fn tags(&self) -> Vec<String> {
        let mut tags = Vec::with_capacity(self.groups.len() + 1);
        if self.is_superuser {
            tags.push(SUPER_ADMINS_GROUP.to_owned());
        }
        tags.extend(self.groups.iter().cloned());
        tags
    }
}

impl Filterable<AccountField> for Account {
    fn primary_key(&self) -> i32 {
        self.id.get()
    }

    fn text_values(&self, field: AccountField) -> Vec<&str> {
        match field {
            AccountField::Username => vec![self.username.as_str()],
            AccountField::Email => vec![self.email.as_str()],
            AccountField::GroupName => self.groups.iter().map(String::as_str).collect(),
            AccountField::IsSuperuser => Vec::new(),
        }
    }

    fn flag_value(&self, field: AccountField) -> Option<bool> {
        match field {
            AccountField::IsSuperuser => Some(self.is_superuser),
            _ => None,
        }
    }
}
