//! Mail domains, relay domains and the merged domain listing entry.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::query::{DomainField, Filterable, RelayDomainField};
use super::{DomainId, RelayDomainId};

/// Kind label of own domains in listings.
pub const DOMAIN_KIND: &str = "domain";

/// A hosted mail domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub id: DomainId,
    pub name: String,
    /// Domain-alias names pointing at this domain.
    pub aliases: Vec<String>,
    /// Quota in megabytes; zero means unlimited.
    pub quota: i32,
    pub enabled: bool,
}

impl Domain {
    pub fn new(id: impl Into<DomainId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            aliases: Vec::new(),
            quota: 0,
            enabled: true,
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }
}

impl Filterable<DomainField> for Domain {
    fn primary_key(&self) -> i32 {
        self.id.get()
    }

    fn text_values(&self, field: DomainField) -> Vec<&str> {
        match field {
            DomainField::Name => vec![self.name.as_str()],
            DomainField::AliasName => self.aliases.iter().map(String::as_str).collect(),
        }
    }

    fn flag_value(&self, _field: DomainField) -> Option<bool> {
        None
    }
}

/// A domain relayed to another host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayDomain {
    pub id: RelayDomainId,
    pub name: String,
    pub target_host: String,
    /// Transport service name, e.g. `relay` or `smtp`.
    pub service: String,
    pub enabled: bool,
}

impl RelayDomain {
    pub fn new(
        id: impl Into<RelayDomainId>,
        name: impl Into<String>,
        target_host: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            target_host: target_host.into(),
            service: service.into(),
            enabled: true,
        }
    }
}

impl Filterable<RelayDomainField> for RelayDomain {
    fn primary_key(&self) -> i32 {
        self.id.get()
    }

    fn text_values(&self, field: RelayDomainField) -> Vec<&str> {
        match field {
            RelayDomainField::Name => vec![self.name.as_str()],
            RelayDomainField::Service => vec![self.service.as_str()],
        }
    }

    fn flag_value(&self, _field: RelayDomainField) -> Option<bool> {
        None
    }
}

/// Domain-like entry contributed by an extension hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributedDomain {
    /// Name of the hook that produced the entry.
    pub source: String,
    /// Kind label shown in listings, e.g. `relaydomain`.
    pub kind: String,
    pub id: i32,
    pub name: String,
    pub aliases: Vec<String>,
    pub enabled: bool,
}

/// One row of the domain listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainEntry {
    Domain(Domain),
    Contributed(ContributedDomain),
}

impl DomainEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::Domain(domain) => &domain.name,
            Self::Contributed(entry) => &entry.name,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Self::Domain(_) => DOMAIN_KIND,
            Self::Contributed(entry) => &entry.kind,
        }
    }

    /// Display projection.
    pub fn view(&self) -> DomainEntryView {
        match self {
            Self::Domain(domain) => DomainEntryView {
                id: domain.id.get(),
                kind: DOMAIN_KIND.to_owned(),
                name: domain.name.clone(),
                aliases: domain.aliases.clone(),
                enabled: domain.enabled,
                source: None,
            },
            Self::Contributed(entry) => DomainEntryView {
                id: entry.id,
                kind: entry.kind.clone(),
                name: entry.name.clone(),
                aliases: entry.aliases.clone(),
                enabled: entry.enabled,
                source: Some(entry.source.clone()),
            },
        }
    }
}

/// Serialised row of `GET /api/v1/domains`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DomainEntryView {
    #[schema(example = 4)]
    pub id: i32,
    /// `domain` for own domains, the hook's label otherwise.
    #[serde(rename = "type")]
    #[schema(example = "domain")]
    pub kind: String,
    #[schema(example = "example.org")]
    pub name: String,
    pub aliases: Vec<String>,
    pub enabled: bool,
    /// Hook that contributed the entry; absent for own domains.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::Predicate;
    use rstest::rstest;

    #[rstest]
    fn own_domains_project_without_source() {
        let view = DomainEntry::Domain(Domain::new(4, "example.org")).view();
        assert_eq!(view.kind, "domain");
        assert_eq!(view.source, None);
        let json = serde_json::to_value(&view).expect("serialise view");
        assert_eq!(json["type"], "domain");
        assert!(json.get("source").is_none());
    }

    #[rstest]
    fn contributed_entries_keep_their_labels() {
        let entry = DomainEntry::Contributed(ContributedDomain {
            source: "relaydomains".into(),
            kind: "relaydomain".into(),
            id: 9,
            name: "relay.example".into(),
            aliases: Vec::new(),
            enabled: false,
        });
        assert_eq!(entry.kind(), "relaydomain");
        assert_eq!(entry.name(), "relay.example");
        assert_eq!(entry.view().source.as_deref(), Some("relaydomains"));
    }

    #[rstest]
    fn alias_names_are_searchable() {
        let domain = Domain::new(1, "example.org").with_alias("example.net");
        assert!(Predicate::icontains(DomainField::AliasName, "NET").matches(&domain));
        assert!(!Predicate::icontains(DomainField::Name, "net").matches(&domain));
    }
}
