//! Access-scoped domain listing.
//!
//! Own domains are scoped by grant (superusers see all of them) and may be
//! narrowed by a search on the domain name or any of its domain aliases.
//! Registered [`ExtraDomainEntries`](super::ExtraDomainEntries) hooks then
//! append their own entries.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::domain::extensions::ExtraDomainEntriesRegistry;
use crate::domain::ports::{DomainRepository, ObjectAccessRepository};
use crate::domain::query::{DomainField, Predicate};
use crate::domain::{
    Account, ContentKind, ContributedDomain, Domain, DomainEntry, DomainListingQuery, Error,
};

/// Forward-only sequence of domain entries: own domains first, then
/// contributed entries in hook order.
#[derive(Debug)]
pub struct DomainEntries {
    domains: std::vec::IntoIter<Domain>,
    contributed: std::vec::IntoIter<ContributedDomain>,
}

impl DomainEntries {
    /// Sequence yielding own `domains`, then `contributed` entries.
    pub fn new(domains: Vec<Domain>, contributed: Vec<ContributedDomain>) -> Self {
        Self {
            domains: domains.into_iter(),
            contributed: contributed.into_iter(),
        }
    }
}

impl Iterator for DomainEntries {
    type Item = DomainEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.domains
            .next()
            .map(DomainEntry::Domain)
            .or_else(|| self.contributed.next().map(DomainEntry::Contributed))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.domains.len() + self.contributed.len();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DomainEntries {}

/// Lists the domains a principal administers plus hook contributions.
pub struct DomainListingService<G: ?Sized, D: ?Sized> {
    grants: Arc<G>,
    domains: Arc<D>,
    hooks: Arc<ExtraDomainEntriesRegistry>,
}

impl<G: ?Sized, D: ?Sized> Clone for DomainListingService<G, D> {
    fn clone(&self) -> Self {
        Self {
            grants: Arc::clone(&self.grants),
            domains: Arc::clone(&self.domains),
            hooks: Arc::clone(&self.hooks),
        }
    }
}

impl<G: ?Sized, D: ?Sized> DomainListingService<G, D> {
    /// Create the service; `hooks` are invoked on every listing.
    pub fn new(grants: Arc<G>, domains: Arc<D>, hooks: Arc<ExtraDomainEntriesRegistry>) -> Self {
        Self {
            grants,
            domains,
            hooks,
        }
    }
}

impl<G, D> DomainListingService<G, D>
where
    G: ObjectAccessRepository + ?Sized,
    D: DomainRepository + ?Sized,
{
    /// Domain entries visible to `principal`, narrowed by `query`.
    pub async fn list(
        &self,
        principal: &Account,
        query: &DomainListingQuery,
    ) -> Result<DomainEntries, Error> {
        let domains = if query.includes_domains() {
            self.list_domains(principal, query.search.as_deref()).await?
        } else {
            Vec::new()
        };
        let contributed = self.hooks.collect(principal, query).await?;
        debug!(
            principal = %principal.id,
            domains = domains.len(),
            contributed = contributed.len(),
            "domain listing resolved"
        );
        Ok(DomainEntries::new(domains, contributed))
    }

    async fn list_domains(
        &self,
        principal: &Account,
        search: Option<&str>,
    ) -> Result<Vec<Domain>, Error> {
        let mut predicate = if principal.is_superuser {
            Predicate::All
        } else {
            Predicate::id_in(
                self.grants
                    .granted_ids(principal.id, ContentKind::Domain)
                    .await?,
            )
        };
        if let Some(search) = search {
            predicate &= Predicate::icontains(DomainField::Name, search)
                | Predicate::icontains(DomainField::AliasName, search);
        }
        let mut domains = self.domains.list(&predicate).await?;
        let mut seen = HashSet::with_capacity(domains.len());
        domains.retain(|domain| seen.insert(domain.id));
        Ok(domains)
    }
}

#[cfg(test)]
#[path = "domains_service_tests.rs"]
mod tests;
