//! Built-in hook contributing relay domains to the domain listing.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::extensions::ExtraDomainEntries;
use crate::domain::ports::{ObjectAccessRepository, RelayDomainRepository};
use crate::domain::query::{Predicate, RelayDomainField};
use crate::domain::{
    Account, ContentKind, ContributedDomain, DomainListingQuery, Error, RelayDomain,
};

/// Registry name of the hook.
pub const RELAY_DOMAINS_HOOK: &str = "relaydomains";
/// Kind label of relay domains in listings; also the `domfilter` value
/// selecting them.
pub const RELAY_DOMAIN_KIND: &str = "relaydomain";
/// Extra filter restricting relay domains to one transport service.
pub const SERVICE_FILTER: &str = "srvfilter";

/// Lists relay domains visible to the principal.
pub struct RelayDomainEntries<G: ?Sized, R: ?Sized> {
    grants: Arc<G>,
    relays: Arc<R>,
}

impl<G: ?Sized, R: ?Sized> RelayDomainEntries<G, R> {
    pub fn new(grants: Arc<G>, relays: Arc<R>) -> Self {
        Self { grants, relays }
    }
}

impl<G, R> RelayDomainEntries<G, R>
where
    G: ObjectAccessRepository + ?Sized,
    R: RelayDomainRepository + ?Sized,
{
    async fn predicate(
        &self,
        principal: &Account,
        query: &DomainListingQuery,
    ) -> Result<Predicate<RelayDomainField>, Error> {
        let mut predicate = if principal.is_superuser {
            Predicate::All
        } else {
            Predicate::id_in(
                self.grants
                    .granted_ids(principal.id, ContentKind::RelayDomain)
                    .await?,
            )
        };
        if let Some(search) = query.search.as_deref() {
            predicate &= Predicate::icontains(RelayDomainField::Name, search);
        }
        if let Some(service) = query.extra(SERVICE_FILTER) {
            predicate &= Predicate::equals(RelayDomainField::Service, service);
        }
        Ok(predicate)
    }
}

#[async_trait]
impl<G, R> ExtraDomainEntries for RelayDomainEntries<G, R>
where
    G: ObjectAccessRepository + ?Sized,
    R: RelayDomainRepository + ?Sized,
{
    async fn entries(
        &self,
        principal: &Account,
        query: &DomainListingQuery,
    ) -> Result<Vec<ContributedDomain>, Error> {
        if query
            .domain_filter
            .as_deref()
            .is_some_and(|filter| filter != RELAY_DOMAIN_KIND)
        {
            return Ok(Vec::new());
        }
        let predicate = self.predicate(principal, query).await?;
        let relays = self.relays.list(&predicate).await?;
        Ok(relays.into_iter().map(contributed).collect())
    }
}

fn contributed(relay: RelayDomain) -> ContributedDomain {
    ContributedDomain {
        source: RELAY_DOMAINS_HOOK.to_owned(),
        kind: RELAY_DOMAIN_KIND.to_owned(),
        id: relay.id.get(),
        name: relay.name,
        aliases: Vec::new(),
        enabled: relay.enabled,
    }
}
