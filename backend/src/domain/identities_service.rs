//! Access-scoped identity listing.
//!
//! Accounts and aliases are listed together. Each branch starts from the ids
//! the principal holds grants on and narrows them with the search and group
//! filters before hitting the store. Alias kinds are derived from recipients,
//! so a kind filter is applied in memory after the fetch.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{AccountRepository, AliasRepository, ObjectAccessRepository};
use crate::domain::query::{AccountField, AliasField, Predicate};
use crate::domain::{
    Account, Alias, ContentKind, Error, GroupFilter, Identity, IdentityListingQuery,
    IdentityTypeFilter, split_mailbox,
};

/// Forward-only sequence of identities: accounts first, then aliases.
#[derive(Debug)]
pub struct Identities {
    accounts: std::vec::IntoIter<Account>,
    aliases: std::vec::IntoIter<Alias>,
}

impl Identities {
    /// Sequence yielding `accounts`, then `aliases`.
    pub fn new(accounts: Vec<Account>, aliases: Vec<Alias>) -> Self {
        Self {
            accounts: accounts.into_iter(),
            aliases: aliases.into_iter(),
        }
    }
}

impl Iterator for Identities {
    type Item = Identity;

    fn next(&mut self) -> Option<Self::Item> {
        self.accounts
            .next()
            .map(Identity::Account)
            .or_else(|| self.aliases.next().map(Identity::Alias))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.accounts.len() + self.aliases.len();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Identities {}

/// Lists the accounts and aliases a principal administers.
pub struct IdentityListingService<G: ?Sized, A: ?Sized, L: ?Sized> {
    grants: Arc<G>,
    accounts: Arc<A>,
    aliases: Arc<L>,
}

impl<G: ?Sized, A: ?Sized, L: ?Sized> Clone for IdentityListingService<G, A, L> {
    fn clone(&self) -> Self {
        Self {
            grants: Arc::clone(&self.grants),
            accounts: Arc::clone(&self.accounts),
            aliases: Arc::clone(&self.aliases),
        }
    }
}

impl<G: ?Sized, A: ?Sized, L: ?Sized> IdentityListingService<G, A, L> {
    /// Create the service from its grant, account and alias ports.
    pub fn new(grants: Arc<G>, accounts: Arc<A>, aliases: Arc<L>) -> Self {
        Self {
            grants,
            accounts,
            aliases,
        }
    }
}

impl<G, A, L> IdentityListingService<G, A, L>
where
    G: ObjectAccessRepository + ?Sized,
    A: AccountRepository + ?Sized,
    L: AliasRepository + ?Sized,
{
    /// Identities visible to `principal`, narrowed by `query`.
    pub async fn list(
        &self,
        principal: &Account,
        query: &IdentityListingQuery,
    ) -> Result<Identities, Error> {
        let accounts = if includes_accounts(query.identity_type) {
            self.list_accounts(principal, query).await?
        } else {
            Vec::new()
        };
        let aliases = if includes_aliases(query.identity_type) {
            self.list_aliases(principal, query).await?
        } else {
            Vec::new()
        };
        debug!(
            principal = %principal.id,
            accounts = accounts.len(),
            aliases = aliases.len(),
            "identity listing resolved"
        );
        Ok(Identities::new(accounts, aliases))
    }

    async fn list_accounts(
        &self,
        principal: &Account,
        query: &IdentityListingQuery,
    ) -> Result<Vec<Account>, Error> {
        let granted = self
            .grants
            .granted_ids(principal.id, ContentKind::Account)
            .await?;
        let predicate = account_predicate(granted, query);
        Ok(self.accounts.list(&predicate).await?)
    }

    async fn list_aliases(
        &self,
        principal: &Account,
        query: &IdentityListingQuery,
    ) -> Result<Vec<Alias>, Error> {
        let granted = self
            .grants
            .granted_ids(principal.id, ContentKind::Alias)
            .await?;
        let predicate = alias_predicate(granted, query.search.as_deref());
        let mut aliases = self.aliases.list(&predicate).await?;
        if let Some(kind) = query.identity_type.and_then(IdentityTypeFilter::alias_kind) {
            aliases.retain(|alias| alias.kind() == kind);
        }
        Ok(aliases)
    }
}

fn includes_accounts(filter: Option<IdentityTypeFilter>) -> bool {
    matches!(filter, None | Some(IdentityTypeFilter::Account))
}

fn includes_aliases(filter: Option<IdentityTypeFilter>) -> bool {
    filter.is_none_or(|kind| kind.alias_kind().is_some())
}

fn account_predicate(
    granted: impl IntoIterator<Item = i32>,
    query: &IdentityListingQuery,
) -> Predicate<AccountField> {
    let mut predicate = Predicate::id_in(granted);
    if let Some(search) = query.search.as_deref() {
        predicate &= Predicate::icontains(AccountField::Username, search)
            | Predicate::icontains(AccountField::Email, search);
    }
    match &query.group {
        Some(GroupFilter::SuperAdmins) => {
            predicate &= Predicate::flag(AccountField::IsSuperuser, true);
        }
        Some(GroupFilter::Named(name)) => {
            predicate &= Predicate::equals(AccountField::GroupName, name.as_str());
        }
        None => {}
    }
    predicate
}

fn alias_predicate(granted: impl IntoIterator<Item = i32>, search: Option<&str>) -> Predicate<AliasField> {
    let mut predicate = Predicate::id_in(granted);
    let Some(search) = search else {
        return predicate;
    };
    if search.contains('@') {
        let (local_part, domain) = split_mailbox(search);
        if !local_part.is_empty() {
            predicate &= Predicate::icontains(AliasField::Address, local_part);
        }
        if !domain.is_empty() {
            predicate &= Predicate::icontains(AliasField::DomainName, domain);
        }
    } else {
        predicate &= Predicate::icontains(AliasField::Address, search)
            | Predicate::icontains(AliasField::DomainName, search);
    }
    predicate
}

#[cfg(test)]
#[path = "identities_service_tests.rs"]
mod tests;
