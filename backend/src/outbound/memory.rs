//! In-memory directory and parameter store.
//!
//! Used when no database is configured and by HTTP tests. Predicates are
//! evaluated with [`Predicate::matches`], so the in-memory adapter honours
//! the same access rules as the SQL translation.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    AccountRepository, AliasRepository, DirectoryRepositoryError, DomainRepository,
    MailboxRepository, ObjectAccessRepository, ParameterStore, ParameterStoreError,
    RelayDomainRepository,
};
use crate::domain::query::{AccountField, AliasField, DomainField, Predicate, RelayDomainField};
use crate::domain::{
    Account, AccountId, Alias, AliasId, ContentKind, Domain, DomainId, Mailbox, MailboxId,
    RelayDomain, RelayDomainId,
};

#[derive(Debug, Default)]
struct DirectoryData {
    accounts: BTreeMap<AccountId, Account>,
    aliases: BTreeMap<AliasId, Alias>,
    domains: BTreeMap<DomainId, Domain>,
    relay_domains: BTreeMap<RelayDomainId, RelayDomain>,
    mailboxes: BTreeMap<MailboxId, Mailbox>,
    grants: BTreeMap<(AccountId, ContentKind), BTreeSet<i32>>,
}

/// Directory held in process memory.
///
/// # Examples
///
/// ```
/// use mailadmin::domain::{Account, ContentKind};
/// use mailadmin::outbound::memory::InMemoryDirectory;
///
/// let directory = InMemoryDirectory::new()
///     .with_account(Account::new(1, "admin"))
///     .with_grant(1, ContentKind::Account, 1);
/// # let _ = directory;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    data: RwLock<DirectoryData>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_account(mut self, account: Account) -> Self {
        self.data.get_mut().accounts.insert(account.id, account);
        self
    }

    #[must_use]
    pub fn with_alias(mut self, alias: Alias) -> Self {
        self.data.get_mut().aliases.insert(alias.id, alias);
        self
    }

    #[must_use]
    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.data.get_mut().domains.insert(domain.id, domain);
        self
    }

    #[must_use]
    pub fn with_relay_domain(mut self, relay: RelayDomain) -> Self {
        self.data.get_mut().relay_domains.insert(relay.id, relay);
        self
    }

    #[must_use]
    pub fn with_mailbox(mut self, mailbox: Mailbox) -> Self {
        self.data.get_mut().mailboxes.insert(mailbox.id, mailbox);
        self
    }

    /// Grant `account` access to the object `object_id` of `kind`.
    #[must_use]
    pub fn with_grant(mut self, account: impl Into<AccountId>, kind: ContentKind, object_id: i32) -> Self {
        self.data
            .get_mut()
            .grants
            .entry((account.into(), kind))
            .or_default()
            .insert(object_id);
        self
    }

    /// Grant at runtime.
    pub async fn grant(&self, account: AccountId, kind: ContentKind, object_id: i32) {
        self.data
            .write()
            .await
            .grants
            .entry((account, kind))
            .or_default()
            .insert(object_id);
    }
}

fn select<K, T, F>(rows: &BTreeMap<K, T>, predicate: &Predicate<F>) -> Vec<T>
where
    T: crate::domain::query::Filterable<F> + Clone,
    F: Copy,
{
    rows.values()
        .filter(|row| predicate.matches(*row))
        .cloned()
        .collect()
}

#[async_trait]
impl ObjectAccessRepository for InMemoryDirectory {
    async fn granted_ids(
        &self,
        account: AccountId,
        kind: ContentKind,
    ) -> Result<BTreeSet<i32>, DirectoryRepositoryError> {
        let data = self.data.read().await;
        Ok(data.grants.get(&(account, kind)).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl AccountRepository for InMemoryDirectory {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, DirectoryRepositoryError> {
        Ok(self.data.read().await.accounts.get(&id).cloned())
    }

    async fn list(
        &self,
        predicate: &Predicate<AccountField>,
    ) -> Result<Vec<Account>, DirectoryRepositoryError> {
        Ok(select(&self.data.read().await.accounts, predicate))
    }
}

#[async_trait]
impl AliasRepository for InMemoryDirectory {
    async fn list(
        &self,
        predicate: &Predicate<AliasField>,
    ) -> Result<Vec<Alias>, DirectoryRepositoryError> {
        Ok(select(&self.data.read().await.aliases, predicate))
    }
}

#[async_trait]
impl DomainRepository for InMemoryDirectory {
    async fn list(
        &self,
        predicate: &Predicate<DomainField>,
    ) -> Result<Vec<Domain>, DirectoryRepositoryError> {
        Ok(select(&self.data.read().await.domains, predicate))
    }
}

#[async_trait]
impl RelayDomainRepository for InMemoryDirectory {
    async fn list(
        &self,
        predicate: &Predicate<RelayDomainField>,
    ) -> Result<Vec<RelayDomain>, DirectoryRepositoryError> {
        Ok(select(&self.data.read().await.relay_domains, predicate))
    }
}

#[async_trait]
impl MailboxRepository for InMemoryDirectory {
    async fn count_for_account(&self, account: AccountId) -> Result<u64, DirectoryRepositoryError> {
        let data = self.data.read().await;
        let owned = data
            .mailboxes
            .values()
            .filter(|mailbox| mailbox.owner == account)
            .count();
        Ok(u64::try_from(owned).unwrap_or(u64::MAX))
    }

    async fn list_for_account(
        &self,
        account: AccountId,
    ) -> Result<Vec<Mailbox>, DirectoryRepositoryError> {
        let data = self.data.read().await;
        let mut owned: Vec<Mailbox> = data
            .mailboxes
            .values()
            .filter(|mailbox| mailbox.owner == account)
            .cloned()
            .collect();
        owned.sort_by_key(Mailbox::full_address);
        Ok(owned)
    }
}

/// Parameters held in process memory, keyed `namespace.NAME`.
#[derive(Debug, Default)]
pub struct InMemoryParameterStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_parameter(mut self, namespace: &str, name: &str, value: impl Into<String>) -> Self {
        self.values
            .get_mut()
            .insert(parameter_key(namespace, name), value.into());
        self
    }

    /// Set or replace a parameter at runtime.
    pub async fn set(&self, namespace: &str, name: &str, value: impl Into<String>) {
        self.values
            .write()
            .await
            .insert(parameter_key(namespace, name), value.into());
    }
}

/// Storage key of a parameter.
pub(crate) fn parameter_key(namespace: &str, name: &str) -> String {
    format!("{namespace}.{name}")
}

#[async_trait]
impl ParameterStore for InMemoryParameterStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<String>, ParameterStoreError> {
        let values = self.values.read().await;
        Ok(values.get(&parameter_key(namespace, name)).cloned())
    }
}
