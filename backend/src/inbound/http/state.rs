//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data`, so they depend only on domain
//! ports and services and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountRepository, AliasRepository, DomainRepository, MailboxRepository,
    ObjectAccessRepository, ParameterStore,
};
use crate::domain::{
    DomainListingService, ExtraDomainEntriesRegistry, IdentityListingService, ListingPager,
    MailboxGuard,
};

/// Identity listing service over trait objects.
pub type DynIdentityListingService =
    IdentityListingService<dyn ObjectAccessRepository, dyn AccountRepository, dyn AliasRepository>;

/// Domain listing service over trait objects.
pub type DynDomainListingService =
    DomainListingService<dyn ObjectAccessRepository, dyn DomainRepository>;

/// Parameter object bundling the port implementations.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub grants: Arc<dyn ObjectAccessRepository>,
    pub accounts: Arc<dyn AccountRepository>,
    pub aliases: Arc<dyn AliasRepository>,
    pub domains: Arc<dyn DomainRepository>,
    pub mailboxes: Arc<dyn MailboxRepository>,
    pub parameters: Arc<dyn ParameterStore>,
    pub hooks: ExtraDomainEntriesRegistry,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountRepository>,
    pub mailboxes: Arc<dyn MailboxRepository>,
    pub identities: DynIdentityListingService,
    pub domains: DynDomainListingService,
    pub mailbox_guard: MailboxGuard<dyn MailboxRepository>,
    pub pager: ListingPager<dyn ParameterStore>,
}

impl HttpState {
    /// Wire the listing services from their ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mailadmin::domain::ExtraDomainEntriesRegistry;
    /// use mailadmin::inbound::http::state::{HttpState, HttpStatePorts};
    /// use mailadmin::outbound::memory::{InMemoryDirectory, InMemoryParameterStore};
    ///
    /// let directory = Arc::new(InMemoryDirectory::new());
    /// let state = HttpState::new(HttpStatePorts {
    ///     grants: directory.clone(),
    ///     accounts: directory.clone(),
    ///     aliases: directory.clone(),
    ///     domains: directory.clone(),
    ///     mailboxes: directory,
    ///     parameters: Arc::new(InMemoryParameterStore::new()),
    ///     hooks: ExtraDomainEntriesRegistry::new(),
    /// });
    /// # let _ = state;
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            grants,
            accounts,
            aliases,
            domains,
            mailboxes,
            parameters,
            hooks,
        } = ports;
        Self {
            identities: IdentityListingService::new(grants.clone(), accounts.clone(), aliases),
            domains: DomainListingService::new(grants, domains, Arc::new(hooks)),
            mailbox_guard: MailboxGuard::new(mailboxes.clone()),
            pager: ListingPager::new(parameters),
            accounts,
            mailboxes,
        }
    }
}
