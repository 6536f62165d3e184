//! Domain entities, listing services and ports.
//!
//! Purpose: model the mail directory (accounts, aliases, domains, mailboxes)
//! and the access-scoped listings built on top of it. Nothing here knows
//! about HTTP or SQL; adapters plug in through [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - IdentityListingService / DomainListingService: access-scoped listings.
//! - MailboxGuard: "owns a mailbox" precondition.
//! - ListingPager: page size lookup plus pagination.

pub mod account;
pub mod alias;
pub mod domains_service;
pub mod error;
pub mod extensions;
pub mod identities_service;
pub mod identity;
pub mod ids;
pub mod listing_pager;
pub mod listing_query;
pub mod mail_domain;
pub mod mailbox;
pub mod mailbox_guard;
pub mod ports;
pub mod query;
pub mod relay_domains;
pub mod trace_id;

pub use self::account::{Account, ContentKind, ParseContentKindError, SUPER_ADMINS_GROUP};
pub use self::alias::{Alias, AliasKind, AliasRecipient, ParseAliasKindError};
pub use self::domains_service::{DomainEntries, DomainListingService};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::extensions::{EXTRA_DOMAIN_ENTRIES, ExtraDomainEntries, ExtraDomainEntriesRegistry};
pub use self::identities_service::{Identities, IdentityListingService};
pub use self::identity::{Identity, IdentityKind, IdentityView};
pub use self::ids::{AccountId, AliasId, DomainId, MailboxId, RelayDomainId};
pub use self::listing_pager::{DEFAULT_ITEMS_PER_PAGE, ListingPager};
pub use self::listing_query::{
    DomainListingQuery, GroupFilter, IdentityListingQuery, IdentityTypeFilter, split_mailbox,
};
pub use self::mail_domain::{ContributedDomain, Domain, DomainEntry, DomainEntryView, RelayDomain};
pub use self::mailbox::{Mailbox, MailboxView};
pub use self::mailbox_guard::MailboxGuard;
pub use self::relay_domains::{RELAY_DOMAINS_HOOK, RelayDomainEntries};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use mailadmin::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::no_mailbox())
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
