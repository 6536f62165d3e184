//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod alias_repository;
mod directory_error;
mod domain_repository;
mod mailbox_repository;
mod object_access_repository;
mod parameter_store;
mod relay_domain_repository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::AccountRepository;
#[cfg(test)]
pub use alias_repository::MockAliasRepository;
pub use alias_repository::AliasRepository;
pub use directory_error::DirectoryRepositoryError;
#[cfg(test)]
pub use domain_repository::MockDomainRepository;
pub use domain_repository::DomainRepository;
#[cfg(test)]
pub use mailbox_repository::MockMailboxRepository;
pub use mailbox_repository::MailboxRepository;
#[cfg(test)]
pub use object_access_repository::MockObjectAccessRepository;
pub use object_access_repository::ObjectAccessRepository;
#[cfg(test)]
pub use parameter_store::MockParameterStore;
pub use parameter_store::{ParameterStore, ParameterStoreError};
#[cfg(test)]
pub use relay_domain_repository::MockRelayDomainRepository;
pub use relay_domain_repository::RelayDomainRepository;
