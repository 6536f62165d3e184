//! Port for mail domain lookups.

use async_trait::async_trait;

use crate::domain::Domain;
use crate::domain::query::{DomainField, Predicate};

use super::DirectoryRepositoryError;

/// Read access to mail domains and their domain aliases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Domains matching `predicate`, ordered by primary key.
    ///
    /// Adapters that join domain aliases may return a domain more than once;
    /// callers de-duplicate.
    async fn list(
        &self,
        predicate: &Predicate<DomainField>,
    ) -> Result<Vec<Domain>, DirectoryRepositoryError>;
}
