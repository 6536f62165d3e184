//! Port for relay domain lookups.

use async_trait::async_trait;

use crate::domain::RelayDomain;
use crate::domain::query::{Predicate, RelayDomainField};

use super::DirectoryRepositoryError;

/// Read access to relay domains.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelayDomainRepository: Send + Sync {
    async fn list(
        &self,
        predicate: &Predicate<RelayDomainField>,
    ) -> Result<Vec<RelayDomain>, DirectoryRepositoryError>;
}
