//! Port for alias lookups.

use async_trait::async_trait;

use crate::domain::Alias;
use crate::domain::query::{AliasField, Predicate};

use super::DirectoryRepositoryError;

/// Read access to aliases, recipients included.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AliasRepository: Send + Sync {
    /// Aliases matching `predicate`, ordered by primary key.
    async fn list(
        &self,
        predicate: &Predicate<AliasField>,
    ) -> Result<Vec<Alias>, DirectoryRepositoryError>;
}
