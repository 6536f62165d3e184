//! Port for object-access grants.
//!
//! A grant links an account to one object it may administer. Listings only
//! ever need the set of object ids of one kind, so that is all the port
//! exposes.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{AccountId, ContentKind};

use super::DirectoryRepositoryError;

/// Read access to object-access grants.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectAccessRepository: Send + Sync {
    /// Ids of the objects of `kind` that `account` holds a grant on.
    async fn granted_ids(
        &self,
        account: AccountId,
        kind: ContentKind,
    ) -> Result<BTreeSet<i32>, DirectoryRepositoryError>;
}
