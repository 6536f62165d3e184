//! Extension hooks that contribute extra rows to the domain listing.
//!
//! Hooks are registered by name at startup and injected into
//! [`DomainListingService`](super::DomainListingService). They run in
//! registration order on every listing request.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Account, ContributedDomain, DomainListingQuery, Error};

/// Event name under which hooks contribute domain entries.
pub const EXTRA_DOMAIN_ENTRIES: &str = "ExtraDomainEntries";

/// Contributes domain-like entries to the domain listing.
///
/// Implementations apply their own access scoping and filtering; the listing
/// appends whatever they return.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExtraDomainEntries: Send + Sync {
    async fn entries(
        &self,
        principal: &Account,
        query: &DomainListingQuery,
    ) -> Result<Vec<ContributedDomain>, Error>;
}

/// Ordered, named set of [`ExtraDomainEntries`] hooks.
#[derive(Clone, Default)]
pub struct ExtraDomainEntriesRegistry {
    hooks: Vec<(String, Arc<dyn ExtraDomainEntries>)>,
}

impl ExtraDomainEntriesRegistry {
    /// Registry with no hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hook. Names are informational and may repeat.
    pub fn register(&mut self, name: impl Into<String>, hook: Arc<dyn ExtraDomainEntries>) {
        self.hooks.push((name.into(), hook));
    }

    /// Builder-style [`Self::register`].
    #[must_use]
    pub fn with_hook(mut self, name: impl Into<String>, hook: Arc<dyn ExtraDomainEntries>) -> Self {
        self.register(name, hook);
        self
    }

    /// Registered hook names in invocation order.
    pub fn hook_names(&self) -> Vec<&str> {
        self.hooks.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// True when no hook is registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every hook in order and concatenate their entries.
    ///
    /// The first failing hook aborts the collection.
    pub async fn collect(
        &self,
        principal: &Account,
        query: &DomainListingQuery,
    ) -> Result<Vec<ContributedDomain>, Error> {
        let mut entries = Vec::new();
        for (name, hook) in &self.hooks {
            let contributed = hook.entries(principal, query).await?;
            tracing::debug!(
                event = EXTRA_DOMAIN_ENTRIES,
                hook = name.as_str(),
                count = contributed.len(),
                "hook contributed domain entries"
            );
            entries.extend(contributed);
        }
        Ok(entries)
    }
}

impl std::fmt::Debug for ExtraDomainEntriesRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtraDomainEntriesRegistry")
            .field("hooks", &self.hook_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn entry(source: &str, id: i32) -> ContributedDomain {
        ContributedDomain {
            source: source.to_owned(),
            kind: "test".to_owned(),
            id,
            name: format!("{source}-{id}.example"),
            aliases: Vec::new(),
            enabled: true,
        }
    }

    fn hook(source: &'static str, ids: Vec<i32>) -> Arc<dyn ExtraDomainEntries> {
        let mut mock = MockExtraDomainEntries::new();
        mock.expect_entries()
            .times(1)
            .return_once(move |_, _| Ok(ids.into_iter().map(|id| entry(source, id)).collect()));
        Arc::new(mock)
    }

    #[rstest]
    #[tokio::test]
    async fn hooks_run_in_registration_order() {
        let registry = ExtraDomainEntriesRegistry::new()
            .with_hook("first", hook("first", vec![2, 1]))
            .with_hook("second", hook("second", vec![1]));

        assert_eq!(registry.hook_names(), vec!["first", "second"]);
        let entries = registry
            .collect(&Account::new(1, "admin"), &DomainListingQuery::default())
            .await
            .expect("hooks succeed");
        let order: Vec<_> = entries.iter().map(|e| (e.source.as_str(), e.id)).collect();
        assert_eq!(order, vec![("first", 2), ("first", 1), ("second", 1)]);
    }

    #[rstest]
    #[tokio::test]
    async fn a_failing_hook_aborts_the_collection() {
        let mut failing = MockExtraDomainEntries::new();
        failing
            .expect_entries()
            .times(1)
            .return_once(|_, _| Err(Error::service_unavailable("relay store down")));
        let mut skipped = MockExtraDomainEntries::new();
        skipped.expect_entries().never();
        let registry = ExtraDomainEntriesRegistry::new()
            .with_hook("failing", Arc::new(failing))
            .with_hook("skipped", Arc::new(skipped));

        let error = registry
            .collect(&Account::new(1, "admin"), &DomainListingQuery::default())
            .await
            .expect_err("hook fails");
        assert_eq!(error.message(), "relay store down");
    }

    #[rstest]
    #[tokio::test]
    async fn an_empty_registry_contributes_nothing() {
        let registry = ExtraDomainEntriesRegistry::default();
        assert!(registry.is_empty());
        let entries = registry
            .collect(&Account::new(1, "admin"), &DomainListingQuery::default())
            .await
            .expect("no hooks");
        assert!(entries.is_empty());
    }
}
