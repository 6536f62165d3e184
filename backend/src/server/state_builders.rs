//! Builders wiring repository adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use mailadmin::domain::ports::{ObjectAccessRepository, RelayDomainRepository};
use mailadmin::domain::{
    ExtraDomainEntriesRegistry, RELAY_DOMAINS_HOOK, RelayDomainEntries,
    listing_pager::{ITEMS_PER_PAGE, ITEMS_PER_PAGE_NAMESPACE},
};
use mailadmin::inbound::http::state::{HttpState, HttpStatePorts};
use mailadmin::outbound::memory::{InMemoryDirectory, InMemoryParameterStore};
use mailadmin::outbound::persistence::{
    DbPool, DieselDirectoryRepository, DieselDomainRepository, DieselParameterStore,
};

use super::ServerConfig;

/// Extension hooks registered at startup.
fn extension_hooks(
    grants: Arc<dyn ObjectAccessRepository>,
    relays: Arc<dyn RelayDomainRepository>,
) -> ExtraDomainEntriesRegistry {
    ExtraDomainEntriesRegistry::new().with_hook(
        RELAY_DOMAINS_HOOK,
        Arc::new(RelayDomainEntries::new(grants, relays)),
    )
}

fn diesel_ports(pool: &DbPool) -> HttpStatePorts {
    let directory = Arc::new(DieselDirectoryRepository::new(pool.clone()));
    let domains = Arc::new(DieselDomainRepository::new(pool.clone()));
    let grants: Arc<dyn ObjectAccessRepository> = directory.clone();
    HttpStatePorts {
        hooks: extension_hooks(grants.clone(), domains.clone()),
        grants,
        accounts: directory.clone(),
        aliases: directory.clone(),
        domains,
        mailboxes: directory,
        parameters: Arc::new(DieselParameterStore::new(pool.clone())),
    }
}

fn memory_ports(config: &ServerConfig) -> HttpStatePorts {
    let directory = Arc::new(InMemoryDirectory::new());
    let parameters = InMemoryParameterStore::new().with_parameter(
        ITEMS_PER_PAGE_NAMESPACE,
        ITEMS_PER_PAGE,
        config.items_per_page.to_string(),
    );
    let grants: Arc<dyn ObjectAccessRepository> = directory.clone();
    HttpStatePorts {
        hooks: extension_hooks(grants.clone(), directory.clone()),
        grants,
        accounts: directory.clone(),
        aliases: directory.clone(),
        domains: directory.clone(),
        mailboxes: directory,
        parameters: Arc::new(parameters),
    }
}

/// Build the HTTP state from PostgreSQL when a pool is configured, and from
/// an empty in-memory directory otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => diesel_ports(pool),
        None => {
            info!("no database configured; serving an empty in-memory directory");
            memory_ports(config)
        }
    };
    web::Data::new(HttpState::new(ports))
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use actix_web::cookie::{Key, SameSite};
    use rstest::rstest;

    use super::*;

    fn config() -> ServerConfig {
        ServerConfig::new(
            Key::generate(),
            false,
            SameSite::Lax,
            "127.0.0.1:0".parse().expect("socket address"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn memory_state_uses_the_configured_page_size() {
        let config =
            config().with_items_per_page(NonZeroUsize::new(12).expect("non-zero page size"));
        let state = build_http_state(&config);
        assert_eq!(
            state.pager.items_per_page().await.expect("page size").get(),
            12
        );
    }

    #[rstest]
    fn relay_domains_are_registered() {
        let directory = Arc::new(InMemoryDirectory::new());
        let hooks = extension_hooks(directory.clone(), directory);
        assert_eq!(hooks.hook_names(), vec![RELAY_DOMAINS_HOOK]);
    }
}
