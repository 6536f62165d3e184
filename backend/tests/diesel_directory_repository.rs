//! Integration tests for the Diesel directory adapters against embedded
//! PostgreSQL.
//!
//! Each test clones a migrated template database, seeds a small directory and
//! drives the adapters both directly and through the listing services. Set
//! `SKIP_TEST_CLUSTER=1` where the embedded cluster cannot start.

use std::collections::BTreeMap;
use std::sync::Arc;

use mailadmin::domain::ports::{
    AccountRepository, AliasRepository, DomainRepository, MailboxRepository,
    ObjectAccessRepository, ParameterStore, RelayDomainRepository,
};
use mailadmin::domain::query::{AccountField, AliasField, DomainField, Predicate, RelayDomainField};
use mailadmin::domain::{
    Account, AccountId, AliasKind, AliasRecipient, ContentKind, DomainListingQuery,
    DomainListingService, ExtraDomainEntriesRegistry, IdentityKind, IdentityListingQuery,
    IdentityListingService, RELAY_DOMAINS_HOOK, RelayDomainEntries,
};
use mailadmin::outbound::persistence::{
    DbPool, DieselDirectoryRepository, DieselDomainRepository, DieselParameterStore, PoolConfig,
};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::embedded_postgres::execute_sql;
use support::{handle_cluster_setup_failure, provision_template_database, shared_cluster};

const SEED: &str = r"
INSERT INTO core_user (id, username, email, first_name, last_name, is_superuser) VALUES
    (1, 'admin@example.com', 'admin@example.com', 'Ada', 'Admin', FALSE),
    (2, 'user@example.com', 'user@example.com', 'Una', 'User', FALSE),
    (3, 'root@example.com', 'root@example.com', '', '', TRUE),
    (4, 'other@other.org', 'other@other.org', '', '', FALSE);

INSERT INTO core_group (id, name) VALUES (1, 'DomainAdmins'), (2, 'SimpleUsers');
INSERT INTO core_user_groups (user_id, group_id) VALUES (1, 1), (2, 2), (3, 2);

INSERT INTO admin_domain (id, name, quota) VALUES (1, 'example.com', 100), (2, 'other.org', 0);
INSERT INTO admin_domainalias (name, target_id) VALUES
    ('example.net', 1),
    ('alias-b.example', 1);

INSERT INTO admin_alias (id, address, domain_id) VALUES
    (10, 'user', 1),
    (11, 'forward', 1),
    (12, 'team', 1),
    (13, 'postmaster', 2);
INSERT INTO admin_alias_recipient (alias_id, kind, address) VALUES
    (10, 'mailbox', 'user@example.com'),
    (11, 'external', 'someone@elsewhere.test'),
    (12, 'mailbox', 'admin@example.com'),
    (12, 'alias', 'user@example.com'),
    (13, 'mailbox', 'other@other.org');

INSERT INTO admin_mailbox (id, address, domain_id, user_id) VALUES
    (1, 'user', 1, 2),
    (2, 'billing', 1, 1),
    (3, 'admin', 1, 1);

INSERT INTO relaydomains_relaydomain (id, name, target_host, service) VALUES
    (1, 'relay.example.com', 'mx.relay.test', 'relay'),
    (2, 'smtp.example.com', 'mx.smtp.test', 'smtp');

INSERT INTO core_objectaccess (user_id, content_type, object_id) VALUES
    (1, 'account', 2),
    (1, 'account', 3),
    (1, 'alias', 10),
    (1, 'alias', 11),
    (1, 'alias', 12),
    (1, 'domain', 1),
    (1, 'relaydomain', 1);

INSERT INTO lib_parameter (name, value) VALUES ('core.ITEMS_PER_PAGE', '15');
";

struct TestContext {
    runtime: Runtime,
    directory: Arc<DieselDirectoryRepository>,
    domains: Arc<DieselDomainRepository>,
    parameters: DieselParameterStore,
    _database: TemporaryDatabase,
}

fn setup_test_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let temp_db = provision_template_database(cluster)?;
    let database_url = temp_db.url().to_string();
    execute_sql(&database_url, SEED)?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        directory: Arc::new(DieselDirectoryRepository::new(pool.clone())),
        domains: Arc::new(DieselDomainRepository::new(pool.clone())),
        parameters: DieselParameterStore::new(pool),
        _database: temp_db,
    })
}

#[fixture]
fn diesel_world() -> Option<TestContext> {
    match setup_test_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn domain_admin() -> Account {
    let mut account = Account::new(1, "admin@example.com");
    account.groups = vec!["DomainAdmins".to_owned()];
    account
}

#[rstest]
fn grants_are_scoped_per_account_and_kind(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: grants_are_scoped_per_account_and_kind skipped");
        return;
    };
    ctx.runtime.block_on(async {
        let grants = |account: i32, kind: ContentKind| {
            let directory = Arc::clone(&ctx.directory);
            async move {
                directory
                    .granted_ids(AccountId::new(account), kind)
                    .await
                    .expect("grants load")
                    .into_iter()
                    .collect::<Vec<_>>()
            }
        };
        assert_eq!(grants(1, ContentKind::Account).await, vec![2, 3]);
        assert_eq!(grants(1, ContentKind::Alias).await, vec![10, 11, 12]);
        assert_eq!(grants(1, ContentKind::Domain).await, vec![1]);
        assert_eq!(grants(1, ContentKind::RelayDomain).await, vec![1]);
        assert!(grants(4, ContentKind::Account).await.is_empty());
    });
}

#[rstest]
fn accounts_carry_their_groups(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: accounts_carry_their_groups skipped");
        return;
    };
    ctx.runtime.block_on(async {
        let root = ctx
            .directory
            .find_by_id(AccountId::new(3))
            .await
            .expect("lookup succeeds")
            .expect("account exists");
        assert!(root.is_superuser);
        assert_eq!(root.groups, vec!["SimpleUsers".to_owned()]);

        let missing = ctx
            .directory
            .find_by_id(AccountId::new(99))
            .await
            .expect("lookup succeeds");
        assert!(missing.is_none());

        let members = AccountRepository::list(
            ctx.directory.as_ref(),
            &Predicate::equals(AccountField::GroupName, "SimpleUsers"),
        )
        .await
        .expect("list succeeds");
        let usernames: Vec<_> = members.iter().map(|account| account.username.as_str()).collect();
        assert_eq!(usernames, ["user@example.com", "root@example.com"]);
    });
}

#[rstest]
fn alias_recipients_decide_the_alias_kind(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: alias_recipients_decide_the_alias_kind skipped");
        return;
    };
    ctx.runtime.block_on(async {
        let aliases = AliasRepository::list(
            ctx.directory.as_ref(),
            &Predicate::icontains(AliasField::DomainName, "example.com"),
        )
        .await
        .expect("list succeeds");
        let summary: Vec<_> = aliases
            .iter()
            .map(|alias| (alias.full_address(), alias.kind()))
            .collect();
        assert_eq!(
            summary,
            [
                ("user@example.com".to_owned(), AliasKind::Alias),
                ("forward@example.com".to_owned(), AliasKind::Forward),
                ("team@example.com".to_owned(), AliasKind::DistributionList),
            ]
        );
        let team = aliases.last().expect("team alias");
        assert_eq!(
            team.recipients,
            [
                AliasRecipient::Mailbox("admin@example.com".to_owned()),
                AliasRecipient::Alias("user@example.com".to_owned()),
            ]
        );
    });
}

#[rstest]
fn domains_match_on_their_alias_names(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: domains_match_on_their_alias_names skipped");
        return;
    };
    ctx.runtime.block_on(async {
        let predicate = Predicate::icontains(DomainField::Name, "example.net")
            | Predicate::icontains(DomainField::AliasName, "example.net");
        let domains = DomainRepository::list(ctx.domains.as_ref(), &predicate)
            .await
            .expect("list succeeds");
        assert_eq!(domains.len(), 1, "{domains:?}");
        let domain = domains.first().expect("one domain");
        assert_eq!(domain.name, "example.com");
        assert_eq!(domain.quota, 100);
        assert_eq!(domain.aliases, ["alias-b.example", "example.net"]);
    });
}

#[rstest]
fn relay_domains_filter_by_service(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: relay_domains_filter_by_service skipped");
        return;
    };
    ctx.runtime.block_on(async {
        let relays = RelayDomainRepository::list(
            ctx.domains.as_ref(),
            &Predicate::equals(RelayDomainField::Service, "smtp"),
        )
        .await
        .expect("list succeeds");
        let names: Vec<_> = relays.iter().map(|relay| relay.name.as_str()).collect();
        assert_eq!(names, ["smtp.example.com"]);
    });
}

#[rstest]
fn mailboxes_are_listed_per_owner(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: mailboxes_are_listed_per_owner skipped");
        return;
    };
    ctx.runtime.block_on(async {
        let owner = AccountId::new(1);
        let count = ctx
            .directory
            .count_for_account(owner)
            .await
            .expect("count succeeds");
        assert_eq!(count, 2);
        let mailboxes = ctx
            .directory
            .list_for_account(owner)
            .await
            .expect("list succeeds");
        let addresses: Vec<_> = mailboxes.iter().map(|mailbox| mailbox.full_address()).collect();
        assert_eq!(addresses, ["admin@example.com", "billing@example.com"]);
        assert_eq!(
            ctx.directory
                .count_for_account(AccountId::new(4))
                .await
                .expect("count succeeds"),
            0
        );
    });
}

#[rstest]
fn parameters_are_looked_up_by_namespace(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: parameters_are_looked_up_by_namespace skipped");
        return;
    };
    ctx.runtime.block_on(async {
        let core = ctx
            .parameters
            .get("core", "ITEMS_PER_PAGE")
            .await
            .expect("lookup succeeds");
        assert_eq!(core.as_deref(), Some("15"));
        let admin = ctx
            .parameters
            .get("admin", "ITEMS_PER_PAGE")
            .await
            .expect("lookup succeeds");
        assert!(admin.is_none());
    });
}

#[rstest]
#[case(Some("user@example.com"), None, &[
    (IdentityKind::Account, "user@example.com"),
    (IdentityKind::Alias, "user@example.com"),
])]
#[case(Some("@example"), Some("forward"), &[
    (IdentityKind::Forward, "forward@example.com"),
])]
#[case(None, Some("dlist"), &[(IdentityKind::DistributionList, "team@example.com")])]
fn identity_listing_runs_against_postgres(
    diesel_world: Option<TestContext>,
    #[case] search: Option<&str>,
    #[case] idtfilter: Option<&str>,
    #[case] expected: &[(IdentityKind, &str)],
) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: identity_listing_runs_against_postgres skipped");
        return;
    };
    let service = IdentityListingService::new(
        Arc::clone(&ctx.directory),
        Arc::clone(&ctx.directory),
        Arc::clone(&ctx.directory),
    );
    let query = IdentityListingQuery::from_raw(search, idtfilter, None);
    let identities = ctx
        .runtime
        .block_on(service.list(&domain_admin(), &query))
        .expect("listing succeeds");
    let listed: Vec<_> = identities
        .map(|identity| {
            let view = identity.view();
            (view.kind, view.identity)
        })
        .collect();
    let expected: Vec<_> = expected
        .iter()
        .map(|(kind, identity)| (*kind, (*identity).to_owned()))
        .collect();
    assert_eq!(listed, expected);
}

#[rstest]
fn domain_listing_includes_granted_relay_domains(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: domain_listing_includes_granted_relay_domains skipped");
        return;
    };
    let hooks = ExtraDomainEntriesRegistry::new().with_hook(
        RELAY_DOMAINS_HOOK,
        Arc::new(RelayDomainEntries::new(
            Arc::clone(&ctx.directory),
            Arc::clone(&ctx.domains),
        )),
    );
    let service = DomainListingService::new(
        Arc::clone(&ctx.directory),
        Arc::clone(&ctx.domains),
        Arc::new(hooks),
    );
    let query = DomainListingQuery::from_raw(None, Some("example"), BTreeMap::new());
    let entries = ctx
        .runtime
        .block_on(service.list(&domain_admin(), &query))
        .expect("listing succeeds");
    let listed: Vec<_> = entries
        .map(|entry| (entry.kind().to_owned(), entry.name().to_owned()))
        .collect();
    assert_eq!(
        listed,
        [
            ("domain".to_owned(), "example.com".to_owned()),
            ("relaydomain".to_owned(), "relay.example.com".to_owned()),
        ]
    );
}
