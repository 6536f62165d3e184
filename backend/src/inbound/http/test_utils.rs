//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};

use crate::domain::{
    Account, AccountId, Alias, AliasRecipient, ContentKind, Domain, Error,
    ExtraDomainEntriesRegistry, Mailbox, RELAY_DOMAINS_HOOK, RelayDomain, RelayDomainEntries,
};
use crate::outbound::memory::{InMemoryDirectory, InMemoryParameterStore};

use super::configure_api;
use super::session::SessionContext;
use super::state::{HttpState, HttpStatePorts};

/// Session middleware with a fresh key, cookie `session` and no `Secure`
/// flag.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Domain administrator.
pub const ADMIN: i32 = 1;
/// Superuser owning a mailbox.
pub const ROOT: i32 = 3;
/// Account with neither grants nor mailboxes.
pub const NOBODY: i32 = 4;

/// Directory shared by the handler tests.
///
/// `ADMIN` administers `example.org`, the relay domain `relay.example.com`,
/// accounts 2 and 3, and the three aliases of `example.org`.
pub fn sample_directory() -> InMemoryDirectory {
    InMemoryDirectory::new()
        .with_account(Account::new(ADMIN, "admin@example.org").with_group("DomainAdmins"))
        .with_account(Account::new(2, "ann@example.org").with_name("Ann", "Arbor"))
        .with_account(Account::new(ROOT, "bob@example.org").with_name("Bob", "Root").superuser())
        .with_account(Account::new(NOBODY, "nobody@other.org"))
        .with_domain(Domain::new(1, "example.org").with_alias("example.net"))
        .with_domain(Domain::new(2, "other.org"))
        .with_relay_domain(RelayDomain::new(1, "relay.example.com", "mx.example.com", "relay"))
        .with_relay_domain(RelayDomain::new(2, "smtp.example.com", "mx.example.com", "smtp"))
        .with_alias(
            Alias::new(10, "info", 1, "example.org")
                .with_recipient(AliasRecipient::Mailbox("ann@example.org".into())),
        )
        .with_alias(
            Alias::new(11, "fwd", 1, "example.org")
                .with_recipient(AliasRecipient::External("ann@elsewhere.net".into())),
        )
        .with_alias(
            Alias::new(12, "team", 1, "example.org")
                .with_recipient(AliasRecipient::Mailbox("ann@example.org".into()))
                .with_recipient(AliasRecipient::Mailbox("bob@example.org".into())),
        )
        .with_mailbox(Mailbox::new(1, "admin", "example.org", ADMIN))
        .with_mailbox(Mailbox::new(2, "postmaster", "example.org", ADMIN))
        .with_mailbox(Mailbox::new(3, "bob", "example.org", ROOT))
        .with_grant(ADMIN, ContentKind::Account, 2)
        .with_grant(ADMIN, ContentKind::Account, ROOT)
        .with_grant(ADMIN, ContentKind::Alias, 10)
        .with_grant(ADMIN, ContentKind::Alias, 11)
        .with_grant(ADMIN, ContentKind::Alias, 12)
        .with_grant(ADMIN, ContentKind::Domain, 1)
        .with_grant(ADMIN, ContentKind::RelayDomain, 1)
}

/// HTTP state over an in-memory directory and parameter store, with the
/// relay domain hook registered.
pub fn memory_state(
    directory: InMemoryDirectory,
    parameters: InMemoryParameterStore,
) -> HttpState {
    let directory = Arc::new(directory);
    let parameters = Arc::new(parameters);
    let hooks = ExtraDomainEntriesRegistry::new().with_hook(
        RELAY_DOMAINS_HOOK,
        Arc::new(RelayDomainEntries::new(directory.clone(), directory.clone())),
    );
    HttpState::new(HttpStatePorts {
        grants: directory.clone(),
        accounts: directory.clone(),
        aliases: directory.clone(),
        domains: directory.clone(),
        mailboxes: directory,
        parameters,
        hooks,
    })
}

async fn test_login(session: SessionContext, id: web::Path<i32>) -> Result<HttpResponse, Error> {
    session.persist_account(AccountId::new(id.into_inner()))?;
    Ok(HttpResponse::Ok().finish())
}

/// App serving the listing API plus `GET /test-login/{id}`, which stores
/// `id` in the session the way an external login would.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .route("/test-login/{id}", web::get().to(test_login))
        .service(web::scope("/api/v1").configure(configure_api))
}

/// Log in as `account` and return the session cookie.
pub async fn login<S>(app: &S, account: i32) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::get()
            .uri(&format!("/test-login/{account}"))
            .to_request(),
    )
    .await;
    session_cookie(&response)
}

/// `GET uri` with the session cookie, decoding a JSON body.
pub async fn get_json<S>(
    app: &S,
    cookie: Option<Cookie<'static>>,
    uri: &str,
) -> (actix_web::http::StatusCode, serde_json::Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut request = test::TestRequest::get().uri(uri);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie);
    }
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}
