//! OpenAPI documentation.
//!
//! [`ApiDoc`] collects the listing endpoints, the health probes and the
//! payload schemas. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    DomainEntryView, Error, ErrorCode, IdentityKind, IdentityView, MailboxView,
};
use crate::inbound::http::domains::DomainPage;
use crate::inbound::http::identities::IdentityPage;

/// Registers the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie carrying the authenticated account id.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Mail administration listing API",
        description = "Access-scoped, paginated listings of identities, domains and mailboxes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::identities::list_identities,
        crate::inbound::http::domains::list_domains,
        crate::inbound::http::mailboxes::list_mailboxes,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        IdentityPage,
        IdentityView,
        IdentityKind,
        DomainPage,
        DomainEntryView,
        MailboxView,
        Error,
        ErrorCode
    )),
    tags(
        (name = "identities", description = "Accounts and aliases"),
        (name = "domains", description = "Domains and contributed domain entries"),
        (name = "mailboxes", description = "Mailboxes of the session's account"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
