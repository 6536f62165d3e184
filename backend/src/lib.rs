//! Access-scoped, paginated listings for a mail administration panel.
//!
//! The [`domain`] holds the listing services, the mailbox guard and the ports
//! they depend on; [`outbound`] implements those ports in memory and on
//! PostgreSQL; [`inbound`] exposes the listings over HTTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
