//! HTTP inbound adapter exposing the listing endpoints.

pub mod auth;
pub mod domains;
pub mod error;
pub mod health;
pub mod identities;
pub mod listing;
pub mod mailboxes;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

use actix_web::web;

/// Register the `/api/v1` listing endpoints on a scope or app.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use mailadmin::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(identities::list_identities)
        .service(domains::list_domains)
        .service(mailboxes::list_mailboxes);
}
