//! Mailboxes of the session's account.

use actix_web::{get, web};

use crate::domain::{Error, MailboxView};

use super::ApiResult;
use super::auth::MailboxOwner;
use super::state::HttpState;

/// List the mailboxes owned by the session's account.
///
/// Accounts without a mailbox are refused with `403 no_mailbox` before the
/// handler runs.
#[utoipa::path(
    get,
    path = "/api/v1/mailboxes",
    responses(
        (status = 200, description = "Mailboxes", body = [MailboxView]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "The account owns no mailbox", body = Error),
        (status = 503, description = "Directory unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["mailboxes"],
    operation_id = "listMailboxes"
)]
#[get("/mailboxes")]
pub async fn list_mailboxes(
    state: web::Data<HttpState>,
    owner: MailboxOwner,
) -> ApiResult<web::Json<Vec<MailboxView>>> {
    let mailboxes = state.mailboxes.list_for_account(owner.id).await?;
    Ok(web::Json(mailboxes.iter().map(MailboxView::from).collect()))
}

#[cfg(test)]
#[path = "mailboxes_tests.rs"]
mod tests;
