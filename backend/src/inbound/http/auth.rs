//! Principal extraction.
//!
//! Handlers take a [`Principal`] (any authenticated account) or a
//! [`MailboxOwner`] (an authenticated account owning at least one mailbox)
//! as arguments; both resolve the account named by the session cookie.

use std::ops::Deref;

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::ports::AccountRepository;
use crate::domain::{Account, AccountId, Error};

use super::ApiResult;
use super::session::SessionContext;
use super::state::HttpState;

/// Load the account behind a session id.
///
/// Unknown and deactivated accounts are reported as `401 Unauthorized`, the
/// same as a missing session.
pub async fn resolve_principal<A>(accounts: &A, id: AccountId) -> ApiResult<Account>
where
    A: AccountRepository + ?Sized,
{
    match accounts.find_by_id(id).await? {
        Some(account) if account.is_active => Ok(account),
        Some(_) => {
            debug!(account = %id, "session names a deactivated account");
            Err(Error::unauthorized("login required"))
        }
        None => {
            debug!(account = %id, "session names an unknown account");
            Err(Error::unauthorized("login required"))
        }
    }
}

fn http_state(req: &HttpRequest) -> ApiResult<web::Data<HttpState>> {
    req.app_data::<web::Data<HttpState>>()
        .cloned()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))
}

async fn principal_from_request(
    state: ApiResult<web::Data<HttpState>>,
    session: Result<SessionContext, actix_web::Error>,
) -> ApiResult<(web::Data<HttpState>, Account)> {
    let state = state?;
    let id = session?.require_account_id()?;
    let account = resolve_principal(state.accounts.as_ref(), id).await?;
    Ok((state, account))
}

/// The authenticated account making the request.
#[derive(Debug, Clone)]
pub struct Principal(pub Account);

impl Principal {
    pub fn into_inner(self) -> Account {
        self.0
    }
}

impl Deref for Principal {
    type Target = Account;

    fn deref(&self) -> &Account {
        &self.0
    }
}

impl FromRequest for Principal {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let state = http_state(req);
        let session = SessionContext::from_request(req, payload);
        Box::pin(async move {
            let (_, account) = principal_from_request(state, session.await).await?;
            Ok(Principal(account))
        })
    }
}

/// An authenticated account that owns at least one mailbox.
///
/// Extraction fails with `403 no_mailbox` before the handler runs when the
/// account owns none.
#[derive(Debug, Clone)]
pub struct MailboxOwner(pub Account);

impl Deref for MailboxOwner {
    type Target = Account;

    fn deref(&self) -> &Account {
        &self.0
    }
}

impl FromRequest for MailboxOwner {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let state = http_state(req);
        let session = SessionContext::from_request(req, payload);
        Box::pin(async move {
            let (state, account) = principal_from_request(state, session.await).await?;
            state.mailbox_guard.require_mailbox(&account).await?;
            Ok(MailboxOwner(account))
        })
    }
}
