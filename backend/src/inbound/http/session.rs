//! Session helpers so handlers deal with account ids, not cookie plumbing.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{AccountId, Error};

pub(crate) const ACCOUNT_ID_KEY: &str = "account_id";

/// Newtype wrapper exposing account-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record the authenticated account in the session cookie.
    ///
    /// Login itself lives outside this service; the method exists for the
    /// component that performs it and for tests.
    pub fn persist_account(&self, account: AccountId) -> Result<(), Error> {
        self.0
            .insert(ACCOUNT_ID_KEY, account.get())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Account id stored in the session, if any.
    ///
    /// A value that does not decode as an id is treated as absent.
    pub fn account_id(&self) -> Option<AccountId> {
        match self.0.get::<i32>(ACCOUNT_ID_KEY) {
            Ok(id) => id.map(AccountId::new),
            Err(error) => {
                warn!(%error, "invalid account id in session cookie");
                None
            }
        }
    }

    /// Require an account id or return `401 Unauthorized`.
    pub fn require_account_id(&self) -> Result<AccountId, Error> {
        self.account_id()
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
