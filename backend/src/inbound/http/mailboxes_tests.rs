//! Handler tests for `GET /api/v1/mailboxes`.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;

use crate::inbound::http::test_utils::{
    ADMIN, NOBODY, get_json, login, memory_state, sample_directory, test_app,
};
use crate::outbound::memory::InMemoryParameterStore;

async fn list_as(account: Option<i32>) -> (StatusCode, serde_json::Value) {
    let state = memory_state(sample_directory(), InMemoryParameterStore::new());
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = match account {
        Some(account) => Some(login(&app, account).await),
        None => None,
    };
    get_json(&app, cookie, "/api/v1/mailboxes").await
}

#[rstest]
#[actix_web::test]
async fn owners_get_their_addresses() {
    let (status, body) = list_as(Some(ADMIN)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!([
            {"id": 1, "address": "admin@example.org"},
            {"id": 2, "address": "postmaster@example.org"},
        ])
    );
}

#[rstest]
#[actix_web::test]
async fn accounts_without_mailboxes_are_refused() {
    let (status, body) = list_as(Some(NOBODY)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "no_mailbox");
}

#[rstest]
#[actix_web::test]
async fn anonymous_requests_are_unauthorised() {
    let (status, _) = list_as(None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
