//! Identity listing endpoint.
//!
//! ```text
//! GET /api/v1/identities?searchquery=ann&idtfilter=account&sort_order=-identity&page=2
//! ```

use std::cmp::Ordering;

use actix_web::{get, web};
use pagination::SortOrder;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, IdentityListingQuery, IdentityView};

use super::ApiResult;
use super::auth::Principal;
use super::listing::{ListingPage, compare_text};
use super::state::HttpState;

/// Default sort field of the identity listing.
pub const DEFAULT_IDENTITY_SORT: &str = "identity";
/// Sort fields accepted by the identity listing.
pub const IDENTITY_SORT_FIELDS: &[&str] = &["identity", "name_or_rcpt", "tags"];

/// Query string of `GET /api/v1/identities`.
///
/// Every value is optional and malformed values are normalised rather than
/// rejected.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdentityListParams {
    /// Free-text search; `local@domain` narrows aliases on both parts.
    pub searchquery: Option<String>,
    /// `account`, `alias`, `forward` or `dlist`.
    pub idtfilter: Option<String>,
    /// `SuperAdmins` or a group name.
    pub grpfilter: Option<String>,
    /// Sort field, prefixed with `-` for descending order.
    pub sort_order: Option<String>,
    /// One-based page number.
    pub page: Option<String>,
}

/// One page of identities.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentityPage {
    pub items: Vec<IdentityView>,
    pub number: usize,
    pub per_page: usize,
    pub count: usize,
    pub num_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
    /// Sort token actually applied, e.g. `-identity`.
    #[schema(example = "identity")]
    pub sort_order: String,
}

impl From<ListingPage<IdentityView>> for IdentityPage {
    fn from(listing: ListingPage<IdentityView>) -> Self {
        let ListingPage { page, sort_order } = listing;
        Self {
            number: page.number(),
            per_page: page.per_page(),
            count: page.count(),
            num_pages: page.num_pages(),
            has_next: page.has_next(),
            has_previous: page.has_previous(),
            items: page.into_items(),
            sort_order: sort_order.as_token(),
        }
    }
}

fn compare(field: &str, left: &IdentityView, right: &IdentityView) -> Ordering {
    match field {
        "name_or_rcpt" => compare_text(&left.name_or_rcpt, &right.name_or_rcpt),
        "tags" => left
            .tags
            .iter()
            .map(|tag| tag.to_lowercase())
            .cmp(right.tags.iter().map(|tag| tag.to_lowercase())),
        _ => compare_text(&left.identity, &right.identity),
    }
}

/// Sort identity rows by `order`; ties keep the listing order.
pub fn sort_identities(rows: &mut [IdentityView], order: &SortOrder) {
    let direction = order.direction();
    rows.sort_by(|left, right| direction.apply(compare(order.field(), left, right)));
}

/// List the accounts and aliases the session's account administers.
#[utoipa::path(
    get,
    path = "/api/v1/identities",
    params(IdentityListParams),
    responses(
        (status = 200, description = "Identities", body = IdentityPage),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Directory unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["identities"],
    operation_id = "listIdentities"
)]
#[get("/identities")]
pub async fn list_identities(
    state: web::Data<HttpState>,
    principal: Principal,
    params: web::Query<IdentityListParams>,
) -> ApiResult<web::Json<IdentityPage>> {
    let params = params.into_inner();
    let order = SortOrder::resolve(
        params.sort_order.as_deref(),
        DEFAULT_IDENTITY_SORT,
        Some(IDENTITY_SORT_FIELDS),
    );
    let query = IdentityListingQuery::from_raw(
        params.searchquery.as_deref(),
        params.idtfilter.as_deref(),
        params.grpfilter.as_deref(),
    );
    let identities = state.identities.list(&principal, &query).await?;
    let mut rows: Vec<IdentityView> = identities.map(|identity| identity.view()).collect();
    sort_identities(&mut rows, &order);
    let page = state.pager.page(rows, params.page.as_deref()).await?;
    Ok(web::Json(IdentityPage::from(ListingPage::new(page, order))))
}

#[cfg(test)]
#[path = "identities_tests.rs"]
mod tests;
