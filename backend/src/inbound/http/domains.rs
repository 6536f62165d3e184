//! Domain listing endpoint.
//!
//! ```text
//! GET /api/v1/domains?domfilter=relaydomain&srvfilter=relay&sort_order=-name
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;

use actix_web::{get, web};
use pagination::SortOrder;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DomainEntryView, DomainListingQuery, Error};

use super::ApiResult;
use super::auth::Principal;
use super::listing::{ListingPage, compare_text};
use super::state::HttpState;

/// Default sort field of the domain listing.
pub const DEFAULT_DOMAIN_SORT: &str = "name";
/// Sort fields accepted by the domain listing.
pub const DOMAIN_SORT_FIELDS: &[&str] = &["name", "type"];

const DOMFILTER: &str = "domfilter";
const SEARCHQUERY: &str = "searchquery";
const SORT_ORDER: &str = "sort_order";
const PAGE: &str = "page";

/// Query string of `GET /api/v1/domains`, split into the keys the listing
/// understands and the extra filters forwarded to hooks.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DomainListParams {
    pub domfilter: Option<String>,
    pub searchquery: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl From<BTreeMap<String, String>> for DomainListParams {
    fn from(mut raw: BTreeMap<String, String>) -> Self {
        Self {
            domfilter: raw.remove(DOMFILTER),
            searchquery: raw.remove(SEARCHQUERY),
            sort_order: raw.remove(SORT_ORDER),
            page: raw.remove(PAGE),
            extra: raw,
        }
    }
}

/// One page of domain entries.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DomainPage {
    pub items: Vec<DomainEntryView>,
    pub number: usize,
    pub per_page: usize,
    pub count: usize,
    pub num_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
    /// Sort token actually applied, e.g. `-name`.
    #[schema(example = "name")]
    pub sort_order: String,
}

impl From<ListingPage<DomainEntryView>> for DomainPage {
    fn from(listing: ListingPage<DomainEntryView>) -> Self {
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

fn compare(field: &str, left: &DomainEntryView, right: &DomainEntryView) -> Ordering {
    match field {
        "type" => compare_text(&left.kind, &right.kind),
        _ => compare_text(&left.name, &right.name),
    }
}

/// Sort domain rows by `order`; ties keep the listing order.
pub fn sort_domains(rows: &mut [DomainEntryView], order: &SortOrder) {
    let direction = order.direction();
    rows.sort_by(|left, right| direction.apply(compare(order.field(), left, right)));
}

/// List the domains the session's account administers, followed by the
/// entries contributed by extension hooks.
///
/// Query keys other than the documented ones are forwarded to the hooks as
/// extra filters; the relay domain hook reads `srvfilter`.
#[utoipa::path(
    get,
    path = "/api/v1/domains",
    params(
        ("domfilter" = Option<String>, Query, description = "`domain`, `relaydomain` or another entry type"),
        ("searchquery" = Option<String>, Query, description = "Substring of the domain or domain alias name"),
        ("srvfilter" = Option<String>, Query, description = "Relay domain service name"),
        ("sort_order" = Option<String>, Query, description = "`name` or `type`, prefixed with `-` for descending order"),
        ("page" = Option<String>, Query, description = "One-based page number")
    ),
    responses(
        (status = 200, description = "Domains", body = DomainPage),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Directory unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["domains"],
    operation_id = "listDomains"
)]
#[get("/domains")]
pub async fn list_domains(
    state: web::Data<HttpState>,
    principal: Principal,
    raw: web::Query<BTreeMap<String, String>>,
) -> ApiResult<web::Json<DomainPage>> {
    let params = DomainListParams::from(raw.into_inner());
    let order = SortOrder::resolve(
        params.sort_order.as_deref(),
        DEFAULT_DOMAIN_SORT,
        Some(DOMAIN_SORT_FIELDS),
    );
    let query = DomainListingQuery::from_raw(
        params.domfilter.as_deref(),
        params.searchquery.as_deref(),
        params.extra,
    );
    let entries = state.domains.list(&principal, &query).await?;
    let mut rows: Vec<DomainEntryView> = entries.map(|entry| entry.view()).collect();
    sort_domains(&mut rows, &order);
    let page = state.pager.page(rows, params.page.as_deref()).await?;
    Ok(web::Json(DomainPage::from(ListingPage::new(page, order))))
}

#[cfg(test)]
#[path = "domains_tests.rs"]
mod tests;
