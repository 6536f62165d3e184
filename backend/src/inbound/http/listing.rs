//! Helpers shared by the listing endpoints.

use std::cmp::Ordering;

use pagination::{Page, SortOrder};

/// A page together with the sort order that produced it.
#[derive(Debug)]
pub struct ListingPage<T> {
    pub page: Page<T>,
    pub sort_order: SortOrder,
}

impl<T> ListingPage<T> {
    pub fn new(page: Page<T>, sort_order: SortOrder) -> Self {
        Self { page, sort_order }
    }
}

/// Case-insensitive comparison, falling back to the exact text so the
/// order is total.
pub fn compare_text(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}
