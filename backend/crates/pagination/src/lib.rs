//! Sort and page resolution for administration listings.
//!
//! Listing endpoints accept two loosely typed query parameters: a combined
//! sort token such as `-name` and a page number. Neither is ever rejected.
//! Malformed values are replaced by safe defaults so a stale bookmark or a
//! hand-edited URL still renders a listing:
//!
//! - [`SortOrder::resolve`] falls back to the default field (ascending) when
//!   the requested field is not allowed.
//! - [`Paginator::page_or_last`] clamps any invalid page number to the last
//!   page.
//!
//! # Examples
//! ```
//! use std::num::NonZeroUsize;
//!
//! use pagination::{Page, SortDirection, SortOrder};
//!
//! let order = SortOrder::resolve(Some("-name"), "name", Some(&["name", "type"]));
//! assert_eq!(order.field(), "name");
//! assert_eq!(order.direction(), SortDirection::Descending);
//!
//! let per_page = NonZeroUsize::new(2).expect("non-zero");
//! let page = Page::paginate(1..=5, per_page, Some("99"));
//! assert_eq!(page.number(), 3);
//! assert_eq!(page.items(), &[5]);
//! ```

mod page;
mod sort;

pub use page::{Page, PageError, PageWindow, Paginator};
pub use sort::{DESCENDING_MARKER, SortDirection, SortOrder};
