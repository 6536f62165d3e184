//! Cuts listings into pages sized by the `core.ITEMS_PER_PAGE` parameter.

use std::num::NonZeroUsize;
use std::sync::Arc;

use pagination::Page;
use tracing::warn;

use crate::domain::Error;
use crate::domain::ports::ParameterStore;

/// Namespace of the page size parameter.
pub const ITEMS_PER_PAGE_NAMESPACE: &str = "core";
/// Name of the page size parameter.
pub const ITEMS_PER_PAGE: &str = "ITEMS_PER_PAGE";
/// Page size used when the parameter is missing or unusable.
pub const DEFAULT_ITEMS_PER_PAGE: NonZeroUsize = match NonZeroUsize::new(30) {
    Some(value) => value,
    None => unreachable!(),
};

/// Builds listing pages, reading the page size on every call so changes to
/// the parameter apply to the next request.
pub struct ListingPager<P: ?Sized> {
    parameters: Arc<P>,
}

impl<P: ?Sized> Clone for ListingPager<P> {
    fn clone(&self) -> Self {
        Self {
            parameters: Arc::clone(&self.parameters),
        }
    }
}

impl<P: ?Sized> ListingPager<P> {
    pub fn new(parameters: Arc<P>) -> Self {
        Self { parameters }
    }
}

impl<P> ListingPager<P>
where
    P: ParameterStore + ?Sized,
{
    /// Current page size.
    pub async fn items_per_page(&self) -> Result<NonZeroUsize, Error> {
        let raw = self
            .parameters
            .get(ITEMS_PER_PAGE_NAMESPACE, ITEMS_PER_PAGE)
            .await?;
        let parsed = raw
            .as_deref()
            .and_then(|value| value.trim().parse::<NonZeroUsize>().ok());
        Ok(parsed.unwrap_or_else(|| {
            warn!(
                value = raw.as_deref().unwrap_or("<unset>"),
                fallback = DEFAULT_ITEMS_PER_PAGE.get(),
                "unusable {ITEMS_PER_PAGE_NAMESPACE}.{ITEMS_PER_PAGE}; using default"
            );
            DEFAULT_ITEMS_PER_PAGE
        }))
    }

    /// Materialise `items` and cut the page selected by `raw_page`.
    ///
    /// A missing page number selects page 1; anything unusable selects the
    /// last page.
    pub async fn page<I>(&self, items: I, raw_page: Option<&str>) -> Result<Page<I::Item>, Error>
    where
        I: IntoIterator,
    {
        let per_page = self.items_per_page().await?;
        Ok(Page::paginate(items, per_page, raw_page))
    }
}
