//! Page-number validation and page envelopes.

use std::num::NonZeroUsize;
use std::ops::Range;

use serde::Serialize;

/// Reasons a page number cannot be served as requested.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    /// The raw value is not a base-10 integer.
    #[error("page number `{raw}` is not an integer")]
    NotAnInteger {
        /// The rejected input.
        raw: String,
    },
    /// The value is zero or negative.
    #[error("page number {number} is less than 1")]
    LessThanOne {
        /// The rejected number.
        number: i64,
    },
    /// The value points past the last page.
    #[error("page {number} is beyond the last page ({num_pages})")]
    OutOfRange {
        /// The rejected number.
        number: usize,
        /// Number of pages available.
        num_pages: usize,
    },
}

/// Half-open item range selected for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    number: usize,
    start: usize,
    end: usize,
}

impl PageWindow {
    /// One-based page number of the window.
    #[must_use]
    pub const fn number(&self) -> usize {
        self.number
    }

    /// Item offsets covered by the window.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of items in the window.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the window holds no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits `count` items into pages of `per_page`.
///
/// An empty listing still has one (empty) page so the first page is always
/// addressable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    count: usize,
    per_page: NonZeroUsize,
}

impl Paginator {
    /// Describe a listing of `count` items.
    #[must_use]
    pub const fn new(count: usize, per_page: NonZeroUsize) -> Self {
        Self { count, per_page }
    }

    /// Total number of items.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Maximum number of items per page.
    #[must_use]
    pub const fn per_page(&self) -> NonZeroUsize {
        self.per_page
    }

    /// Number of pages, never less than one.
    #[must_use]
    pub const fn num_pages(&self) -> usize {
        if self.count == 0 {
            1
        } else {
            self.count.div_ceil(self.per_page.get())
        }
    }

    /// Parse and range-check a raw page number.
    ///
    /// Surrounding whitespace and a leading `+` are accepted.
    ///
    /// # Errors
    /// Returns [`PageError`] when the value is not an integer, is below one,
    /// or exceeds [`Paginator::num_pages`].
    pub fn validate_number(&self, raw: &str) -> Result<usize, PageError> {
        let trimmed = raw.trim();
        let number: i64 = trimmed.parse().map_err(|_| PageError::NotAnInteger {
            raw: raw.to_owned(),
        })?;
        if number < 1 {
            return Err(PageError::LessThanOne { number });
        }
        let number = usize::try_from(number).map_err(|_| PageError::OutOfRange {
            number: usize::MAX,
            num_pages: self.num_pages(),
        })?;
        self.check_range(number)
    }

    /// Select the window for a validated page number.
    ///
    /// # Errors
    /// Returns [`PageError`] when `number` is zero or past the last page.
    pub fn page(&self, number: usize) -> Result<PageWindow, PageError> {
        if number == 0 {
            return Err(PageError::LessThanOne { number: 0 });
        }
        self.check_range(number).map(|valid| self.window(valid))
    }

    /// Window of the last page.
    #[must_use]
    pub fn last_page(&self) -> PageWindow {
        self.window(self.num_pages())
    }

    /// Resolve a client-supplied page number leniently.
    ///
    /// A missing value selects the first page. Any value that fails
    /// [`Paginator::validate_number`] selects the last page instead of
    /// failing.
    ///
    /// # Examples
    /// ```
    /// use std::num::NonZeroUsize;
    ///
    /// use pagination::Paginator;
    ///
    /// let paginator = Paginator::new(25, NonZeroUsize::new(10).expect("non-zero"));
    /// assert_eq!(paginator.page_or_last(None).number(), 1);
    /// assert_eq!(paginator.page_or_last(Some("2")).number(), 2);
    /// assert_eq!(paginator.page_or_last(Some("abc")).number(), 3);
    /// assert_eq!(paginator.page_or_last(Some("0")).number(), 3);
    /// ```
    #[must_use]
    pub fn page_or_last(&self, raw: Option<&str>) -> PageWindow {
        let Some(raw) = raw else {
            return self.window(1);
        };
        match self.validate_number(raw) {
            Ok(number) => self.window(number),
            Err(_) => self.last_page(),
        }
    }

    const fn check_range(&self, number: usize) -> Result<usize, PageError> {
        let num_pages = self.num_pages();
        if number > num_pages {
            return Err(PageError::OutOfRange { number, num_pages });
        }
        Ok(number)
    }

    fn window(&self, number: usize) -> PageWindow {
        let per_page = self.per_page.get();
        let start = number.saturating_sub(1).saturating_mul(per_page).min(self.count);
        let end = start.saturating_add(per_page).min(self.count);
        PageWindow { number, start, end }
    }
}

/// One page of a listing together with its position in the whole.
///
/// Serialises as `{"items": [...], "number": 2, "perPage": 10, "count": 25,
/// "numPages": 3}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    number: usize,
    per_page: usize,
    count: usize,
    num_pages: usize,
}

impl<T> Page<T> {
    /// Materialise `items` and cut out the page selected by `raw_page`.
    ///
    /// The page number is resolved with [`Paginator::page_or_last`].
    #[must_use]
    pub fn paginate<I>(items: I, per_page: NonZeroUsize, raw_page: Option<&str>) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut all: Vec<T> = items.into_iter().collect();
        let paginator = Paginator::new(all.len(), per_page);
        let window = paginator.page_or_last(raw_page);
        let items = all.drain(window.range()).collect();
        Self {
            items,
            number: window.number(),
            per_page: per_page.get(),
            count: paginator.count(),
            num_pages: paginator.num_pages(),
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, keeping only its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// One-based page number.
    #[must_use]
    pub const fn number(&self) -> usize {
        self.number
    }

    /// Configured page size.
    #[must_use]
    pub const fn per_page(&self) -> usize {
        self.per_page
    }

    /// Total number of items across all pages.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Total number of pages.
    #[must_use]
    pub const fn num_pages(&self) -> usize {
        self.num_pages
    }

    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Number of the following page, if any.
    #[must_use]
    pub const fn next_page_number(&self) -> Option<usize> {
        if self.has_next() {
            Some(self.number + 1)
        } else {
            None
        }
    }

    /// Number of the preceding page, if any.
    #[must_use]
    pub const fn previous_page_number(&self) -> Option<usize> {
        if self.has_previous() {
            Some(self.number - 1)
        } else {
            None
        }
    }

    /// One-based index of the first item on the page, or 0 when empty.
    #[must_use]
    pub const fn start_index(&self) -> usize {
        if self.count == 0 {
            0
        } else {
            (self.number - 1) * self.per_page + 1
        }
    }

    /// One-based index of the last item on the page, or 0 when empty.
    #[must_use]
    pub const fn end_index(&self) -> usize {
        if self.number == self.num_pages {
            self.count
        } else {
            self.number * self.per_page
        }
    }

    /// Transform every item while keeping the page position.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            per_page: self.per_page,
            count: self.count,
            num_pages: self.num_pages,
        }
    }
}
