//! Combined sort-token parsing.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Leading character marking a descending sort token, e.g. `-name`.
pub const DESCENDING_MARKER: char = '-';

/// Direction component of a [`SortOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest key first.
    #[default]
    Ascending,
    /// Largest key first.
    Descending,
}

impl SortDirection {
    /// Whether the direction reverses the natural key order.
    #[must_use]
    pub const fn is_descending(self) -> bool {
        matches!(self, Self::Descending)
    }

    /// Token prefix for the direction: `-` when descending, empty otherwise.
    #[must_use]
    pub const fn as_prefix(self) -> &'static str {
        match self {
            Self::Ascending => "",
            Self::Descending => "-",
        }
    }

    /// Orient a natural-order comparison result.
    ///
    /// # Examples
    /// ```
    /// use std::cmp::Ordering;
    ///
    /// use pagination::SortDirection;
    ///
    /// assert_eq!(SortDirection::Descending.apply(Ordering::Less), Ordering::Greater);
    /// assert_eq!(SortDirection::Ascending.apply(Ordering::Less), Ordering::Less);
    /// ```
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// A sort field paired with its direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortOrder {
    field: String,
    direction: SortDirection,
}

impl SortOrder {
    /// Build a sort order from its parts.
    #[must_use]
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Split a combined token into field and direction.
    ///
    /// Only a single leading [`DESCENDING_MARKER`] is stripped; the remainder
    /// is taken verbatim as the field name.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token.strip_prefix(DESCENDING_MARKER) {
            Some(field) => Self::new(field, SortDirection::Descending),
            None => Self::new(token, SortDirection::Ascending),
        }
    }

    /// Resolve a client-supplied sort token.
    ///
    /// A missing or empty `raw` token resolves `default` instead. When
    /// `allowed` is provided and the parsed field is not listed, the result
    /// is `default` verbatim with [`SortDirection::Ascending`], whatever
    /// direction the client asked for. This never fails.
    ///
    /// # Examples
    /// ```
    /// use pagination::{SortDirection, SortOrder};
    ///
    /// let order = SortOrder::resolve(Some("-password"), "name", Some(&["name"]));
    /// assert_eq!(order, SortOrder::new("name", SortDirection::Ascending));
    /// ```
    #[must_use]
    pub fn resolve(raw: Option<&str>, default: &str, allowed: Option<&[&str]>) -> Self {
        let token = raw.filter(|token| !token.is_empty()).unwrap_or(default);
        let parsed = Self::parse(token);
        match allowed {
            Some(allowed) if !allowed.contains(&parsed.field.as_str()) => {
                Self::new(default, SortDirection::Ascending)
            }
            _ => parsed,
        }
    }

    /// Field component of the order.
    #[must_use]
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Direction component of the order.
    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Render the order back into a combined token such as `-name`.
    #[must_use]
    pub fn as_token(&self) -> String {
        format!("{}{}", self.direction.as_prefix(), self.field)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.direction.as_prefix(), self.field)
    }
}

#[cfg(test)]
mod tests {
    //! Sort token resolution rules.

    use super::*;
    use rstest::rstest;

    const ALLOWED: &[&str] = &["name", "type"];

    #[rstest]
    #[case("name", "name", SortDirection::Ascending)]
    #[case("-name", "name", SortDirection::Descending)]
    #[case("--name", "-name", SortDirection::Descending)]
    #[case("-", "", SortDirection::Descending)]
    #[case("name-", "name-", SortDirection::Ascending)]
    fn parse_strips_a_single_leading_marker(
        #[case] token: &str,
        #[case] field: &str,
        #[case] direction: SortDirection,
    ) {
        let order = SortOrder::parse(token);
        assert_eq!(order.field(), field);
        assert_eq!(order.direction(), direction);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    fn missing_or_empty_token_resolves_default(#[case] raw: Option<&str>) {
        let order = SortOrder::resolve(raw, "-name", None);
        assert_eq!(order, SortOrder::new("name", SortDirection::Descending));
    }

    #[rstest]
    #[case("type", "type", SortDirection::Ascending)]
    #[case("-type", "type", SortDirection::Descending)]
    fn allowed_fields_keep_their_direction(
        #[case] token: &str,
        #[case] field: &str,
        #[case] direction: SortDirection,
    ) {
        let order = SortOrder::resolve(Some(token), "name", Some(ALLOWED));
        assert_eq!(order, SortOrder::new(field, direction));
    }

    #[rstest]
    #[case("password")]
    #[case("-password")]
    #[case("-")]
    #[case("NAME")]
    fn disallowed_fields_fall_back_to_ascending_default(#[case] token: &str) {
        let order = SortOrder::resolve(Some(token), "name", Some(ALLOWED));
        assert_eq!(order, SortOrder::new("name", SortDirection::Ascending));
    }

    #[rstest]
    fn empty_allow_list_always_falls_back() {
        let order = SortOrder::resolve(Some("-name"), "name", Some(&[]));
        assert_eq!(order, SortOrder::new("name", SortDirection::Ascending));
    }

    #[rstest]
    fn fallback_uses_default_verbatim() {
        let order = SortOrder::resolve(Some("bogus"), "-name", Some(ALLOWED));
        assert_eq!(order.field(), "-name");
        assert_eq!(order.direction(), SortDirection::Ascending);
    }

    #[rstest]
    #[case(SortOrder::new("name", SortDirection::Ascending), "name")]
    #[case(SortOrder::new("name", SortDirection::Descending), "-name")]
    fn token_round_trips_through_display(#[case] order: SortOrder, #[case] token: &str) {
        assert_eq!(order.as_token(), token);
        assert_eq!(order.to_string(), token);
        assert_eq!(SortOrder::parse(token), order);
    }

    #[rstest]
    fn descending_reverses_comparisons() {
        let mut values = vec!["b", "c", "a"];
        values.sort_by(|a, b| SortDirection::Descending.apply(a.cmp(b)));
        assert_eq!(values, vec!["c", "b", "a"]);
    }
}
