//! Filters accepted by the identity and domain listings.
//!
//! Raw values come straight from query strings. Parsing never fails: empty or
//! unknown values mean "no filter" and are logged at debug level.

use std::collections::BTreeMap;

use tracing::debug;

use super::AliasKind;
use super::account::SUPER_ADMINS_GROUP;

/// Restricts the identity listing to one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityTypeFilter {
    Account,
    Alias,
    Forward,
    DistributionList,
}

impl IdentityTypeFilter {
    /// Lenient parse of `idtfilter`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mailadmin::domain::IdentityTypeFilter;
    /// assert_eq!(IdentityTypeFilter::parse(Some("dlist")), Some(IdentityTypeFilter::DistributionList));
    /// assert_eq!(IdentityTypeFilter::parse(Some("")), None);
    /// assert_eq!(IdentityTypeFilter::parse(Some("mailbox")), None);
    /// ```
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw.map(str::trim).filter(|value| !value.is_empty())?;
        match raw {
            "account" => Some(Self::Account),
            "alias" => Some(Self::Alias),
            "forward" => Some(Self::Forward),
            "dlist" => Some(Self::DistributionList),
            other => {
                debug!(idtfilter = other, "ignoring unknown identity type filter");
                None
            }
        }
    }

    /// Alias kind selected by the filter; `None` for [`Self::Account`].
    pub fn alias_kind(self) -> Option<AliasKind> {
        match self {
            Self::Account => None,
            Self::Alias => Some(AliasKind::Alias),
            Self::Forward => Some(AliasKind::Forward),
            Self::DistributionList => Some(AliasKind::DistributionList),
        }
    }
}

/// Restricts the account branch of the identity listing to one group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupFilter {
    /// Superusers, whatever their stored groups.
    SuperAdmins,
    /// Members of the named group.
    Named(String),
}

impl GroupFilter {
    /// Lenient parse of `grpfilter`.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw.map(str::trim) {
            None => None,
            Some("") => {
                debug!("ignoring empty group filter");
                None
            }
            Some(SUPER_ADMINS_GROUP) => Some(Self::SuperAdmins),
            Some(name) => Some(Self::Named(name.to_owned())),
        }
    }
}

/// Parameters of the identity listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityListingQuery {
    /// Free text from `searchquery`. An `@` switches alias matching to
    /// local part and domain.
    pub search: Option<String>,
    /// Parsed `idtfilter`.
    pub identity_type: Option<IdentityTypeFilter>,
    /// Parsed `grpfilter`; only narrows the account branch.
    pub group: Option<GroupFilter>,
}

impl IdentityListingQuery {
    /// Build from raw query-string values.
    pub fn from_raw(search: Option<&str>, idtfilter: Option<&str>, grpfilter: Option<&str>) -> Self {
        Self {
            search: normalise_search(search),
            identity_type: IdentityTypeFilter::parse(idtfilter),
            group: GroupFilter::parse(grpfilter),
        }
    }
}

/// Parameters of the domain listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainListingQuery {
    /// `domain`, `relaydomain`, or another hook's kind label.
    pub domain_filter: Option<String>,
    /// Free text matched against domain and domain alias names.
    pub search: Option<String>,
    /// Query keys the listing itself does not understand, forwarded to hooks.
    pub extra_filters: BTreeMap<String, String>,
}

impl DomainListingQuery {
    /// Build from raw query-string values and the leftover query keys.
    pub fn from_raw(
        domain_filter: Option<&str>,
        search: Option<&str>,
        extra_filters: BTreeMap<String, String>,
    ) -> Self {
        Self {
            domain_filter: domain_filter
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned),
            search: normalise_search(search),
            extra_filters,
        }
    }

    /// True when own domains are part of the listing.
    pub fn includes_domains(&self) -> bool {
        self.domain_filter
            .as_deref()
            .is_none_or(|filter| filter == super::mail_domain::DOMAIN_KIND)
    }

    /// Non-empty extra filter value.
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extra_filters
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Blank searches are no search; anything else is kept verbatim.
fn normalise_search(raw: Option<&str>) -> Option<String> {
    raw.filter(|value| !value.trim().is_empty())
        .map(str::to_owned)
}

/// Split an address at its last `@` into local part and domain.
///
/// Without an `@` the whole input is the local part.
///
/// # Examples
///
/// ```
/// # use mailadmin::domain::split_mailbox;
/// assert_eq!(split_mailbox("ann@example.org"), ("ann", "example.org"));
/// assert_eq!(split_mailbox("@example.org"), ("", "example.org"));
/// assert_eq!(split_mailbox("ann"), ("ann", ""));
/// ```
pub fn split_mailbox(address: &str) -> (&str, &str) {
    address.rsplit_once('@').unwrap_or((address, ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None)]
    #[case(Some("  "), None)]
    #[case(Some("account"), Some(IdentityTypeFilter::Account))]
    #[case(Some("alias"), Some(IdentityTypeFilter::Alias))]
    #[case(Some("forward"), Some(IdentityTypeFilter::Forward))]
    #[case(Some("dlist"), Some(IdentityTypeFilter::DistributionList))]
    #[case(Some("Account"), None)]
    fn identity_type_parsing(
        #[case] raw: Option<&str>,
        #[case] expected: Option<IdentityTypeFilter>,
    ) {
        assert_eq!(IdentityTypeFilter::parse(raw), expected);
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("SuperAdmins"), Some(GroupFilter::SuperAdmins))]
    #[case(Some("Resellers"), Some(GroupFilter::Named("Resellers".into())))]
    fn group_parsing(#[case] raw: Option<&str>, #[case] expected: Option<GroupFilter>) {
        assert_eq!(GroupFilter::parse(raw), expected);
    }

    #[rstest]
    #[case("a@b@c.org", ("a@b", "c.org"))]
    #[case("ann@", ("ann", ""))]
    #[case("@", ("", ""))]
    fn split_uses_the_last_at_sign(#[case] raw: &str, #[case] expected: (&str, &str)) {
        assert_eq!(split_mailbox(raw), expected);
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(""), true)]
    #[case(Some("domain"), true)]
    #[case(Some("relaydomain"), false)]
    fn own_domains_follow_the_domain_filter(#[case] raw: Option<&str>, #[case] expected: bool) {
        let query = DomainListingQuery::from_raw(raw, None, BTreeMap::new());
        assert_eq!(query.includes_domains(), expected);
    }

    #[rstest]
    fn blank_searches_are_dropped() {
        let query = IdentityListingQuery::from_raw(Some("  "), None, None);
        assert_eq!(query.search, None);
    }

    #[rstest]
    #[case(" user ")]
    #[case("ann@example.org")]
    #[case("\tx")]
    fn searches_are_kept_verbatim(#[case] raw: &str) {
        let identities = IdentityListingQuery::from_raw(Some(raw), None, None);
        let domains = DomainListingQuery::from_raw(None, Some(raw), BTreeMap::new());
        assert_eq!(identities.search.as_deref(), Some(raw));
        assert_eq!(domains.search.as_deref(), Some(raw));
    }
}
