//! Translation of domain predicates into boxed Diesel conditions.
//!
//! Each field enum knows how to render its leaf conditions against one table.
//! Multi-valued fields (group names, domain aliases, owning domain names)
//! become `id IN (subselect)` conditions, so a match on any related row
//! selects the parent once.

use diesel::BoxableExpression;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Bool;

use crate::domain::query::{AccountField, AliasField, DomainField, Predicate, RelayDomainField};

use super::schema::{
    admin_alias, admin_domain, admin_domainalias, core_group, core_user, core_user_groups,
    relaydomains_relaydomain,
};

/// Boolean SQL condition usable in `.filter()` on table `T`.
pub(crate) type Condition<T> = Box<dyn BoxableExpression<T, Pg, SqlType = Bool>>;

/// Escape LIKE metacharacters and wrap for a substring match.
pub(crate) fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Leaf conditions of a field enum against table `T`.
pub(crate) trait SqlField<T>: Copy {
    /// Always true.
    fn everything() -> Condition<T>;
    /// Always false.
    fn nothing() -> Condition<T>;
    fn primary_key_in(ids: Vec<i32>) -> Condition<T>;
    fn equals(self, value: String) -> Condition<T>;
    /// Case-insensitive LIKE with an already escaped pattern.
    fn ilike(self, pattern: String) -> Condition<T>;
    fn flag(self, value: bool) -> Condition<T>;
}

/// Render `predicate` as a Diesel condition on table `T`.
pub(crate) fn condition<F, T>(predicate: &Predicate<F>) -> Condition<T>
where
    F: SqlField<T>,
    T: 'static,
{
    match predicate {
        Predicate::All => F::everything(),
        Predicate::IdIn(ids) => F::primary_key_in(ids.iter().copied().collect()),
        Predicate::Equals(field, value) => field.equals(value.clone()),
        Predicate::IContains(field, value) => field.ilike(contains_pattern(value)),
        Predicate::Flag(field, value) => field.flag(*value),
        Predicate::And(parts) => parts
            .iter()
            .map(condition::<F, T>)
            .reduce(|left, right| -> Condition<T> { Box::new(left.and(right)) })
            .unwrap_or_else(F::everything),
        Predicate::Or(parts) => parts
            .iter()
            .map(condition::<F, T>)
            .reduce(|left, right| -> Condition<T> { Box::new(left.or(right)) })
            .unwrap_or_else(F::nothing),
    }
}

impl SqlField<core_user::table> for AccountField {
    fn everything() -> Condition<core_user::table> {
        Box::new(core_user::id.is_not_null())
    }

    fn nothing() -> Condition<core_user::table> {
        Box::new(core_user::id.is_null())
    }

    fn primary_key_in(ids: Vec<i32>) -> Condition<core_user::table> {
        Box::new(core_user::id.eq_any(ids))
    }

    fn equals(self, value: String) -> Condition<core_user::table> {
        match self {
            Self::Username => Box::new(core_user::username.eq(value)),
            Self::Email => Box::new(core_user::email.eq(value)),
            Self::GroupName => Box::new(
                core_user::id.eq_any(
                    core_user_groups::table
                        .inner_join(core_group::table)
                        .filter(core_group::name.eq(value))
                        .select(core_user_groups::user_id),
                ),
            ),
            Self::IsSuperuser => Self::nothing(),
        }
    }

    fn ilike(self, pattern: String) -> Condition<core_user::table> {
        match self {
            Self::Username => Box::new(core_user::username.ilike(pattern)),
            Self::Email => Box::new(core_user::email.ilike(pattern)),
            Self::GroupName => Box::new(
                core_user::id.eq_any(
                    core_user_groups::table
                        .inner_join(core_group::table)
                        .filter(core_group::name.ilike(pattern))
                        .select(core_user_groups::user_id),
                ),
            ),
            Self::IsSuperuser => Self::nothing(),
        }
    }

    fn flag(self, value: bool) -> Condition<core_user::table> {
        match self {
            Self::IsSuperuser => Box::new(core_user::is_superuser.eq(value)),
            Self::Username | Self::Email | Self::GroupName => Self::nothing(),
        }
    }
}

impl SqlField<admin_alias::table> for AliasField {
    fn everything() -> Condition<admin_alias::table> {
        Box::new(admin_alias::id.is_not_null())
    }

    fn nothing() -> Condition<admin_alias::table> {
        Box::new(admin_alias::id.is_null())
    }

    fn primary_key_in(ids: Vec<i32>) -> Condition<admin_alias::table> {
        Box::new(admin_alias::id.eq_any(ids))
    }

    fn equals(self, value: String) -> Condition<admin_alias::table> {
        match self {
            Self::Address => Box::new(admin_alias::address.eq(value)),
            Self::DomainName => Box::new(
                admin_alias::domain_id.eq_any(
                    admin_domain::table
                        .filter(admin_domain::name.eq(value))
                        .select(admin_domain::id),
                ),
            ),
        }
    }

    fn ilike(self, pattern: String) -> Condition<admin_alias::table> {
        match self {
            Self::Address => Box::new(admin_alias::address.ilike(pattern)),
            Self::DomainName => Box::new(
                admin_alias::domain_id.eq_any(
                    admin_domain::table
                        .filter(admin_domain::name.ilike(pattern))
                        .select(admin_domain::id),
                ),
            ),
        }
    }

    fn flag(self, _value: bool) -> Condition<admin_alias::table> {
        Self::nothing()
    }
}

impl SqlField<admin_domain::table> for DomainField {
    fn everything() -> Condition<admin_domain::table> {
        Box::new(admin_domain::id.is_not_null())
    }

    fn nothing() -> Condition<admin_domain::table> {
        Box::new(admin_domain::id.is_null())
    }

    fn primary_key_in(ids: Vec<i32>) -> Condition<admin_domain::table> {
        Box::new(admin_domain::id.eq_any(ids))
    }

    fn equals(self, value: String) -> Condition<admin_domain::table> {
        match self {
            Self::Name => Box::new(admin_domain::name.eq(value)),
            Self::AliasName => Box::new(
                admin_domain::id.eq_any(
                    admin_domainalias::table
                        .filter(admin_domainalias::name.eq(value))
                        .select(admin_domainalias::target_id),
                ),
            ),
        }
    }

    fn ilike(self, pattern: String) -> Condition<admin_domain::table> {
        match self {
            Self::Name => Box::new(admin_domain::name.ilike(pattern)),
            Self::AliasName => Box::new(
                admin_domain::id.eq_any(
                    admin_domainalias::table
                        .filter(admin_domainalias::name.ilike(pattern))
                        .select(admin_domainalias::target_id),
                ),
            ),
        }
    }

    fn flag(self, _value: bool) -> Condition<admin_domain::table> {
        Self::nothing()
    }
}

impl SqlField<relaydomains_relaydomain::table> for RelayDomainField {
    fn everything() -> Condition<relaydomains_relaydomain::table> {
        Box::new(relaydomains_relaydomain::id.is_not_null())
    }

    fn nothing() -> Condition<relaydomains_relaydomain::table> {
        Box::new(relaydomains_relaydomain::id.is_null())
    }

    fn primary_key_in(ids: Vec<i32>) -> Condition<relaydomains_relaydomain::table> {
        Box::new(relaydomains_relaydomain::id.eq_any(ids))
    }

    fn equals(self, value: String) -> Condition<relaydomains_relaydomain::table> {
        match self {
            Self::Name => Box::new(relaydomains_relaydomain::name.eq(value)),
            Self::Service => Box::new(relaydomains_relaydomain::service.eq(value)),
        }
    }

    fn ilike(self, pattern: String) -> Condition<relaydomains_relaydomain::table> {
        match self {
            Self::Name => Box::new(relaydomains_relaydomain::name.ilike(pattern)),
            Self::Service => Box::new(relaydomains_relaydomain::service.ilike(pattern)),
        }
    }

    fn flag(self, _value: bool) -> Condition<relaydomains_relaydomain::table> {
        Self::nothing()
    }
}
