//! Store-neutral predicate composition.
//!
//! Listing services express "what this principal may see" as a [`Predicate`]
//! tree over a per-entity field enum. Repository adapters translate the tree
//! into their native filter language (SQL for Diesel, [`Predicate::matches`]
//! for the in-memory directory) so the access rules live in one place.
//!
//! Multi-valued fields (group names, domain aliases) follow SQL join
//! semantics: a condition holds when any value satisfies it.

use std::collections::BTreeSet;
use std::ops::{BitAnd, BitAndAssign, BitOr};

/// Filterable account columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountField {
    /// Login name.
    Username,
    /// Contact address.
    Email,
    /// Superuser flag.
    IsSuperuser,
    /// Name of any group the account belongs to.
    GroupName,
}

/// Filterable alias columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AliasField {
    /// Local part of the alias address.
    Address,
    /// Name of the owning domain.
    DomainName,
}

/// Filterable domain columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainField {
    /// Domain name.
    Name,
    /// Any domain-alias name pointing at the domain.
    AliasName,
}

/// Filterable relay-domain columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelayDomainField {
    /// Relay domain name.
    Name,
    /// Transport service, such as `relay` or `smtp`.
    Service,
}

/// Boolean filter over the fields `F` of one entity.
///
/// # Examples
/// ```
/// use mailadmin::domain::query::{AccountField, Predicate};
///
/// let mut q = Predicate::id_in([1, 2, 3]);
/// q &= Predicate::icontains(AccountField::Username, "ada")
///     | Predicate::icontains(AccountField::Email, "ada");
/// assert!(matches!(q, Predicate::And(ref parts) if parts.len() == 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate<F> {
    /// Matches every record.
    All,
    /// Primary key is one of the listed values. An empty set matches nothing.
    IdIn(BTreeSet<i32>),
    /// Case-sensitive equality.
    Equals(F, String),
    /// Case-insensitive substring match.
    IContains(F, String),
    /// Boolean column equals the value.
    Flag(F, bool),
    /// Every part holds. Empty is true.
    And(Vec<Predicate<F>>),
    /// At least one part holds. Empty is false.
    Or(Vec<Predicate<F>>),
}

impl<F> Predicate<F> {
    /// Primary key in `ids`.
    pub fn id_in<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        Self::IdIn(ids.into_iter().collect())
    }

    /// `field` equals `value` exactly.
    pub fn equals(field: F, value: impl Into<String>) -> Self {
        Self::Equals(field, value.into())
    }

    /// `field` contains `value`, ignoring case.
    pub fn icontains(field: F, value: impl Into<String>) -> Self {
        Self::IContains(field, value.into())
    }

    /// Boolean `field` is `value`.
    ///
    /// ```
    /// # use mailadmin::domain::query::{AccountField, Predicate};
    /// let superusers = Predicate::flag(AccountField::IsSuperuser, true);
    /// assert_eq!(superusers, Predicate::Flag(AccountField::IsSuperuser, true));
    /// ```
    pub fn flag(field: F, value: bool) -> Self {
        Self::Flag(field, value)
    }

    /// Conjunction, flattening nested `And` nodes and dropping `All`.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::All, other) | (other, Self::All) => other,
            (Self::And(mut left), Self::And(right)) => {
                left.extend(right);
                Self::And(left)
            }
            (Self::And(mut left), right) => {
                left.push(right);
                Self::And(left)
            }
            (left, Self::And(mut right)) => {
                right.insert(0, left);
                Self::And(right)
            }
            (left, right) => Self::And(vec![left, right]),
        }
    }

    /// Disjunction, flattening nested `Or` nodes. `All` absorbs the other side.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::All, _) | (_, Self::All) => Self::All,
            (Self::Or(mut left), Self::Or(right)) => {
                left.extend(right);
                Self::Or(left)
            }
            (Self::Or(mut left), right) => {
                left.push(right);
                Self::Or(left)
            }
            (left, Self::Or(mut right)) => {
                right.insert(0, left);
                Self::Or(right)
            }
            (left, right) => Self::Or(vec![left, right]),
        }
    }
}

impl<F> BitAnd for Predicate<F> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl<F> BitOr for Predicate<F> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl<F> BitAndAssign for Predicate<F> {
    fn bitand_assign(&mut self, rhs: Self) {
        let current = std::mem::replace(self, Self::All);
        *self = current.and(rhs);
    }
}

/// Record view used to evaluate predicates in memory.
pub trait Filterable<F> {
    fn primary_key(&self) -> i32;

    /// Values of a text field; empty when `field` is not textual.
    fn text_values(&self, field: F) -> Vec<&str>;

    /// Value of a boolean field; `None` when `field` is not boolean.
    fn flag_value(&self, field: F) -> Option<bool>;
}

impl<F: Copy> Predicate<F> {
    /// Evaluate the predicate against an in-memory record.
    pub fn matches<T>(&self, record: &T) -> bool
    where
        T: Filterable<F>,
    {
        match self {
            Self::All => true,
            Self::IdIn(ids) => ids.contains(&record.primary_key()),
            Self::Equals(field, value) => record
                .text_values(*field)
                .iter()
                .any(|candidate| candidate == value),
            Self::IContains(field, value) => {
                let needle = value.to_lowercase();
                record
                    .text_values(*field)
                    .iter()
                    .any(|candidate| candidate.to_lowercase().contains(&needle))
            }
            Self::Flag(field, value) => record.flag_value(*field) == Some(*value),
            Self::And(parts) => parts.iter().all(|part| part.matches(record)),
            Self::Or(parts) => parts.iter().any(|part| part.matches(record)),
        }
    }
}
