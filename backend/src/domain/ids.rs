//! Integer primary keys of directory entities.
//!
//! Each entity gets its own newtype so an alias id can never be passed where
//! a domain id is expected. The raw value is only exposed for predicates and
//! persistence mapping.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw primary key.
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// Raw primary key.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_entity_id!(
    /// Primary key of an account (also the principal id).
    AccountId
);
define_entity_id!(
    /// Primary key of an alias.
    AliasId
);
define_entity_id!(
    /// Primary key of a mail domain.
    DomainId
);
define_entity_id!(
    /// Primary key of a relay domain.
    RelayDomainId
);
define_entity_id!(
    /// Primary key of a mailbox.
    MailboxId
);
