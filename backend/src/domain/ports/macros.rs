//! Helper macro for generating port error enums.
//!
//! Port errors carry a single human-readable `message`. Each variant is
//! declared with its display prefix and gets a snake_case constructor taking
//! anything convertible into a `String`, so adapters can write
//! `DirectoryRepositoryError::query(err.to_string())`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $prefix:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error("{prefix}: {message}", prefix = $prefix)]
                $variant { message: String },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build a [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant { message: message.into() }
                    }
                }
            )*

            /// Adapter-supplied detail, without the variant prefix.
            pub fn message(&self) -> &str {
                match self {
                    $(Self::$variant { message } => message,)*
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum LookupError {
            NotFound => "lookup missed",
            TimedOut => "lookup timed out",
        }
    }

    #[test]
    fn constructors_are_snake_case_and_accept_borrowed_input() {
        let err = LookupError::not_found("ann@example.org");
        assert_eq!(
            err,
            LookupError::NotFound {
                message: "ann@example.org".to_owned()
            }
        );
        assert_eq!(err.to_string(), "lookup missed: ann@example.org");
    }

    #[test]
    fn message_strips_the_prefix() {
        let err = LookupError::timed_out(String::from("after 5s"));
        assert_eq!(err.message(), "after 5s");
        assert_eq!(err.to_string(), "lookup timed out: after 5s");
    }
}
