//! Port for administrator-tunable parameters.
//!
//! Parameters are grouped by application namespace (`core`, `admin`, ...)
//! and read as raw strings; callers own parsing and defaults.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by parameter store adapters.
    pub enum ParameterStoreError {
        /// The store could not be reached.
        Connection => "parameter store connection failed",
        /// The lookup failed during execution.
        Query => "parameter store query failed",
    }
}

impl From<ParameterStoreError> for crate::domain::Error {
    fn from(error: ParameterStoreError) -> Self {
        match error {
            ParameterStoreError::Connection { message } => {
                Self::service_unavailable(format!("parameter store unavailable: {message}"))
            }
            ParameterStoreError::Query { message } => {
                Self::internal(format!("parameter store error: {message}"))
            }
        }
    }
}

/// Read access to stored parameters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Raw value of `namespace.name`, `None` when unset.
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<String>, ParameterStoreError>;
}
