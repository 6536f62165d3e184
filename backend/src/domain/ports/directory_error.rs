//! Error type shared by the directory repository ports.

use super::define_port_error;

define_port_error! {
    /// Errors raised by directory repository adapters.
    pub enum DirectoryRepositoryError {
        /// The store could not be reached.
        Connection => "directory connection failed",
        /// The store rejected or failed the query.
        Query => "directory query failed",
    }
}

impl From<DirectoryRepositoryError> for crate::domain::Error {
    fn from(error: DirectoryRepositoryError) -> Self {
        match error {
            DirectoryRepositoryError::Connection { message } => {
                Self::service_unavailable(format!("directory unavailable: {message}"))
            }
            DirectoryRepositoryError::Query { message } => {
                Self::internal(format!("directory error: {message}"))
            }
        }
    }
}
