//! Shared Diesel error mapping for the read-only repositories.
//!
//! Every port here distinguishes only "store unreachable" from "query
//! failed", so the mapping takes the two constructors and picks one.

use tracing::debug;

use crate::domain::ports::{DirectoryRepositoryError, ParameterStoreError};

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
pub fn map_basic_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

pub(crate) fn directory_pool_error(error: PoolError) -> DirectoryRepositoryError {
    map_basic_pool_error(error, |message| DirectoryRepositoryError::connection(message))
}

pub(crate) fn directory_diesel_error(error: diesel::result::Error) -> DirectoryRepositoryError {
    map_basic_diesel_error(
        error,
        |message| DirectoryRepositoryError::query(message),
        |message| DirectoryRepositoryError::connection(message),
    )
}

pub(crate) fn parameter_pool_error(error: PoolError) -> ParameterStoreError {
    map_basic_pool_error(error, |message| ParameterStoreError::connection(message))
}

pub(crate) fn parameter_diesel_error(error: diesel::result::Error) -> ParameterStoreError {
    map_basic_diesel_error(
        error,
        |message| ParameterStoreError::query(message),
        |message| ParameterStoreError::connection(message),
    )
}

#[cfg(test)]
mod tests {
    use diesel::result::Error as DieselError;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_failures_are_connection_errors() {
        let error = directory_pool_error(PoolError::checkout("timed out"));
        assert_eq!(error, DirectoryRepositoryError::connection("timed out"));
        let error = parameter_pool_error(PoolError::build("bad url"));
        assert_eq!(error, ParameterStoreError::connection("bad url"));
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(DieselError::RollbackTransaction, "database error")]
    fn diesel_failures_are_query_errors(#[case] error: DieselError, #[case] message: &str) {
        assert_eq!(
            directory_diesel_error(error),
            DirectoryRepositoryError::query(message)
        );
    }
}
