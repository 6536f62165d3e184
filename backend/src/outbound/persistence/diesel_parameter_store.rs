//! PostgreSQL-backed parameter store.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ParameterStore, ParameterStoreError};
use crate::outbound::memory::parameter_key;

use super::diesel_basic_error_mapping::{parameter_diesel_error, parameter_pool_error};
use super::models::ParameterRow;
use super::pool::DbPool;
use super::schema::lib_parameter;

/// Reads parameters from `lib_parameter`, keyed `namespace.NAME`.
#[derive(Clone)]
pub struct DieselParameterStore {
    pool: DbPool,
}

impl DieselParameterStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParameterStore for DieselParameterStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<String>, ParameterStoreError> {
        let key = parameter_key(namespace, name);
        let mut conn = self.pool.get().await.map_err(parameter_pool_error)?;
        let row = lib_parameter::table
            .filter(lib_parameter::name.eq(&key))
            .select(ParameterRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(parameter_diesel_error)?;
        Ok(row.map(|row| row.value))
    }
}
