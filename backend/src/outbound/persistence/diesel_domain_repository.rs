//! PostgreSQL-backed domain and relay domain ports.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DirectoryRepositoryError, DomainRepository, RelayDomainRepository};
use crate::domain::query::{DomainField, Predicate, RelayDomainField};
use crate::domain::{Domain, RelayDomain};

use super::diesel_basic_error_mapping::{directory_diesel_error, directory_pool_error};
use super::models::{DomainAliasRow, DomainRow, RelayDomainRow};
use super::pool::DbPool;
use super::predicate_sql::condition;
use super::schema::{admin_domain, admin_domainalias, relaydomains_relaydomain};

/// Diesel-backed implementation of [`DomainRepository`] and
/// [`RelayDomainRepository`].
#[derive(Clone)]
pub struct DieselDomainRepository {
    pool: DbPool,
}

impl DieselDomainRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DomainRepository for DieselDomainRepository {
    async fn list(
        &self,
        predicate: &Predicate<DomainField>,
    ) -> Result<Vec<Domain>, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(directory_pool_error)?;
        let rows: Vec<DomainRow> = admin_domain::table
            .filter(condition::<DomainField, admin_domain::table>(predicate))
            .order(admin_domain::id.asc())
            .select(DomainRow::as_select())
            .load(&mut conn)
            .await
            .map_err(directory_diesel_error)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let alias_rows: Vec<DomainAliasRow> = admin_domainalias::table
            .filter(admin_domainalias::target_id.eq_any(&ids))
            .order(admin_domainalias::name.asc())
            .select(DomainAliasRow::as_select())
            .load(&mut conn)
            .await
            .map_err(directory_diesel_error)?;
        let mut aliases: HashMap<i32, Vec<String>> = HashMap::new();
        for row in alias_rows {
            aliases.entry(row.target_id).or_default().push(row.name);
        }

        Ok(rows
            .into_iter()
            .map(|row| Domain {
                id: row.id.into(),
                name: row.name,
                aliases: aliases.remove(&row.id).unwrap_or_default(),
                quota: row.quota,
                enabled: row.enabled,
            })
            .collect())
    }
}

#[async_trait]
impl RelayDomainRepository for DieselDomainRepository {
    async fn list(
        &self,
        predicate: &Predicate<RelayDomainField>,
    ) -> Result<Vec<RelayDomain>, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(directory_pool_error)?;
        let rows: Vec<RelayDomainRow> = relaydomains_relaydomain::table
            .filter(condition::<RelayDomainField, relaydomains_relaydomain::table>(predicate))
            .order(relaydomains_relaydomain::id.asc())
            .select(RelayDomainRow::as_select())
            .load(&mut conn)
            .await
            .map_err(directory_diesel_error)?;
        Ok(rows
            .into_iter()
            .map(|row| RelayDomain {
                id: row.id.into(),
                name: row.name,
                target_host: row.target_host,
                service: row.service,
                enabled: row.enabled,
            })
            .collect())
    }
}
