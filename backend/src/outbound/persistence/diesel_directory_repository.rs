//! PostgreSQL-backed directory ports: grants, accounts, aliases, mailboxes.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{
    AccountRepository, AliasRepository, DirectoryRepositoryError, MailboxRepository,
    ObjectAccessRepository,
};
use crate::domain::query::{AccountField, AliasField, Predicate};
use crate::domain::{Account, AccountId, Alias, AliasRecipient, ContentKind, Mailbox};

use super::diesel_basic_error_mapping::{directory_diesel_error, directory_pool_error};
use super::models::{AccountRow, AliasRecipientRow, AliasRow, MailboxRow};
use super::pool::DbPool;
use super::predicate_sql::condition;
use super::schema::{
    admin_alias, admin_alias_recipient, admin_domain, admin_mailbox, core_group,
    core_objectaccess, core_user, core_user_groups,
};

/// Diesel-backed implementation of the account, alias, grant and mailbox
/// ports.
#[derive(Clone)]
pub struct DieselDirectoryRepository {
    pool: DbPool,
}

impl DieselDirectoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn group_names(
        &self,
        account_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<String>>, DirectoryRepositoryError> {
        if account_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut conn = self.pool.get().await.map_err(directory_pool_error)?;
        let memberships: Vec<(i32, String)> = core_user_groups::table
            .inner_join(core_group::table)
            .filter(core_user_groups::user_id.eq_any(account_ids))
            .order((core_user_groups::user_id, core_group::name))
            .select((core_user_groups::user_id, core_group::name))
            .load(&mut conn)
            .await
            .map_err(directory_diesel_error)?;
        let mut groups: HashMap<i32, Vec<String>> = HashMap::new();
        for (user_id, name) in memberships {
            groups.entry(user_id).or_default().push(name);
        }
        Ok(groups)
    }

    async fn accounts_with_groups(
        &self,
        rows: Vec<AccountRow>,
    ) -> Result<Vec<Account>, DirectoryRepositoryError> {
        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let mut groups = self.group_names(&ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let names = groups.remove(&row.id).unwrap_or_default();
                row_to_account(row, names)
            })
            .collect())
    }
}

fn row_to_account(row: AccountRow, groups: Vec<String>) -> Account {
    Account {
        id: AccountId::new(row.id),
        username: row.username,
        email: row.email,
        first_name: row.first_name,
        last_name: row.last_name,
        is_superuser: row.is_superuser,
        is_active: row.is_active,
        groups,
    }
}

fn row_to_recipient(row: AliasRecipientRow) -> Option<AliasRecipient> {
    match row.kind.as_str() {
        "mailbox" => Some(AliasRecipient::Mailbox(row.address)),
        "alias" => Some(AliasRecipient::Alias(row.address)),
        "external" => Some(AliasRecipient::External(row.address)),
        other => {
            warn!(
                kind = other,
                alias_id = row.alias_id,
                "skipping alias recipient of unknown kind"
            );
            None
        }
    }
}

#[async_trait]
impl ObjectAccessRepository for DieselDirectoryRepository {
    async fn granted_ids(
        &self,
        account: AccountId,
        kind: ContentKind,
    ) -> Result<BTreeSet<i32>, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(directory_pool_error)?;
        let ids: Vec<i32> = core_objectaccess::table
            .filter(core_objectaccess::user_id.eq(account.get()))
            .filter(core_objectaccess::content_type.eq(kind.as_str()))
            .select(core_objectaccess::object_id)
            .load(&mut conn)
            .await
            .map_err(directory_diesel_error)?;
        Ok(ids.into_iter().collect())
    }
}

#[async_trait]
impl AccountRepository for DieselDirectoryRepository {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, DirectoryRepositoryError> {
        let row = {
            let mut conn = self.pool.get().await.map_err(directory_pool_error)?;
            core_user::table
                .find(id.get())
                .select(AccountRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(directory_diesel_error)?
        };
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(self.accounts_with_groups(vec![row]).await?.pop())
    }

    async fn list(
        &self,
        predicate: &Predicate<AccountField>,
    ) -> Result<Vec<Account>, DirectoryRepositoryError> {
        let rows = {
            let mut conn = self.pool.get().await.map_err(directory_pool_error)?;
            core_user::table
                .filter(condition::<AccountField, core_user::table>(predicate))
                .order(core_user::id.asc())
                .select(AccountRow::as_select())
                .load(&mut conn)
                .await
                .map_err(directory_diesel_error)?
        };
        self.accounts_with_groups(rows).await
    }
}

#[async_trait]
impl AliasRepository for DieselDirectoryRepository {
    async fn list(
        &self,
        predicate: &Predicate<AliasField>,
    ) -> Result<Vec<Alias>, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(directory_pool_error)?;
        let rows: Vec<AliasRow> = admin_alias::table
            .filter(condition::<AliasField, admin_alias::table>(predicate))
            .order(admin_alias::id.asc())
            .select(AliasRow::as_select())
            .load(&mut conn)
            .await
            .map_err(directory_diesel_error)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let alias_ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let domain_ids: Vec<i32> = rows.iter().map(|row| row.domain_id).collect();
        let domain_names: HashMap<i32, String> = admin_domain::table
            .filter(admin_domain::id.eq_any(&domain_ids))
            .select((admin_domain::id, admin_domain::name))
            .load::<(i32, String)>(&mut conn)
            .await
            .map_err(directory_diesel_error)?
            .into_iter()
            .collect();
        let recipient_rows: Vec<AliasRecipientRow> = admin_alias_recipient::table
            .filter(admin_alias_recipient::alias_id.eq_any(&alias_ids))
            .order(admin_alias_recipient::id.asc())
            .select(AliasRecipientRow::as_select())
            .load(&mut conn)
            .await
            .map_err(directory_diesel_error)?;

        let mut recipients: HashMap<i32, Vec<AliasRecipient>> = HashMap::new();
        for row in recipient_rows {
            let alias_id = row.alias_id;
            if let Some(recipient) = row_to_recipient(row) {
                recipients.entry(alias_id).or_default().push(recipient);
            }
        }

        Ok(rows
            .into_iter()
            .map(|row| Alias {
                id: row.id.into(),
                address: row.address,
                domain_id: row.domain_id.into(),
                domain_name: domain_names.get(&row.domain_id).cloned().unwrap_or_default(),
                enabled: row.enabled,
                recipients: recipients.remove(&row.id).unwrap_or_default(),
            })
            .collect())
    }
}

#[async_trait]
impl MailboxRepository for DieselDirectoryRepository {
    async fn count_for_account(&self, account: AccountId) -> Result<u64, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(directory_pool_error)?;
        let count: i64 = admin_mailbox::table
            .filter(admin_mailbox::user_id.eq(account.get()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(directory_diesel_error)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn list_for_account(
        &self,
        account: AccountId,
    ) -> Result<Vec<Mailbox>, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(directory_pool_error)?;
        let rows: Vec<(MailboxRow, String)> = admin_mailbox::table
            .inner_join(admin_domain::table)
            .filter(admin_mailbox::user_id.eq(account.get()))
            .order((admin_mailbox::address.asc(), admin_domain::name.asc()))
            .select((MailboxRow::as_select(), admin_domain::name))
            .load(&mut conn)
            .await
            .map_err(directory_diesel_error)?;
        Ok(rows
            .into_iter()
            .map(|(row, domain_name)| Mailbox::new(row.id, row.address, domain_name, row.user_id))
            .collect())
    }
}
