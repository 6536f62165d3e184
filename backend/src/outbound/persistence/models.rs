//! Internal Diesel row structs.
//!
//! These types are implementation details of the persistence layer and never
//! leave it. Repositories convert them into domain entities.

use diesel::prelude::*;

use super::schema::{
    admin_alias, admin_alias_recipient, admin_domain, admin_domainalias, admin_mailbox,
    core_user, lib_parameter, relaydomains_relaydomain,
};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = core_user)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_superuser: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = admin_domain)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DomainRow {
    pub id: i32,
    pub name: String,
    pub quota: i32,
    pub enabled: bool,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = admin_domainalias)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DomainAliasRow {
    pub name: String,
    pub target_id: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = admin_alias)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AliasRow {
    pub id: i32,
    pub address: String,
    pub domain_id: i32,
    pub enabled: bool,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = admin_alias_recipient)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AliasRecipientRow {
    pub alias_id: i32,
    pub kind: String,
    pub address: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = admin_mailbox)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MailboxRow {
    pub id: i32,
    pub address: String,
    pub user_id: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = relaydomains_relaydomain)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RelayDomainRow {
    pub id: i32,
    pub name: String,
    pub target_host: String,
    pub service: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = lib_parameter)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ParameterRow {
    pub value: String,
}
