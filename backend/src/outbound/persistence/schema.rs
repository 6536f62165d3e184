//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Table and column
//! names follow the layout the admin panel already uses, so the service can
//! read an existing directory database.

diesel::table! {
    /// Accounts.
    core_user (id) {
        id -> Int4,
        username -> Varchar,
        email -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        is_superuser -> Bool,
        is_active -> Bool,
    }
}

diesel::table! {
    core_group (id) {
        id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    /// Account to group membership.
    core_user_groups (id) {
        id -> Int4,
        user_id -> Int4,
        group_id -> Int4,
    }
}

diesel::table! {
    /// Object-access grants.
    ///
    /// `content_type` holds the lowercase content kind (`account`, `alias`,
    /// `domain`, `relaydomain`); `object_id` the granted row's primary key.
    core_objectaccess (id) {
        id -> Int4,
        user_id -> Int4,
        content_type -> Varchar,
        object_id -> Int4,
    }
}

diesel::table! {
    admin_domain (id) {
        id -> Int4,
        name -> Varchar,
        /// Quota in megabytes; zero means unlimited.
        quota -> Int4,
        enabled -> Bool,
    }
}

diesel::table! {
    /// Alternative names of a domain.
    admin_domainalias (id) {
        id -> Int4,
        name -> Varchar,
        target_id -> Int4,
        enabled -> Bool,
    }
}

diesel::table! {
    admin_alias (id) {
        id -> Int4,
        /// Local part of the alias address.
        address -> Varchar,
        domain_id -> Int4,
        enabled -> Bool,
    }
}

diesel::table! {
    /// Alias recipients. `kind` is `mailbox`, `alias` or `external`.
    admin_alias_recipient (id) {
        id -> Int4,
        alias_id -> Int4,
        kind -> Varchar,
        address -> Varchar,
    }
}

diesel::table! {
    admin_mailbox (id) {
        id -> Int4,
        /// Local part of the mailbox address.
        address -> Varchar,
        domain_id -> Int4,
        user_id -> Int4,
    }
}

diesel::table! {
    relaydomains_relaydomain (id) {
        id -> Int4,
        name -> Varchar,
        target_host -> Varchar,
        service -> Varchar,
        enabled -> Bool,
    }
}

diesel::table! {
    /// Administrator parameters keyed `namespace.NAME`.
    lib_parameter (id) {
        id -> Int4,
        name -> Varchar,
        value -> Text,
    }
}

diesel::joinable!(core_user_groups -> core_user (user_id));
diesel::joinable!(core_user_groups -> core_group (group_id));
diesel::joinable!(core_objectaccess -> core_user (user_id));
diesel::joinable!(admin_domainalias -> admin_domain (target_id));
diesel::joinable!(admin_alias -> admin_domain (domain_id));
diesel::joinable!(admin_alias_recipient -> admin_alias (alias_id));
diesel::joinable!(admin_mailbox -> admin_domain (domain_id));
diesel::joinable!(admin_mailbox -> core_user (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    admin_alias,
    admin_alias_recipient,
    admin_domain,
    admin_domainalias,
    admin_mailbox,
    core_group,
    core_objectaccess,
    core_user,
    core_user_groups,
    lib_parameter,
    relaydomains_relaydomain,
);
