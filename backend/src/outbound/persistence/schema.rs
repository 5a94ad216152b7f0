//! Diesel table definitions mirroring `backend/migrations`.
//!
//! Keep these in step with the SQL; `diesel print-schema` regenerates them
//! from a migrated database.

diesel::table! {
    /// Tenants users may belong to.
    organizations (id) {
        id -> Uuid,
        /// Unique (`organizations_name_key`).
        name -> Text,
        /// Unique when present (`organizations_document_key`).
        document -> Nullable<Text>,
        created_at -> Timestamptz,
        /// Maintained by the `organizations_set_updated_at` trigger.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered user accounts.
    users (id) {
        id -> Uuid,
        /// Lower-cased, unique (`users_email_key`).
        email -> Text,
        name -> Nullable<Varchar>,
        /// bcrypt hash; plaintext is never stored.
        password -> Text,
        thumb -> Nullable<Text>,
        /// Set to NULL when the organization is deleted.
        organization_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Scaffolding entities.
    test_entities (id) {
        id -> Uuid,
        name -> Varchar,
        /// One of `active`, `inactive`, `pending`.
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(users -> organizations (organization_id));
diesel::allow_tables_to_appear_in_same_query!(organizations, users, test_entities);
