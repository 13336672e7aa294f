//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match the migrations exactly; regenerate with
//! `diesel print-schema` after a migration changes either table.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Int4,
        first_name -> Varchar,
        last_name -> Varchar,
        /// Unique, case-sensitive lookup key.
        email_address -> Varchar,
        /// bcrypt-encoded hash; the plaintext never reaches this column.
        password -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Courses, each owned by one account.
    courses (id) {
        id -> Int4,
        title -> Varchar,
        description -> Text,
        estimated_time -> Nullable<Varchar>,
        materials_needed -> Nullable<Text>,
        user_id -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(courses -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(courses, users);
