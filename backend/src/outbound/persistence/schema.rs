//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// User accounts.
    users (id) {
        /// Primary key.
        id -> BigInt,
        /// Normalised, unique email address.
        email -> Varchar,
        /// PHC-encoded password hash.
        password_hash -> Text,
        /// Inactive accounts cannot authenticate.
        is_active -> Bool,
        /// Staff flag.
        is_staff -> Bool,
        /// Superuser flag.
        is_superuser -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Issued bearer tokens, stored by SHA-256 digest only.
    auth_tokens (digest) {
        /// Hex-encoded SHA-256 digest of the raw token.
        digest -> Varchar,
        /// Owning user.
        user_id -> BigInt,
        /// Issue timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipes, owned by exactly one user.
    recipes (id) {
        /// Primary key.
        id -> BigInt,
        /// Owning user.
        user_id -> BigInt,
        /// Short display title.
        title -> Varchar,
        /// Preparation time; non-negative by CHECK constraint.
        time_minutes -> Integer,
        /// Decimal currency value.
        price -> Numeric,
        /// Optional long-form description.
        description -> Nullable<Text>,
        /// Optional source URL.
        link -> Nullable<Text>,
    }
}

diesel::table! {
    /// Recipe tags, owned by exactly one user.
    tags (id) {
        /// Primary key.
        id -> BigInt,
        /// Owning user.
        user_id -> BigInt,
        /// Display name.
        name -> Varchar,
    }
}

diesel::table! {
    /// Recipe ingredients, owned by exactly one user.
    ingredients (id) {
        /// Primary key.
        id -> BigInt,
        /// Owning user.
        user_id -> BigInt,
        /// Display name.
        name -> Varchar,
    }
}

diesel::joinable!(auth_tokens -> users (user_id));
diesel::joinable!(recipes -> users (user_id));
diesel::joinable!(tags -> users (user_id));
diesel::joinable!(ingredients -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, auth_tokens, recipes, tags, ingredients);
