//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the DDL issued by each store's
//! `create_table` exactly. They are used by Diesel for compile-time query
//! validation and type-safe SQL generation.

diesel::table! {
    /// User accounts.
    users (id) {
        /// Primary key assigned by `AUTOINCREMENT`.
        id -> BigInt,
        /// Display name; never blank.
        name -> Text,
        /// Optional contact address.
        email -> Nullable<Text>,
        /// Insertion timestamp (UTC, millisecond precision).
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Cars listed for sale.
    cars (id) {
        /// Primary key assigned by `AUTOINCREMENT`.
        id -> BigInt,
        make -> Text,
        model -> Text,
        year -> Nullable<Integer>,
        color -> Nullable<Text>,
        price -> Nullable<Double>,
        mileage -> Nullable<BigInt>,
        /// Insertion timestamp (UTC, millisecond precision).
        created_at -> Timestamp,
        /// Re-stamped by every update that writes at least one column.
        updated_at -> Timestamp,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, cars);
