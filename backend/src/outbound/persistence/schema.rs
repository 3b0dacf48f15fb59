//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the bootstrap statements in `storage.rs`.
//! SQLite leaves the columns nullable, but every row the adapters write
//! populates all of them, so they are declared non-null here.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Auto-incremented primary key.
        id -> BigInt,
        /// Unique login name, stored verbatim.
        username -> Text,
        /// Lowercase hex SHA-256 digest of the password.
        password -> Text,
    }
}

diesel::table! {
    /// Append-only activity submissions.
    data (id) {
        /// Auto-incremented primary key; also the listing order.
        id -> BigInt,
        /// Owning account.
        user_id -> BigInt,
        /// Owning account's username, copied at submission time.
        username -> Text,
        /// Submission date as `YYYY-MM-DD`.
        date -> Text,
        /// Annualized distance travelled (km).
        distance -> Double,
        /// Annualized electricity consumption (kWh).
        electricity -> Double,
        /// Annualized waste (kg).
        waste -> Double,
        /// Annualized meal count.
        meals -> BigInt,
        /// Annual emissions in tonnes of CO2.
        total_emissions -> Double,
    }
}

diesel::joinable!(data -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, data);
