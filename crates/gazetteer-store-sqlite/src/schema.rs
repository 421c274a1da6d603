//! SQL schema for the Gazetteer SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- NOCASE collation makes the uniqueness constraint itself case-insensitive,
-- so two differently-cased inserts of the same city cannot both land.
CREATE TABLE IF NOT EXISTS cities (
    city_id     INTEGER PRIMARY KEY,
    name        TEXT NOT NULL COLLATE NOCASE UNIQUE,
    created_at  TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

-- Fact rows are only ever written as a full per-city batch:
-- DELETE then INSERT inside one transaction, never a partial update.
CREATE TABLE IF NOT EXISTS city_facts (
    fact_id     INTEGER PRIMARY KEY,
    city_id     INTEGER NOT NULL REFERENCES cities(city_id),
    fact_type   TEXT NOT NULL,
    fact_value  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS city_facts_city_idx ON city_facts(city_id);

PRAGMA user_version = 1;
";
