//! [`SqliteStore`] — the SQLite implementation of [`CityStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use gazetteer_core::{
  city::City,
  facts::{CityFact, NewFact},
  store::CityStore,
};

use crate::{
  Result,
  encode::{RawCity, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Gazetteer city store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Row helpers ─────────────────────────────────────────────────────────────

fn city_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawCity> {
  Ok(RawCity {
    city_id:    row.get(0)?,
    name:       row.get(1)?,
    created_at: row.get(2)?,
  })
}

const CITY_BY_NAME: &str = "SELECT city_id, name, created_at FROM cities
   WHERE name = ?1 COLLATE NOCASE";

fn query_city(
  conn: &rusqlite::Connection,
  name: &str,
) -> rusqlite::Result<Option<RawCity>> {
  conn
    .query_row(CITY_BY_NAME, rusqlite::params![name], city_from_row)
    .optional()
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(e, _)
      if e.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

// ─── CityStore impl ──────────────────────────────────────────────────────────

impl CityStore for SqliteStore {
  type Error = crate::Error;

  async fn find_city(&self, name: &str) -> Result<Option<City>> {
    let name = name.to_owned();

    let raw: Option<RawCity> = self
      .conn
      .call(move |conn| Ok(query_city(conn, &name)?))
      .await?;

    raw.map(RawCity::into_city).transpose()
  }

  async fn get_or_create_city(&self, name: &str) -> Result<City> {
    let name   = name.to_owned();
    let at_str = encode_dt(Utc::now());

    let raw: RawCity = self
      .conn
      .call(move |conn| {
        if let Some(existing) = query_city(conn, &name)? {
          return Ok(existing);
        }

        let inserted = conn.execute(
          "INSERT INTO cities (name, created_at) VALUES (?1, ?2)",
          rusqlite::params![name, at_str],
        );

        match inserted {
          Ok(_) => Ok(RawCity {
            city_id: conn.last_insert_rowid(),
            name,
            created_at: at_str,
          }),
          // Lost the creation race: another writer inserted the same name
          // first. The constraint is case-insensitive, so the lookup retry
          // is guaranteed to find the winner.
          Err(ref e) if is_unique_violation(e) => {
            Ok(conn.query_row(CITY_BY_NAME, rusqlite::params![name], city_from_row)?)
          }
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    raw.into_city()
  }

  async fn list_facts(&self, city_id: i64) -> Result<Vec<CityFact>> {
    let facts = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT fact_id, city_id, fact_type, fact_value
           FROM city_facts WHERE city_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![city_id], |row| {
            Ok(CityFact {
              fact_id:    row.get(0)?,
              city_id:    row.get(1)?,
              fact_type:  row.get(2)?,
              fact_value: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(facts)
  }

  async fn replace_facts(
    &self,
    city_id: i64,
    facts: Vec<NewFact>,
  ) -> Result<Vec<CityFact>> {
    let stored = self
      .conn
      .call(move |conn| {
        // Scoped transaction: if any insert fails, the delete rolls back
        // with it and the prior fact set survives untouched.
        let tx = conn.transaction()?;

        tx.execute(
          "DELETE FROM city_facts WHERE city_id = ?1",
          rusqlite::params![city_id],
        )?;

        let mut stored = Vec::with_capacity(facts.len());
        {
          let mut stmt = tx.prepare(
            "INSERT INTO city_facts (city_id, fact_type, fact_value)
             VALUES (?1, ?2, ?3)",
          )?;
          for fact in &facts {
            stmt.execute(rusqlite::params![
              city_id,
              fact.fact_type,
              fact.fact_value,
            ])?;
            stored.push(CityFact {
              fact_id:    tx.last_insert_rowid(),
              city_id,
              fact_type:  fact.fact_type.clone(),
              fact_value: fact.fact_value.clone(),
            });
          }
        }

        tx.commit()?;
        Ok(stored)
      })
      .await?;
    Ok(stored)
  }
}
