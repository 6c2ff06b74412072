//! [`SqliteStore`] — the SQLite implementation of [`FixtureStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use sliotar_core::{
  date::normalize_date,
  fixture::{Fixture, RawFixture, StoreStatus},
  store::{DistinctField, FixtureQuery, FixtureStore, Page},
};

use crate::{
  Error, Result,
  encode::{RawRow, decode_dt, encode_date, encode_dt},
  schema::SCHEMA,
};

const FIXTURE_COLUMNS: &str =
  "id, date, date_parsed, competition, home_team, away_team, time, venue, referee, created_at";

fn row_to_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
  Ok(RawRow {
    id:          row.get(0)?,
    date:        row.get(1)?,
    date_parsed: row.get(2)?,
    competition: row.get(3)?,
    home_team:   row.get(4)?,
    away_team:   row.get(5)?,
    time:        row.get(6)?,
    venue:       row.get(7)?,
    referee:     row.get(8)?,
    created_at:  row.get(9)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A fixtures store backed by a single SQLite file.
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

// ─── FixtureStore impl ───────────────────────────────────────────────────────

impl FixtureStore for SqliteStore {
  type Error = Error;

  async fn upsert(&self, fixtures: Vec<RawFixture>) -> Result<usize> {
    if fixtures.is_empty() {
      return Ok(0);
    }

    // date_parsed is computed here, at the write boundary, so it is always
    // populated and always a pure function of `date`.
    let rows: Vec<(RawFixture, String)> = fixtures
      .into_iter()
      .map(|f| {
        let date_parsed = encode_date(normalize_date(&f.date));
        (f, date_parsed)
      })
      .collect();

    let inserted = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "INSERT OR IGNORE INTO fixtures
             (date, date_parsed, competition, home_team, away_team,
              time, venue, referee, raw_source, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )?;

        // Each insert commits on its own; a run abandoned part-way leaves
        // the committed rows valid because the whole operation is
        // idempotent.
        let mut inserted = 0usize;
        for (f, date_parsed) in rows {
          inserted += stmt.execute(rusqlite::params![
            f.date,
            date_parsed,
            f.competition,
            f.home_team,
            f.away_team,
            f.time,
            f.venue,
            f.referee,
            f.raw_source,
            encode_dt(f.created_at),
          ])?;
        }
        Ok(inserted)
      })
      .await?;

    Ok(inserted)
  }

  async fn query(&self, query: &FixtureQuery) -> Result<Page> {
    // Build WHERE clause dynamically.
    let mut conds: Vec<&'static str> = vec![];
    let mut params: Vec<rusqlite::types::Value> = vec![];

    if !query.include_past {
      conds.push("date_parsed >= ?");
      params.push(encode_date(query.today).into());
    }
    if let Some(venue) = &query.venue {
      conds.push("venue LIKE ?");
      params.push(format!("%{venue}%").into());
    }
    if let Some(competition) = &query.competition {
      conds.push("competition = ?");
      params.push(competition.clone().into());
    }

    let where_clause = if conds.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", conds.join(" AND "))
    };

    let limit  = i64::from(query.limit);
    let offset = i64::from(query.offset);

    let (raws, total): (Vec<RawRow>, u64) = self
      .conn
      .call(move |conn| {
        let total: i64 = conn.query_row(
          &format!("SELECT COUNT(*) FROM fixtures {where_clause}"),
          rusqlite::params_from_iter(params.iter()),
          |r| r.get(0),
        )?;

        let sql = format!(
          "SELECT {FIXTURE_COLUMNS}
           FROM fixtures {where_clause}
           ORDER BY date_parsed ASC, time ASC
           LIMIT ? OFFSET ?"
        );
        let mut stmt = conn.prepare(&sql)?;

        let mut page_params = params;
        page_params.push(limit.into());
        page_params.push(offset.into());

        let rows = stmt
          .query_map(rusqlite::params_from_iter(page_params.iter()), row_to_raw)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((rows, total as u64))
      })
      .await?;

    let fixtures = raws
      .into_iter()
      .map(RawRow::into_fixture)
      .collect::<Result<Vec<Fixture>>>()?;

    Ok(Page { fixtures, total })
  }

  async fn get(&self, id: i64) -> Result<Option<Fixture>> {
    let raw: Option<RawRow> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {FIXTURE_COLUMNS} FROM fixtures WHERE id = ?1"),
              rusqlite::params![id],
              row_to_raw,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawRow::into_fixture).transpose()
  }

  async fn distinct(&self, field: DistinctField) -> Result<Vec<String>> {
    let column = match field {
      DistinctField::Venue       => "venue",
      DistinctField::Competition => "competition",
    };
    let sql = format!(
      "SELECT DISTINCT {column} FROM fixtures WHERE {column} != '' ORDER BY {column}"
    );

    let values = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], |r| r.get::<_, String>(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(values)
  }

  async fn status(&self) -> Result<StoreStatus> {
    let (total, last): (i64, Option<String>) = self
      .conn
      .call(|conn| {
        let total: i64 =
          conn.query_row("SELECT COUNT(*) FROM fixtures", [], |r| r.get(0))?;
        let last: Option<String> =
          conn.query_row("SELECT MAX(created_at) FROM fixtures", [], |r| r.get(0))?;
        Ok((total, last))
      })
      .await?;

    Ok(StoreStatus {
      total:            total as u64,
      last_ingested_at: last.as_deref().map(decode_dt).transpose()?,
    })
  }
}
