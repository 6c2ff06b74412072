//! SQL schema for the Sliotar SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The UNIQUE constraint is the natural key that makes ingestion
/// idempotent: re-running the pipeline over an unchanged listing inserts
/// nothing.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS fixtures (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    date        TEXT NOT NULL,   -- raw display string
    date_parsed TEXT NOT NULL,   -- ISO 8601; '9999-12-31' when unparseable
    competition TEXT NOT NULL,
    home_team   TEXT NOT NULL,
    away_team   TEXT NOT NULL,
    time        TEXT NOT NULL,   -- 'HH:MM' or ''
    venue       TEXT NOT NULL,
    referee     TEXT NOT NULL,
    raw_source  TEXT NOT NULL,   -- verbatim markup fragment, audit only
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC; set at extraction time
    UNIQUE (date, competition, home_team, away_team, time)
);

CREATE INDEX IF NOT EXISTS fixtures_date_parsed_idx ON fixtures(date_parsed);
CREATE INDEX IF NOT EXISTS fixtures_competition_idx ON fixtures(competition);

PRAGMA user_version = 1;
";
