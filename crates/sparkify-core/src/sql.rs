//! Warehouse SQL statements.
//!
//! One constant per statement, grouped into the four lists the pipelines run:
//! DROP, CREATE, COPY and INSERT. The COPY statements are the only ones that
//! depend on configuration, so they are rendered from [`Settings`] at run time.

use std::borrow::Cow;

use strum::{Display, EnumIter, IntoStaticStr};

use crate::Settings;

// ─── Tables ──────────────────────────────────────────────────────────────────

/// Every table in the warehouse, in the fixed order used by the schema
/// pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Table {
  StagingEvents,
  StagingSongs,
  Songplays,
  Users,
  Songs,
  Artists,
  Time,
}

impl Table {
  pub fn name(self) -> &'static str { self.into() }

  pub fn is_staging(self) -> bool {
    matches!(self, Self::StagingEvents | Self::StagingSongs)
  }
}

/// A statement together with the table it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
  pub table: Table,
  pub sql:   Cow<'static, str>,
}

impl Statement {
  const fn fixed(table: Table, sql: &'static str) -> Self {
    Self { table, sql: Cow::Borrowed(sql) }
  }
}

// ─── DROP ────────────────────────────────────────────────────────────────────

pub const DROP_TABLE_STAGING_EVENTS: &str = "DROP TABLE IF EXISTS staging_events;";
pub const DROP_TABLE_STAGING_SONGS: &str = "DROP TABLE IF EXISTS staging_songs;";
pub const DROP_TABLE_SONGPLAYS: &str = "DROP TABLE IF EXISTS songplays;";
pub const DROP_TABLE_USERS: &str = "DROP TABLE IF EXISTS users;";
pub const DROP_TABLE_SONGS: &str = "DROP TABLE IF EXISTS songs;";
pub const DROP_TABLE_ARTISTS: &str = "DROP TABLE IF EXISTS artists;";
pub const DROP_TABLE_TIME: &str = "DROP TABLE IF EXISTS time;";

// ─── CREATE ──────────────────────────────────────────────────────────────────

pub const CREATE_TABLE_STAGING_EVENTS: &str = "
CREATE TABLE staging_events (
userId              TEXT,
firstName           TEXT,
lastName            TEXT,
gender              TEXT,
level               TEXT,
artist              TEXT,
song                TEXT,
length              FLOAT,
sessionId           SMALLINT,
auth                TEXT,
itemInSession       SMALLINT,
location            TEXT,
registration        DECIMAL(13,0),
ts                  BIGINT,
page                TEXT,
userAgent           TEXT,
status              SMALLINT,
method              TEXT
) diststyle auto;
";

pub const CREATE_TABLE_STAGING_SONGS: &str = "
CREATE TABLE staging_songs (
song_id             TEXT,
title               TEXT,
duration            FLOAT,
year                INTEGER,
num_songs           INTEGER,
artist_id           TEXT,
artist_name         TEXT,
artist_location     TEXT,
artist_latitude     DOUBLE PRECISION,
artist_longitude    DOUBLE PRECISION
) diststyle auto;
";

pub const CREATE_TABLE_SONGPLAYS: &str = "
CREATE TABLE songplays (
songplay_id         TEXT                NOT NULL,
level               TEXT                NOT NULL,
location            TEXT                NOT NULL,
user_agent          TEXT                NOT NULL,
session_id          SMALLINT            NOT NULL,
user_id             INTEGER             NOT NULL,
song_id             TEXT                        ,
artist_id           TEXT                        ,
start_time          TIMESTAMP           NOT NULL
);
";

pub const CREATE_TABLE_USERS: &str = "
CREATE TABLE users (
user_id             INTEGER             NOT NULL,
first_name          TEXT                NOT NULL,
last_name           TEXT                NOT NULL,
gender              TEXT                NOT NULL,
level               TEXT                NOT NULL
);
";

pub const CREATE_TABLE_SONGS: &str = "
CREATE TABLE songs (
song_id             TEXT                NOT NULL,
title               TEXT                NOT NULL,
year                INTEGER             NOT NULL,
duration            FLOAT               NOT NULL,
artist_id           TEXT                NOT NULL
);
";

pub const CREATE_TABLE_ARTISTS: &str = "
CREATE TABLE artists (
artist_id           TEXT                NOT NULL,
name                TEXT                NOT NULL,
location            TEXT                NOT NULL,
latitude            DOUBLE PRECISION            ,
longitude           DOUBLE PRECISION
);
";

pub const CREATE_TABLE_TIME: &str = "
CREATE TABLE time (
start_time          TIMESTAMP           NOT NULL,
hour                NUMERIC(2)          NOT NULL,
day                 NUMERIC(2)          NOT NULL,
week                NUMERIC(2)          NOT NULL,
month               NUMERIC(2)          NOT NULL,
year                INTEGER             NOT NULL,
weekday             TEXT                NOT NULL
);
";

// ─── INSERT ──────────────────────────────────────────────────────────────────

// Every insert reads only from the staging tables, never from another
// fact/dimension table.

pub const INSERT_TABLE_SONGPLAYS: &str = "
INSERT INTO songplays
(
SELECT
CONCAT(CAST (e.userid AS VARCHAR), CONCAT(CAST (e.sessionid AS VARCHAR), CAST (e.iteminsession AS VARCHAR))) as songplay_id,
e.level AS level,
e.location AS location,
e.useragent AS user_agent,
e.sessionid AS session_id,
CAST (e.userid AS INTEGER) AS user_id,
s.song_id AS song_id,
s.artist_id AS artist_id,
TIMESTAMP 'epoch' + e.ts::float / 1000 * INTERVAL '1 second' AS start_time
FROM staging_events AS e
JOIN staging_songs  AS s
ON e.song = s.title AND e.artist = s.artist_name
WHERE e.page = 'NextSong'
ORDER BY e.ts
);
";

pub const INSERT_TABLE_USERS: &str = "
INSERT INTO users
(
SELECT
DISTINCT CAST (userid AS INTEGER) AS user_id,
firstname AS first_name,
lastname AS last_name,
TRIM (BOTH FROM gender) AS gender,
TRIM (BOTH FROM level) AS level
FROM staging_events
WHERE page = 'NextSong'
ORDER BY userId
);
";

pub const INSERT_TABLE_SONGS: &str = "
INSERT INTO songs
(
SELECT
DISTINCT s.song_id AS song_id,
s.title AS title,
s.year AS year,
s.duration AS duration,
s.artist_id AS artist_id
FROM staging_events AS e
JOIN staging_songs  AS s
ON e.song = s.title AND e.artist = s.artist_name
WHERE e.page = 'NextSong'
ORDER BY s.song_id
);
";

pub const INSERT_TABLE_ARTISTS: &str = "
INSERT INTO artists
(
SELECT
DISTINCT s.artist_id AS artist_id,
s.artist_name AS name,
s.artist_location AS location,
s.artist_latitude AS latitude,
s.artist_longitude AS longitude
FROM staging_events AS e
JOIN staging_songs AS s
ON e.song = s.title AND e.artist = s.artist_name
WHERE e.page = 'NextSong'
ORDER BY s.artist_id
);
";

pub const INSERT_TABLE_TIME: &str = "
INSERT INTO time
(
SELECT
DISTINCT TIMESTAMP 'epoch' + e.ts::float / 1000 * INTERVAL '1 second' AS start_time,
DATE_PART(hour, TIMESTAMP 'epoch' + e.ts::float / 1000 * INTERVAL '1 second') AS hour,
DATE_PART(day, TIMESTAMP 'epoch' + e.ts::float / 1000 * INTERVAL '1 second') AS day,
DATE_PART(week, TIMESTAMP 'epoch' + e.ts::float / 1000 * INTERVAL '1 second') AS week,
DATE_PART(month, TIMESTAMP 'epoch' + e.ts::float / 1000 * INTERVAL '1 second') AS month,
DATE_PART(year, TIMESTAMP 'epoch' + e.ts::float / 1000 * INTERVAL '1 second') AS year,
DATE_PART(dayofweek, TIMESTAMP 'epoch' + e.ts::float / 1000 * INTERVAL '1 second') AS weekday
FROM staging_events AS e
JOIN staging_songs  AS s
ON e.song = s.title AND e.artist = s.artist_name
WHERE e.page = 'NextSong'
ORDER BY e.ts
);
";

// ─── Statement lists ─────────────────────────────────────────────────────────

pub static DROP_TABLE_QUERIES: [Statement; 7] = [
  Statement::fixed(Table::StagingEvents, DROP_TABLE_STAGING_EVENTS),
  Statement::fixed(Table::StagingSongs, DROP_TABLE_STAGING_SONGS),
  Statement::fixed(Table::Songplays, DROP_TABLE_SONGPLAYS),
  Statement::fixed(Table::Users, DROP_TABLE_USERS),
  Statement::fixed(Table::Songs, DROP_TABLE_SONGS),
  Statement::fixed(Table::Artists, DROP_TABLE_ARTISTS),
  Statement::fixed(Table::Time, DROP_TABLE_TIME),
];

pub static CREATE_TABLE_QUERIES: [Statement; 7] = [
  Statement::fixed(Table::StagingEvents, CREATE_TABLE_STAGING_EVENTS),
  Statement::fixed(Table::StagingSongs, CREATE_TABLE_STAGING_SONGS),
  Statement::fixed(Table::Songplays, CREATE_TABLE_SONGPLAYS),
  Statement::fixed(Table::Users, CREATE_TABLE_USERS),
  Statement::fixed(Table::Songs, CREATE_TABLE_SONGS),
  Statement::fixed(Table::Artists, CREATE_TABLE_ARTISTS),
  Statement::fixed(Table::Time, CREATE_TABLE_TIME),
];

pub static INSERT_TABLE_QUERIES: [Statement; 5] = [
  Statement::fixed(Table::Songplays, INSERT_TABLE_SONGPLAYS),
  Statement::fixed(Table::Users, INSERT_TABLE_USERS),
  Statement::fixed(Table::Songs, INSERT_TABLE_SONGS),
  Statement::fixed(Table::Artists, INSERT_TABLE_ARTISTS),
  Statement::fixed(Table::Time, INSERT_TABLE_TIME),
];

// ─── COPY ────────────────────────────────────────────────────────────────────

/// `COPY staging_events` from `S3.LOG_DATA`.
pub fn copy_staging_events(settings: &Settings) -> String {
  format!(
    "
COPY staging_events
FROM '{}'
CREDENTIALS 'aws_iam_role={}'
FORMAT AS JSON 'auto ignorecase'
TIMEFORMAT 'YYYY-MM-DD HH:MI:SS'
region '{}';
",
    settings.s3.log_data, settings.iam.redshift_role_arn, settings.aws.region,
  )
}

/// `COPY staging_songs` from `S3.SONG_DATA`.
pub fn copy_staging_songs(settings: &Settings) -> String {
  format!(
    "
COPY staging_songs
FROM '{}'
CREDENTIALS 'aws_iam_role={}'
FORMAT AS JSON 'auto ignorecase'
region '{}';
",
    settings.s3.song_data, settings.iam.redshift_role_arn, settings.aws.region,
  )
}

/// The two bulk loads, one per staging table.
pub fn copy_table_queries(settings: &Settings) -> [Statement; 2] {
  [
    Statement {
      table: Table::StagingEvents,
      sql:   Cow::Owned(copy_staging_events(settings)),
    },
    Statement {
      table: Table::StagingSongs,
      sql:   Cow::Owned(copy_staging_songs(settings)),
    },
  ]
}
