#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use sqlx::sqlite;
use std::{
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};
use tokio::try_join;

pub mod config;
mod r#impl;
pub mod types;

use config::SqliteConfig;

// Each in-memory Db needs its own shared-cache namespace: a bare ":memory:"
// gives every pooled connection a private database, and a single fixed URI
// would leak state between databases opened in the same process.
static MEMORY_SEQ: AtomicU64 = AtomicU64::new(0);

/// SQLite database implementation of the `tender-core` repositories.
///
/// Holds two pools over the same database: `reader` for concurrent reads and
/// `writer` limited to one connection so all writes are serialized. That
/// single-writer discipline is load-bearing: together with the guarded
/// statements in the repository impls it linearizes offer upserts and makes
/// every lifecycle compare-and-set race produce exactly one winner.
#[derive(Clone)]
pub struct Db {
    /// Connection pool for read operations
    pub reader: sqlx::Pool<sqlx::Sqlite>,
    /// Connection pool for write operations (limited to 1 connection)
    pub writer: sqlx::Pool<sqlx::Sqlite>,
}

impl Db {
    /// Open (and if necessary create) the configured database, applying any
    /// pending migrations before returning.
    ///
    /// File-backed databases run in WAL mode with a busy timeout; an
    /// unconfigured path yields a fresh in-memory database shared between
    /// this `Db`'s pools.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the connection cannot be established or a
    /// migration fails to apply.
    pub async fn open(config: &SqliteConfig) -> Result<Self, sqlx::Error> {
        let target = match &config.database_path {
            Some(path) => path.to_string_lossy().into_owned(),
            None => format!(
                "file:tender-mem-{}?mode=memory&cache=shared",
                MEMORY_SEQ.fetch_add(1, Ordering::Relaxed)
            ),
        };

        let options = sqlite::SqliteConnectOptions::from_str(&target)?
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true)
            .journal_mode(sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlite::SqliteSynchronous::Normal)
            .create_if_missing(config.create_if_missing);

        let reader = sqlite::SqlitePoolOptions::new().connect_with(options.clone());
        let writer = sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options);

        let (reader, writer) = try_join!(reader, writer)?;

        sqlx::migrate!("./schema").run(&writer).await?;

        Ok(Self { reader, writer })
    }
}
