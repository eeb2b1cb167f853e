#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use sqlx::sqlite;
use tokio::try_join;

pub mod config;
mod error;
mod r#impl;
pub mod types;

pub use error::Error;

use config::SqliteConfig;

/// SQLite database implementation of the variant-store repositories.
///
/// Holds separate reader and writer connection pools: the reader allows
/// concurrent reads, the writer is capped at one connection so writes are
/// serialized, which is how SQLite wants to be used in WAL mode.
///
/// # Example
///
/// ```no_run
/// # use pvs_sqlite::{Db, config::SqliteConfig};
/// # async fn example() -> Result<(), pvs_sqlite::Error> {
/// let db = Db::open(&SqliteConfig::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Db {
    /// Connection pool for read operations.
    pub reader: sqlx::Pool<sqlx::Sqlite>,
    /// Connection pool for write operations (limited to 1 connection).
    pub writer: sqlx::Pool<sqlx::Sqlite>,
}

// Each in-memory database gets its own shared-cache name: two pools on a
// plain `:memory:` target would each see a private, empty database.
static MEMORY_DB_SEQ: AtomicU64 = AtomicU64::new(0);

impl Db {
    /// Open a connection to the specified SQLite database and apply any
    /// pending migrations.
    ///
    /// With no `database_path` configured, the store lives in memory and
    /// vanishes when the `Db` is dropped. The database is configured with
    /// WAL journaling, enforced foreign keys, and a busy timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Sql`] if the connection fails and
    /// [`Error::Migration`] if the schema cannot be brought up to date.
    pub async fn open(config: &SqliteConfig) -> Result<Self, Error> {
        let target = match config.database_path.as_ref() {
            Some(path) => path.to_string_lossy().into_owned(),
            None => format!(
                "file:pvs-mem-{}-{}?mode=memory&cache=shared",
                std::process::id(),
                MEMORY_DB_SEQ.fetch_add(1, Ordering::Relaxed),
            ),
        };

        let options = sqlite::SqliteConnectOptions::from_str(&target)?
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true)
            .journal_mode(sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlite::SqliteSynchronous::Normal)
            .pragma("journal_size_limit", "27103364")
            .pragma("temp_store", "memory")
            .create_if_missing(config.create_if_missing);

        // min_connections(1) keeps the writer's connection resident; for an
        // in-memory database, that connection is what keeps the store alive.
        let reader = sqlite::SqlitePoolOptions::new().connect_with(options.clone());
        let writer = sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .connect_with(options);

        let (reader, writer) = try_join!(reader, writer)?;

        sqlx::migrate!("./schema").run(&writer).await?;

        Ok(Self { reader, writer })
    }
}
