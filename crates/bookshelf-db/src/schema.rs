//! Schema creation and seed data.
//!
//! The store has a single table. [`initialize`] creates it if absent and
//! inserts [`SEED_BOOKS`] with `INSERT OR IGNORE`, so it can run on every
//! start against an existing file without duplicating or overwriting rows.

use bookshelf_types::SEED_BOOKS;
use rusqlite::{params, Connection};
use thiserror::Error;

use crate::pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};

const CREATE_BOOKS_TABLE: &str = "CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    year INTEGER NOT NULL
);";

const INSERT_SEED_BOOK: &str =
    "INSERT OR IGNORE INTO books (id, title, author, year) VALUES (?1, ?2, ?3, ?4)";

/// Errors that abort startup while preparing the store.
#[derive(Debug, Error)]
pub enum InitError {
    /// The pool (and therefore the database file) could not be opened.
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// No connection could be checked out for initialization.
    #[error("failed to get database connection for initialization: {0}")]
    Checkout(#[from] r2d2::Error),

    /// Creating the `books` table failed.
    #[error("failed to create books table: {0}")]
    Schema(#[source] rusqlite::Error),

    /// The seed insert could not be prepared against the existing table.
    #[error("failed to prepare seed insert: {0}")]
    SeedStatement(#[source] rusqlite::Error),

    /// Writing a seed row failed.
    #[error("failed to seed book {id}: {source}")]
    Seed {
        /// The seed row that failed.
        id: i64,
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },

    /// Opening or committing the seed transaction failed.
    #[error("seed transaction failed: {0}")]
    Transaction(#[source] rusqlite::Error),
}

/// Creates the `books` table if it does not already exist.
///
/// # Errors
///
/// Returns `InitError::Schema` if the statement fails.
pub fn ensure_schema(conn: &Connection) -> Result<(), InitError> {
    conn.execute_batch(CREATE_BOOKS_TABLE)
        .map_err(InitError::Schema)
}

/// Inserts the seed catalog, skipping ids that already exist.
///
/// All rows are written in one transaction. Returns the number of rows
/// actually inserted: the full seed count on a fresh table, zero on a re-run.
///
/// # Errors
///
/// Returns `InitError::SeedStatement` if the insert cannot be prepared
/// against the existing table, `InitError::Seed` naming the first row that
/// failed, or `InitError::Transaction` if the transaction cannot be opened
/// or committed.
pub fn seed_books(conn: &Connection) -> Result<usize, InitError> {
    let tx = conn
        .unchecked_transaction()
        .map_err(InitError::Transaction)?;

    let mut inserted = 0;
    {
        let mut stmt = tx
            .prepare(INSERT_SEED_BOOK)
            .map_err(InitError::SeedStatement)?;

        for seed in SEED_BOOKS {
            inserted += stmt
                .execute(params![seed.id, seed.title, seed.author, seed.year])
                .map_err(|e| InitError::Seed {
                    id: seed.id,
                    source: e,
                })?;
        }
    }

    tx.commit().map_err(InitError::Transaction)?;

    Ok(inserted)
}

/// Ensures the schema exists and the seed rows are present.
///
/// Safe to call against a populated database; existing rows are left as
/// they are.
///
/// # Errors
///
/// Returns `InitError` if the table cannot be created or seeding fails.
pub fn initialize(conn: &Connection) -> Result<usize, InitError> {
    ensure_schema(conn)?;
    let inserted = seed_books(conn)?;

    if inserted > 0 {
        tracing::info!(count = inserted, "seeded books table");
    } else {
        tracing::debug!("seed rows already present, nothing inserted");
    }

    Ok(inserted)
}

/// Opens the pool for `db_path` and runs [`initialize`] on one connection.
///
/// This is the single startup routine: the returned pool is ready to be
/// handed to the request layer.
///
/// # Errors
///
/// Returns `InitError` if the file cannot be opened, no connection can be
/// checked out, or initialization fails.
pub fn open_store(db_path: &str, settings: DbRuntimeSettings) -> Result<DbPool, InitError> {
    let pool = create_pool(db_path, settings)?;
    {
        let conn = pool.get()?;
        initialize(&conn)?;
    }
    Ok(pool)
}
