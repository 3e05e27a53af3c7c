//! Database layer for the Bookshelf service.
//!
//! Provides SQLite connection pooling (via `r2d2`), WAL-mode initialization,
//! the one-time schema and seed routine, and the read queries used by the
//! HTTP handlers.
//!
//! The pool is a connection factory: it is built once at startup, shared by
//! all handlers, and every handler checks out its own connection for the
//! duration of a single statement.

mod books;
mod pool;
mod schema;

pub use books::{count_books, get_book, list_books, QueryError};
pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};
pub use schema::{ensure_schema, initialize, open_store, seed_books, InitError};
