//! Read queries over the `books` table.

use bookshelf_types::Book;
use rusqlite::{Connection, OptionalExtension, Row};
use thiserror::Error;

/// Errors returned by read queries.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The statement could not be prepared, executed, or mapped.
    #[error("book query failed: {0}")]
    Database(#[from] rusqlite::Error),
}

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        year: row.get(3)?,
    })
}

/// Returns every book in the order the store yields them.
///
/// No `ORDER BY` is applied; callers must not depend on row order. An empty
/// table yields an empty vector.
pub fn list_books(conn: &Connection) -> Result<Vec<Book>, QueryError> {
    let mut stmt = conn.prepare_cached("SELECT id, title, author, year FROM books")?;
    let books = stmt
        .query_map([], book_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(books)
}

/// Looks up a single book by primary key.
///
/// Returns `Ok(None)` when no row matches; that is not an error.
pub fn get_book(conn: &Connection, id: i64) -> Result<Option<Book>, QueryError> {
    let book = conn
        .prepare_cached("SELECT id, title, author, year FROM books WHERE id = ?1")?
        .query_row([id], book_from_row)
        .optional()?;
    Ok(book)
}

/// Returns the number of rows in the `books` table.
pub fn count_books(conn: &Connection) -> Result<i64, QueryError> {
    let count = conn.query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ensure_schema, initialize};
    use bookshelf_types::SEED_BOOKS;
    use std::collections::HashSet;

    fn seeded_db() -> Connection {
        let conn = Connection::open_in_memory().expect("should open in-memory db");
        initialize(&conn).expect("initialize should succeed");
        conn
    }

    #[test]
    fn list_returns_seed_set() {
        let conn = seeded_db();
        let books: HashSet<Book> = list_books(&conn)
            .expect("list should succeed")
            .into_iter()
            .collect();
        let expected: HashSet<Book> = SEED_BOOKS.iter().map(|s| s.to_book()).collect();
        assert_eq!(books, expected);
    }

    #[test]
    fn list_empty_table_returns_empty_vec() {
        let conn = Connection::open_in_memory().expect("should open in-memory db");
        ensure_schema(&conn).expect("schema should be created");
        let books = list_books(&conn).expect("list should succeed");
        assert!(books.is_empty());
    }

    #[test]
    fn get_existing_book() {
        let conn = seeded_db();
        let book = get_book(&conn, 1)
            .expect("get should succeed")
            .expect("book 1 should exist");
        assert_eq!(book.title, "The Rust Programming Language");
        assert_eq!(book.author, "Steve Klabnik");
        assert_eq!(book.year, 2019);
    }

    #[test]
    fn get_missing_book_is_none() {
        let conn = seeded_db();
        assert!(get_book(&conn, 9999).expect("get should succeed").is_none());
        assert!(get_book(&conn, -1).expect("get should succeed").is_none());
    }

    #[test]
    fn missing_table_is_an_error_not_none() {
        let conn = Connection::open_in_memory().expect("should open in-memory db");
        assert!(matches!(get_book(&conn, 1), Err(QueryError::Database(_))));
        assert!(matches!(list_books(&conn), Err(QueryError::Database(_))));
    }

    #[test]
    fn count_matches_seed_len() {
        let conn = seeded_db();
        assert_eq!(count_books(&conn).expect("count should succeed"), 5);
    }
}
