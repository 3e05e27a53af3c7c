//! Shared types for the Bookshelf service.
//!
//! This crate holds the `Book` record served over HTTP and the fixed seed
//! catalog written on first start. Both the database layer and the server
//! depend on it, so the wire shape of a book is defined in exactly one place.

use serde::{Deserialize, Serialize};

/// A single catalog entry.
///
/// Serializes as `{"id": .., "title": .., "author": .., "year": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Book {
    /// Primary key. Seeded values are fixed; there is no create path.
    pub id: i64,
    /// Book title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Publication year. Not range-checked.
    pub year: i32,
}

/// A compile-time seed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedBook {
    pub id: i64,
    pub title: &'static str,
    pub author: &'static str,
    pub year: i32,
}

impl SeedBook {
    /// Returns the owned [`Book`] this seed row produces once stored.
    pub fn to_book(self) -> Book {
        Book {
            id: self.id,
            title: self.title.to_string(),
            author: self.author.to_string(),
            year: self.year,
        }
    }
}

/// Rows inserted (insert-or-ignore) by the startup initializer.
pub const SEED_BOOKS: &[SeedBook] = &[
    SeedBook {
        id: 1,
        title: "The Rust Programming Language",
        author: "Steve Klabnik",
        year: 2019,
    },
    SeedBook {
        id: 2,
        title: "The Go Programming Language",
        author: "Alan Donovan",
        year: 2015,
    },
    SeedBook {
        id: 3,
        title: "Designing Data-Intensive Applications",
        author: "Martin Kleppmann",
        year: 2017,
    },
    SeedBook {
        id: 4,
        title: "Clean Code",
        author: "Robert C. Martin",
        year: 2008,
    },
    SeedBook {
        id: 5,
        title: "Structure and Interpretation of Computer Programs",
        author: "Harold Abelson",
        year: 1996,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_ids_are_unique() {
        let ids: HashSet<i64> = SEED_BOOKS.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), SEED_BOOKS.len());
    }

    #[test]
    fn seed_text_fields_are_non_empty() {
        for seed in SEED_BOOKS {
            assert!(!seed.title.is_empty(), "seed {} has empty title", seed.id);
            assert!(!seed.author.is_empty(), "seed {} has empty author", seed.id);
        }
    }

    #[test]
    fn book_serializes_with_flat_field_names() {
        let book = SEED_BOOKS[0].to_book();
        let json = serde_json::to_value(&book).expect("book should serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "title": "The Rust Programming Language",
                "author": "Steve Klabnik",
                "year": 2019
            })
        );
    }
}
