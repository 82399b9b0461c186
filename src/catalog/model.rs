//! Serializable representation of one library file entry.
//!
//! `Book` mirrors the persisted schema field-for-field so save/load can
//! round-trip records without ad-hoc JSON handling. Construction always
//! allocates a fresh id; deserialization keeps the id and status found in
//! the file.

use crate::catalog::identity::{BookId, BookStatus, SearchField};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// One catalog entry. Field values are stored verbatim; the core applies no
/// plausibility checks to title, author, or year.
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub status: BookStatus,
}

impl Book {
    /// Create a new record with a fresh unique id and `available` status.
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Book {
            id: BookId::generate(),
            title: title.into(),
            author: author.into(),
            year,
            status: BookStatus::Available,
        }
    }

    /// String form of the requested field, as used by substring search.
    ///
    /// `year` matches against its decimal representation, so a query of
    /// "49" matches both 1949 and 4900.
    pub fn field_text(&self, field: SearchField) -> String {
        match field {
            SearchField::Title => self.title.clone(),
            SearchField::Author => self.author.clone(),
            SearchField::Year => self.year.to_string(),
        }
    }

    /// Case-insensitive substring containment of `query` in the field text.
    pub fn field_matches(&self, field: SearchField, query: &str) -> bool {
        self.field_text(field)
            .to_lowercase()
            .contains(&query.to_lowercase())
    }
}

/// Read and parse a library file into records without touching any store.
///
/// Deserialization rejects missing fields, mistyped values, and statuses
/// outside the closed set; callers wrap the error with load context.
pub fn read_books_from_path(path: &Path) -> Result<Vec<Book>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading library file {}", path.display()))?;
    let books: Vec<Book> = serde_json::from_str(&data)
        .with_context(|| format!("parsing library file {}", path.display()))?;
    Ok(books)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_book_starts_available_with_fresh_id() {
        let a = Book::new("1984", "George Orwell", 1949);
        let b = Book::new("1984", "George Orwell", 1949);
        assert_eq!(a.status, BookStatus::Available);
        assert_ne!(a.id, b.id);
        assert_eq!(a.title, "1984");
        assert_eq!(a.author, "George Orwell");
        assert_eq!(a.year, 1949);
    }

    #[test]
    fn book_serde_round_trip_keeps_id_and_status() {
        let mut book = Book::new("Мастер и Маргарита", "Михаил Булгаков", 1966);
        book.status = BookStatus::CheckedOut;
        let json = serde_json::to_string(&book).unwrap();
        let back: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(back, book);
        assert_eq!(back.id, book.id);
        assert_eq!(back.status, BookStatus::CheckedOut);
    }

    #[test]
    fn deserialize_rejects_missing_fields() {
        let missing_author = r#"{"id":"x","title":"1984","year":1949,"status":"available"}"#;
        assert!(serde_json::from_str::<Book>(missing_author).is_err());

        let mistyped_year =
            r#"{"id":"x","title":"1984","author":"Orwell","year":"1949","status":"available"}"#;
        assert!(serde_json::from_str::<Book>(mistyped_year).is_err());

        let bad_status =
            r#"{"id":"x","title":"1984","author":"Orwell","year":1949,"status":"lost"}"#;
        assert!(serde_json::from_str::<Book>(bad_status).is_err());
    }

    #[test]
    fn field_matching_is_case_insensitive_substring() {
        let book = Book::new("Brave New World", "Aldous Huxley", 1932);
        assert!(book.field_matches(SearchField::Title, "brave"));
        assert!(book.field_matches(SearchField::Author, "HUXLEY"));
        assert!(book.field_matches(SearchField::Year, "193"));
        assert!(!book.field_matches(SearchField::Author, "Orwell"));
    }
}
