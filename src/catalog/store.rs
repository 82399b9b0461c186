//! The in-memory book collection and its persistence operations.
//!
//! `Catalog` holds the one mutable collection in the program. Insertion
//! order is the only defined order; no operation ever sorts. Load replaces
//! the collection wholesale and only after the incoming file has fully
//! validated, so a failed load leaves the live collection untouched. Save
//! writes through a temp file in the destination directory so no partial
//! file is observable at the target path.

use crate::catalog::identity::{BookId, BookStatus, SearchField};
use crate::catalog::model::Book;
use crate::schema::validate_library_value;
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Default)]
/// Ordered collection of book records plus load/save/query operations.
///
/// Constructed once by the binary and passed by reference to the command
/// loop; there is no hidden global instance.
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freshly created record and return it.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
    ) -> &Book {
        self.books.push(Book::new(title, author, year));
        let idx = self.books.len() - 1;
        &self.books[idx]
    }

    /// Remove the first record with a matching id, returning it.
    ///
    /// `None` means the id is absent; the collection is unchanged and the
    /// order of the remaining records is preserved.
    pub fn remove(&mut self, id: &BookId) -> Option<Book> {
        let idx = self.books.iter().position(|book| &book.id == id)?;
        Some(self.books.remove(idx))
    }

    /// All records matching `query` against `field`, in collection order.
    ///
    /// Matching is case-insensitive substring containment; `year` matches
    /// against its decimal string, so "49" matches 1949 and 4900 alike.
    /// An empty result is a valid outcome, not an error.
    pub fn search(&self, field: SearchField, query: &str) -> Vec<&Book> {
        self.books
            .iter()
            .filter(|book| book.field_matches(field, query))
            .collect()
    }

    /// The full collection in insertion order.
    pub fn list(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Overwrite the status of the record with a matching id.
    ///
    /// Invalid statuses cannot reach this method; the boundary parses the
    /// token into `BookStatus` first. `None` means no record carries the id
    /// and nothing was changed.
    pub fn update_status(&mut self, id: &BookId, status: BookStatus) -> Option<&Book> {
        let book = self.books.iter_mut().find(|book| &book.id == id)?;
        book.status = status;
        Some(&*book)
    }

    /// Replace the collection with the contents of the file at `path`.
    ///
    /// The file is read, schema-validated, and deserialized into a temporary
    /// collection; only on full success is the temporary swapped in. Any
    /// failure (missing file, unparseable JSON, schema violation, duplicate
    /// ids) leaves the live collection exactly as it was.
    pub fn load(&mut self, path: &Path) -> Result<usize> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading library file {}", path.display()))?;
        let value: Value = serde_json::from_str(&data)
            .with_context(|| format!("parsing library file {}", path.display()))?;
        let incoming = parse_library_value(value)
            .with_context(|| format!("validating library file {}", path.display()))?;
        self.books = incoming;
        Ok(self.books.len())
    }

    /// Serialize the collection to `path` as a pretty-printed JSON array.
    ///
    /// Writes into a named temp file in the destination directory and then
    /// persists it over `path`, so a reader in this process never observes a
    /// partial file. The collection itself is never mutated.
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = parent_dir(path);
        let mut tmp = NamedTempFile::new_in(&dir)
            .with_context(|| format!("creating temp file in {}", dir.display()))?;
        serde_json::to_writer_pretty(&mut tmp, &self.books)
            .with_context(|| format!("serializing {} book(s)", self.books.len()))?;
        tmp.persist(path)
            .with_context(|| format!("writing library file {}", path.display()))?;
        Ok(())
    }
}

/// Validate and deserialize a parsed library file value.
///
/// Shared by `Catalog::load` and the `catalog-check` binary so both enforce
/// the same contract: schema-conformant entries and unique ids.
pub fn parse_library_value(value: Value) -> Result<Vec<Book>> {
    validate_library_value(&value)?;
    let books: Vec<Book> =
        serde_json::from_value(value).context("deserializing library records")?;
    ensure_unique_ids(&books)?;
    Ok(books)
}

fn ensure_unique_ids(books: &[Book]) -> Result<()> {
    let mut seen: BTreeSet<&BookId> = BTreeSet::new();
    for book in books {
        if !seen.insert(&book.id) {
            bail!("duplicate book id {}", book.id);
        }
    }
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
