//! Shared library for the bookcase catalog tools.
//!
//! The crate exposes the book catalog core (records, the ordered in-memory
//! collection, and its whole-file JSON persistence) plus the interactive
//! command loop driven by the `bookcase` binary. The persisted file format
//! is pinned by `schema/library.schema.json`; everything that reads a
//! library file validates against that schema before accepting records, so
//! the binaries and the tests agree on one contract.

use std::env;
use std::path::PathBuf;

pub mod catalog;
pub mod menu;
pub mod schema;

pub use catalog::{Book, BookId, BookStatus, Catalog, SearchField, read_books_from_path};
pub use menu::run_menu;
pub use schema::validate_library_value;

const DEFAULT_LIBRARY_FILE: &str = "library.json";
const LIBRARY_PATH_ENV: &str = "BOOKCASE_LIBRARY";

/// The library file used when the user does not name one.
///
/// Honors `BOOKCASE_LIBRARY` when set and non-empty, falling back to
/// `library.json` in the working directory.
pub fn default_library_path() -> PathBuf {
    env::var_os(LIBRARY_PATH_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LIBRARY_FILE))
}
