use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier for a single book record.
///
/// Generated once at creation and carried verbatim through save/load so
/// callers can reference records across sessions. Serialized transparently
/// as a JSON string.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub String);

impl BookId {
    /// Allocate a fresh process-unique id. Ids are never reused.
    pub fn generate() -> Self {
        BookId(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Availability of a book. Closed two-valued set; anything else is rejected
/// at the boundary before it can reach the store or the library file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BookStatus {
    Available,
    CheckedOut,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::CheckedOut => "checked_out",
        }
    }

    /// Parse a user- or file-supplied status token.
    ///
    /// Returns `None` for anything outside the closed set so callers report
    /// the invalid value without touching catalog state.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "available" => Some(BookStatus::Available),
            "checked_out" => Some(BookStatus::CheckedOut),
            _ => None,
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BookStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BookStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        BookStatus::parse(&value).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unknown status '{value}' (expected available|checked_out)"
            ))
        })
    }
}

/// Field a search query runs against.
///
/// Closed set mirroring the record's searchable fields; the menu parses the
/// user's token into this enum and reports anything else as an invalid field
/// without scanning the collection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchField {
    Title,
    Author,
    Year,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Year => "year",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "title" => Some(SearchField::Title),
            "author" => Some(SearchField::Author),
            "year" => Some(SearchField::Year),
            _ => None,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
