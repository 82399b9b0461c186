//! Embedded JSON Schema for the persisted library file.
//!
//! The schema under `schema/library.schema.json` is the machine-readable
//! form of the file contract: a JSON array of records carrying exactly the
//! id/title/author/year/status fields. Load paths validate parsed values
//! against the compiled schema before any record is deserialized, so a
//! malformed file is rejected as a whole.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::sync::OnceLock;

const LIBRARY_SCHEMA_JSON: &str = include_str!("../schema/library.schema.json");

static SCHEMA_VALUE: OnceLock<Value> = OnceLock::new();
static COMPILED: OnceLock<JSONSchema> = OnceLock::new();

fn compiled_schema() -> Result<&'static JSONSchema> {
    if let Some(schema) = COMPILED.get() {
        return Ok(schema);
    }
    let parsed: Value =
        serde_json::from_str(LIBRARY_SCHEMA_JSON).context("parsing embedded library schema")?;
    let value = SCHEMA_VALUE.get_or_init(|| parsed);
    let compiled = JSONSchema::compile(value)
        .map_err(|err| anyhow!("compiling embedded library schema: {err}"))?;
    Ok(COMPILED.get_or_init(|| compiled))
}

/// Validate a parsed library file value against the embedded schema.
///
/// Errors carry every violation the validator reports, one per line, so the
/// user sees the full shape of a broken file in a single failed load.
pub fn validate_library_value(value: &Value) -> Result<()> {
    let schema = compiled_schema()?;
    if let Err(errors) = schema.validate(value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!("library file failed schema validation:\n{details}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_a_conforming_file() {
        let value = json!([
            {
                "id": "abc",
                "title": "1984",
                "author": "George Orwell",
                "year": 1949,
                "status": "available"
            },
            {
                "id": "def",
                "title": "Brave New World",
                "author": "Aldous Huxley",
                "year": 1932,
                "status": "checked_out"
            }
        ]);
        assert!(validate_library_value(&value).is_ok());
    }

    #[test]
    fn accepts_an_empty_array() {
        assert!(validate_library_value(&json!([])).is_ok());
    }

    #[test]
    fn rejects_non_array_roots() {
        assert!(validate_library_value(&json!({"books": []})).is_err());
        assert!(validate_library_value(&json!("library")).is_err());
    }

    #[test]
    fn rejects_missing_and_extra_fields() {
        let missing = json!([{"id": "a", "title": "t", "author": "x", "year": 1}]);
        assert!(validate_library_value(&missing).is_err());

        let extra = json!([{
            "id": "a", "title": "t", "author": "x", "year": 1,
            "status": "available", "isbn": "978"
        }]);
        assert!(validate_library_value(&extra).is_err());
    }

    #[test]
    fn rejects_values_outside_the_status_set() {
        let value = json!([{
            "id": "a", "title": "t", "author": "x", "year": 1, "status": "lost"
        }]);
        let err = validate_library_value(&value).unwrap_err();
        assert!(format!("{err:#}").contains("schema validation"));
    }

    #[test]
    fn rejects_non_integer_years() {
        let value = json!([{
            "id": "a", "title": "t", "author": "x", "year": "1949", "status": "available"
        }]);
        assert!(validate_library_value(&value).is_err());
    }
}
