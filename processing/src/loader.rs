use serde::Serialize;
use serde_json::{Value, ser::PrettyFormatter};
use std::{fs, path::Path};

use crate::{error::LoadError, value_path::kind_name};

/// Reads `path` and returns its top-level JSON array.
pub fn try_load_records(path: impl AsRef<Path>) -> Result<Vec<Value>, LoadError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Value = serde_json::from_str(&contents).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match document {
        Value::Array(records) => Ok(records),
        other => Err(LoadError::NotAList {
            path: path.to_path_buf(),
            found: kind_name(&other),
        }),
    }
}

/// Degrade-to-empty boundary: any load failure is logged and yields no records.
pub fn load_records(path: impl AsRef<Path>) -> Vec<Value> {
    let path = path.as_ref();
    match try_load_records(path) {
        Ok(records) => {
            tracing::info!(
                records = records.len(),
                "JSON file {:?} loaded successfully",
                path
            );
            records
        }
        Err(e) => {
            tracing::error!(error = %e, "Error loading JSON file");
            Vec::new()
        }
    }
}

/// Pretty-prints up to `limit` leading records as a JSON array indented by four spaces.
pub fn preview_records(records: &[Value], limit: usize) -> Result<String, serde_json::Error> {
    let sample = &records[..limit.min(records.len())];

    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    sample.serialize(&mut serializer)?;

    // serde_json only ever emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
