//! CRUD clients for the API's collections.
//!
//! [`ResourceClient`] serves the top-level collections and
//! [`PropertyResourceClient`] the ones nested under a property. Both hand
//! records back exactly as the server sent them.

mod collection;
mod property;

pub use collection::ResourceClient;
pub use property::PropertyResourceClient;

use serde_json::Value;
use tracing::warn;

use crate::error::{OpenToCloseError, Result};
use crate::model::Record;

/// Expect a single JSON object.
pub(crate) fn into_record(value: Value) -> Result<Record> {
    match value {
        Value::Object(record) => Ok(record),
        other => Err(OpenToCloseError::UnexpectedResponse(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Expect a list of objects, either bare or wrapped as `{"data": [...]}`.
///
/// An envelope without a `data` key is rejected rather than read as empty.
///
/// At most `limit` records are returned when a limit was requested.
pub(crate) fn into_records(value: Value, limit: Option<u32>) -> Result<Vec<Record>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(Value::Array(items)) => items,
            Some(Value::Null) => Vec::new(),
            None => {
                return Err(OpenToCloseError::UnexpectedResponse(
                    "expected a JSON array or an object with a \"data\" array".to_string(),
                ))
            }
            Some(other) => {
                return Err(OpenToCloseError::UnexpectedResponse(format!(
                    "expected \"data\" to be an array, got {}",
                    json_kind(&other)
                )))
            }
        },
        Value::Null => Vec::new(),
        other => {
            return Err(OpenToCloseError::UnexpectedResponse(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            )))
        }
    };

    let mut records = items
        .into_iter()
        .map(into_record)
        .collect::<Result<Vec<_>>>()?;

    if let Some(limit) = limit {
        let limit = limit as usize;
        if records.len() > limit {
            warn!(
                "Server returned {} records for limit {}, truncating",
                records.len(),
                limit
            );
            records.truncate(limit);
        }
    }

    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
