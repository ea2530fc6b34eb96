//! Data types shared by all resource clients.
//!
//! Records are deliberately untyped: the remote API owns the schema, and
//! fields it chooses not to persist are passed through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use strum::{Display, EnumIter};

/// One entity as returned by the API.
pub type Record = Map<String, Value>;

/// Top-level collections exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Resource {
    Properties,
    Contacts,
    Agents,
    Teams,
    Tags,
    Users,
}

impl Resource {
    pub fn collection_path(&self) -> String {
        format!("/{}", self)
    }

    pub fn item_path(&self, id: u64) -> String {
        format!("/{}/{}", self, id)
    }
}

/// Collections nested under a single property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum PropertySubResource {
    Documents,
    Emails,
    Notes,
    Tasks,
    Contacts,
}

impl PropertySubResource {
    pub fn collection_path(&self, property_id: u64) -> String {
        format!("/properties/{}/{}", property_id, self)
    }

    pub fn item_path(&self, property_id: u64, id: u64) -> String {
        format!("/properties/{}/{}/{}", property_id, self, id)
    }
}

/// Query parameters for `list` calls.
///
/// `limit` and `offset` are typed since every collection understands them;
/// anything else (filters, sort keys) goes through [`ListParams::param`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    limit: Option<u32>,
    offset: Option<u32>,
    extra: BTreeMap<String, String>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.extra.insert(key.into(), value.to_string());
        self
    }

    pub fn get_limit(&self) -> Option<u32> {
        self.limit
    }

    /// Query pairs in a stable order: `limit`, `offset`, then extras by key.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.extra.len() + 2);
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }
        for (key, value) in &self.extra {
            if key == "limit" || key == "offset" {
                continue;
            }
            pairs.push((key.clone(), value.clone()));
        }
        pairs
    }
}

/// Result of a successful `delete` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub id: u64,
}

impl DeleteConfirmation {
    /// Build a confirmation from whatever the server sent back.
    ///
    /// A 2xx status already means success, so missing keys fall back to
    /// `success = true` and the id that was asked for.
    pub fn from_response(requested_id: u64, body: &Record) -> Self {
        let success = body.get("success").and_then(Value::as_bool).unwrap_or(true);
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        let id = body
            .get("id")
            .and_then(|v| v.as_u64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))
            .unwrap_or(requested_id);

        DeleteConfirmation {
            success,
            message,
            id,
        }
    }
}
