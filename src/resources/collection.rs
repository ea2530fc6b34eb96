use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use super::{into_record, into_records};
use crate::error::Result;
use crate::http_utils::HttpClient;
use crate::model::{DeleteConfirmation, ListParams, Record, Resource};

/// CRUD operations on one top-level collection, e.g. `/contacts`.
#[derive(Debug, Clone)]
pub struct ResourceClient {
    http: Arc<HttpClient>,
    resource: Resource,
}

impl ResourceClient {
    pub(crate) fn new(http: Arc<HttpClient>, resource: Resource) -> Self {
        Self { http, resource }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// List records, optionally filtered and paged by `params`.
    ///
    /// An empty collection is an empty vector, not an error.
    pub async fn list(&self, params: Option<&ListParams>) -> Result<Vec<Record>> {
        debug!("Listing {}...", self.resource);
        let query = params.map(ListParams::to_query_pairs).unwrap_or_default();
        let value = self
            .http
            .get(&self.resource.collection_path(), &query)
            .await?;
        into_records(value, params.and_then(ListParams::get_limit))
    }

    /// Create a record and return it as stored, including its new id.
    pub async fn create<B>(&self, data: &B) -> Result<Record>
    where
        B: Serialize + ?Sized,
    {
        debug!("Creating {} record...", self.resource);
        let value = self
            .http
            .post(&self.resource.collection_path(), data)
            .await?;
        into_record(value)
    }

    pub async fn retrieve(&self, id: u64) -> Result<Record> {
        debug!("Retrieving {} {}...", self.resource, id);
        let value = self.http.get(&self.resource.item_path(id), &[]).await?;
        into_record(value)
    }

    /// Apply a full or partial update. Only the supplied fields are sent.
    pub async fn update<B>(&self, id: u64, data: &B) -> Result<Record>
    where
        B: Serialize + ?Sized,
    {
        debug!("Updating {} {}...", self.resource, id);
        let value = self.http.put(&self.resource.item_path(id), data).await?;
        into_record(value)
    }

    pub async fn delete(&self, id: u64) -> Result<DeleteConfirmation> {
        debug!("Deleting {} {}...", self.resource, id);
        let value = self.http.delete(&self.resource.item_path(id)).await?;
        Ok(DeleteConfirmation::from_response(id, &into_record(value)?))
    }
}
