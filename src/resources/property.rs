use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use super::{into_record, into_records};
use crate::error::Result;
use crate::http_utils::HttpClient;
use crate::model::{DeleteConfirmation, ListParams, PropertySubResource, Record};

/// CRUD operations on a collection scoped to one property, e.g.
/// `/properties/{property_id}/notes`.
///
/// Same contract as [`super::ResourceClient`], with the owning property's id
/// as the leading argument of every call.
#[derive(Debug, Clone)]
pub struct PropertyResourceClient {
    http: Arc<HttpClient>,
    sub_resource: PropertySubResource,
}

impl PropertyResourceClient {
    pub(crate) fn new(http: Arc<HttpClient>, sub_resource: PropertySubResource) -> Self {
        Self { http, sub_resource }
    }

    pub fn sub_resource(&self) -> PropertySubResource {
        self.sub_resource
    }

    pub async fn list(
        &self,
        property_id: u64,
        params: Option<&ListParams>,
    ) -> Result<Vec<Record>> {
        debug!("Listing {} of property {}...", self.sub_resource, property_id);
        let query = params.map(ListParams::to_query_pairs).unwrap_or_default();
        let value = self
            .http
            .get(&self.sub_resource.collection_path(property_id), &query)
            .await?;
        into_records(value, params.and_then(ListParams::get_limit))
    }

    pub async fn create<B>(&self, property_id: u64, data: &B) -> Result<Record>
    where
        B: Serialize + ?Sized,
    {
        debug!("Adding {} to property {}...", self.sub_resource, property_id);
        let value = self
            .http
            .post(&self.sub_resource.collection_path(property_id), data)
            .await?;
        into_record(value)
    }

    pub async fn retrieve(&self, property_id: u64, id: u64) -> Result<Record> {
        debug!(
            "Retrieving {} {} of property {}...",
            self.sub_resource, id, property_id
        );
        let value = self
            .http
            .get(&self.sub_resource.item_path(property_id, id), &[])
            .await?;
        into_record(value)
    }

    pub async fn update<B>(&self, property_id: u64, id: u64, data: &B) -> Result<Record>
    where
        B: Serialize + ?Sized,
    {
        debug!(
            "Updating {} {} of property {}...",
            self.sub_resource, id, property_id
        );
        let value = self
            .http
            .put(&self.sub_resource.item_path(property_id, id), data)
            .await?;
        into_record(value)
    }

    pub async fn delete(&self, property_id: u64, id: u64) -> Result<DeleteConfirmation> {
        debug!(
            "Removing {} {} from property {}...",
            self.sub_resource, id, property_id
        );
        let value = self
            .http
            .delete(&self.sub_resource.item_path(property_id, id))
            .await?;
        Ok(DeleteConfirmation::from_response(id, &into_record(value)?))
    }
}
