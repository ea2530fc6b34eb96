use std::sync::{Arc, OnceLock};

use crate::configuration::ClientConfig;
use crate::error::Result;
use crate::http_utils::HttpClient;
use crate::model::{PropertySubResource, Resource};
use crate::resources::{PropertyResourceClient, ResourceClient};

/// Entry point to the Open To Close API.
///
/// Holds the resolved configuration and one shared connection pool. Each
/// resource accessor builds its sub-client on first use and hands back that
/// same instance for the lifetime of this value.
#[derive(Debug)]
pub struct OpenToCloseApi {
    http: Arc<HttpClient>,
    properties: OnceLock<ResourceClient>,
    contacts: OnceLock<ResourceClient>,
    agents: OnceLock<ResourceClient>,
    teams: OnceLock<ResourceClient>,
    tags: OnceLock<ResourceClient>,
    users: OnceLock<ResourceClient>,
    property_documents: OnceLock<PropertyResourceClient>,
    property_emails: OnceLock<PropertyResourceClient>,
    property_notes: OnceLock<PropertyResourceClient>,
    property_tasks: OnceLock<PropertyResourceClient>,
    property_contacts: OnceLock<PropertyResourceClient>,
}

impl OpenToCloseApi {
    /// Create a client.
    ///
    /// `api_key` falls back to `OPEN_TO_CLOSE_API_KEY`; `base_url` falls back to
    /// `OPEN_TO_CLOSE_BASE_URL`, the configuration file, then the production
    /// URL. Fails with an authentication error, before any request, when no
    /// key can be found.
    pub fn new(api_key: Option<&str>, base_url: Option<&str>) -> Result<Self> {
        Self::from_config(ClientConfig::resolve(api_key, base_url)?)
    }

    pub fn from_env() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let http = Arc::new(HttpClient::new(config)?);
        Ok(Self {
            http,
            properties: OnceLock::new(),
            contacts: OnceLock::new(),
            agents: OnceLock::new(),
            teams: OnceLock::new(),
            tags: OnceLock::new(),
            users: OnceLock::new(),
            property_documents: OnceLock::new(),
            property_emails: OnceLock::new(),
            property_notes: OnceLock::new(),
            property_tasks: OnceLock::new(),
            property_contacts: OnceLock::new(),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }

    fn top_level<'a>(
        &self,
        slot: &'a OnceLock<ResourceClient>,
        resource: Resource,
    ) -> &'a ResourceClient {
        slot.get_or_init(|| ResourceClient::new(Arc::clone(&self.http), resource))
    }

    fn nested<'a>(
        &self,
        slot: &'a OnceLock<PropertyResourceClient>,
        sub_resource: PropertySubResource,
    ) -> &'a PropertyResourceClient {
        slot.get_or_init(|| PropertyResourceClient::new(Arc::clone(&self.http), sub_resource))
    }

    pub fn properties(&self) -> &ResourceClient {
        self.top_level(&self.properties, Resource::Properties)
    }

    pub fn contacts(&self) -> &ResourceClient {
        self.top_level(&self.contacts, Resource::Contacts)
    }

    pub fn agents(&self) -> &ResourceClient {
        self.top_level(&self.agents, Resource::Agents)
    }

    pub fn teams(&self) -> &ResourceClient {
        self.top_level(&self.teams, Resource::Teams)
    }

    pub fn tags(&self) -> &ResourceClient {
        self.top_level(&self.tags, Resource::Tags)
    }

    pub fn users(&self) -> &ResourceClient {
        self.top_level(&self.users, Resource::Users)
    }

    pub fn property_documents(&self) -> &PropertyResourceClient {
        self.nested(&self.property_documents, PropertySubResource::Documents)
    }

    pub fn property_emails(&self) -> &PropertyResourceClient {
        self.nested(&self.property_emails, PropertySubResource::Emails)
    }

    pub fn property_notes(&self) -> &PropertyResourceClient {
        self.nested(&self.property_notes, PropertySubResource::Notes)
    }

    pub fn property_tasks(&self) -> &PropertyResourceClient {
        self.nested(&self.property_tasks, PropertySubResource::Tasks)
    }

    pub fn property_contacts(&self) -> &PropertyResourceClient {
        self.nested(&self.property_contacts, PropertySubResource::Contacts)
    }

    /// Sub-client for any top-level collection.
    pub fn resource(&self, resource: Resource) -> &ResourceClient {
        match resource {
            Resource::Properties => self.properties(),
            Resource::Contacts => self.contacts(),
            Resource::Agents => self.agents(),
            Resource::Teams => self.teams(),
            Resource::Tags => self.tags(),
            Resource::Users => self.users(),
        }
    }

    /// Sub-client for any property-scoped collection.
    pub fn property_resource(&self, sub_resource: PropertySubResource) -> &PropertyResourceClient {
        match sub_resource {
            PropertySubResource::Documents => self.property_documents(),
            PropertySubResource::Emails => self.property_emails(),
            PropertySubResource::Notes => self.property_notes(),
            PropertySubResource::Tasks => self.property_tasks(),
            PropertySubResource::Contacts => self.property_contacts(),
        }
    }
}
