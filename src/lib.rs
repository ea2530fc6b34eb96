//! Client library for the Open To Close real-estate transaction API.
//!
//! [`OpenToCloseApi`] is the entry point. It resolves the API key and base
//! URL, then exposes one sub-client per collection with `list`, `create`,
//! `retrieve`, `update` and `delete`. Records are passed through as untyped
//! JSON objects.
//!
//! ```no_run
//! use open_to_close::{ListParams, OpenToCloseApi};
//! use serde_json::json;
//!
//! # async fn run() -> open_to_close::Result<()> {
//! let api = OpenToCloseApi::new(None, None)?;
//!
//! let contact = api
//!     .contacts()
//!     .create(&json!({"first_name": "Ada", "email": "ada@example.com"}))
//!     .await?;
//!
//! let recent = api.properties().list(Some(&ListParams::new().limit(10))).await?;
//! # let _ = (contact, recent);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - `client`: the main [`OpenToCloseApi`] client
//! - `configuration`: API key, base URL and optional configuration file
//! - `error`: the [`OpenToCloseError`] taxonomy
//! - `http_utils`: the shared HTTP transport
//! - `model`: records, list parameters and resource names
//! - `resources`: the CRUD sub-clients

pub mod client;
pub mod configuration;
pub mod error;
pub mod http_utils;
pub mod model;
pub mod resources;

pub use client::OpenToCloseApi;
pub use configuration::{ClientConfig, ConfigurationFile};
pub use error::{OpenToCloseError, Result};
pub use model::{DeleteConfirmation, ListParams, PropertySubResource, Record, Resource};
pub use resources::{PropertyResourceClient, ResourceClient};
