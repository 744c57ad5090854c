//! HTTP services for the categories and entries REST resources.
//!
//! Every service call is one independent round-trip: services keep no cache
//! and are cheap to clone. Failures are logged and returned untouched, the
//! presentation layer decides how to show them.

use std::future::Future;

use serde::Deserialize;

pub use category::CategoryService;
pub use entry::EntryService;
pub use error::{ClientError, Result};
pub use http::HttpClient;
pub use reqwest::StatusCode;

mod category;
mod entry;
mod error;
mod http;

pub mod types {
    pub use api_types::category::Category;
    pub use api_types::entry::{Entry, EntryType};
    pub use api_types::error::ValidationErrors;
}

/// CRUD operations over one REST resource.
pub trait ResourceService {
    type Resource;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Self::Resource>>> + Send;

    fn get_by_id(&self, id: i64) -> impl Future<Output = Result<Self::Resource>> + Send;

    fn create(
        &self,
        record: Self::Resource,
    ) -> impl Future<Output = Result<Self::Resource>> + Send;

    /// Updates the record identified by its own id.
    ///
    /// Returns the server's version when the response has a body, the sent
    /// record otherwise.
    fn update(
        &self,
        record: Self::Resource,
    ) -> impl Future<Output = Result<Self::Resource>> + Send;

    fn delete(&self, id: i64) -> impl Future<Output = Result<()>> + Send;
}

/// Client-side settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
        }
    }
}

/// Builds both services over one shared connection pool.
pub fn services(config: &ClientConfig) -> Result<(CategoryService, EntryService)> {
    let http = HttpClient::new(&config.base_url)?;
    let categories = CategoryService::new(http.clone());
    let entries = EntryService::new(http, categories.clone());
    Ok((categories, entries))
}
