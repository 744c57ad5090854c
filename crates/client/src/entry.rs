use api_types::{ENTRIES_PATH, entry::Entry};

use crate::{
    CategoryService, ResourceService,
    error::{ClientError, Result, handle_error},
    http::HttpClient,
};

/// Entries resource.
///
/// Create and update first resolve `category_id` through the category
/// service and embed the result, so the persisted copy always reflects the
/// category as it is at send time.
#[derive(Debug, Clone)]
pub struct EntryService {
    http: HttpClient,
    categories: CategoryService,
}

impl EntryService {
    pub fn new(http: HttpClient, categories: CategoryService) -> Self {
        Self { http, categories }
    }

    fn item_path(id: i64) -> String {
        format!("{ENTRIES_PATH}/{id}")
    }

    async fn attach_category(&self, mut entry: Entry) -> Result<Entry> {
        let category = self.categories.get_by_id(entry.category_id).await?;
        entry.category = Some(category);
        Ok(entry)
    }
}

impl ResourceService for EntryService {
    type Resource = Entry;

    async fn get_all(&self) -> Result<Vec<Entry>> {
        tracing::debug!("GET {ENTRIES_PATH}");
        self.http
            .get_json::<Vec<Entry>>(ENTRIES_PATH)
            .await
            .map_err(handle_error)
    }

    async fn get_by_id(&self, id: i64) -> Result<Entry> {
        let path = Self::item_path(id);
        tracing::debug!("GET {path}");
        self.http.get_json::<Entry>(&path).await.map_err(handle_error)
    }

    async fn create(&self, entry: Entry) -> Result<Entry> {
        let entry = self.attach_category(entry).await?;
        tracing::debug!("POST {ENTRIES_PATH}");
        self.http
            .post_json::<Entry, Entry>(ENTRIES_PATH, &entry)
            .await
            .map_err(handle_error)
    }

    async fn update(&self, entry: Entry) -> Result<Entry> {
        let id = entry.id.ok_or(ClientError::MissingId).map_err(handle_error)?;
        let entry = self.attach_category(entry).await?;
        let path = Self::item_path(id);
        tracing::debug!("PUT {path}");
        let stored = self
            .http
            .put_json::<Entry, Entry>(&path, &entry)
            .await
            .map_err(handle_error)?;
        Ok(stored.unwrap_or(entry))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let path = Self::item_path(id);
        tracing::debug!("DELETE {path}");
        self.http.delete(&path).await.map_err(handle_error)
    }
}
