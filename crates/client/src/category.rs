use api_types::{CATEGORIES_PATH, category::Category};

use crate::{
    ResourceService,
    error::{ClientError, Result, handle_error},
    http::HttpClient,
};

#[derive(Debug, Clone)]
pub struct CategoryService {
    http: HttpClient,
}

impl CategoryService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    fn item_path(id: i64) -> String {
        format!("{CATEGORIES_PATH}/{id}")
    }
}

impl ResourceService for CategoryService {
    type Resource = Category;

    async fn get_all(&self) -> Result<Vec<Category>> {
        tracing::debug!("GET {CATEGORIES_PATH}");
        self.http
            .get_json::<Vec<Category>>(CATEGORIES_PATH)
            .await
            .map_err(handle_error)
    }

    async fn get_by_id(&self, id: i64) -> Result<Category> {
        let path = Self::item_path(id);
        tracing::debug!("GET {path}");
        self.http
            .get_json::<Category>(&path)
            .await
            .map_err(handle_error)
    }

    async fn create(&self, category: Category) -> Result<Category> {
        tracing::debug!("POST {CATEGORIES_PATH}");
        self.http
            .post_json::<Category, Category>(CATEGORIES_PATH, &category)
            .await
            .map_err(handle_error)
    }

    async fn update(&self, category: Category) -> Result<Category> {
        let id = category.id.ok_or(ClientError::MissingId).map_err(handle_error)?;
        let path = Self::item_path(id);
        tracing::debug!("PUT {path}");
        let stored = self
            .http
            .put_json::<Category, Category>(&path, &category)
            .await
            .map_err(handle_error)?;
        Ok(stored.unwrap_or(category))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let path = Self::item_path(id);
        tracing::debug!("DELETE {path}");
        self.http.delete(&path).await.map_err(handle_error)
    }
}
