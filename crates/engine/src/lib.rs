use api_types::{category::Category, entry::Entry};
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

pub use error::EngineError;

mod categories;
mod entries;
mod error;
pub mod validation;

type ResultEngine<T> = Result<T, EngineError>;

/// Storage engine behind the categories and entries REST resources.
#[derive(Debug, Clone)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub async fn list_categories(&self) -> ResultEngine<Vec<Category>> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }

    pub async fn category(&self, id: i64) -> ResultEngine<Category> {
        self.category_model(id).await.map(Category::from)
    }

    pub async fn create_category(&self, category: Category) -> ResultEngine<Category> {
        check(validation::category(&category))?;

        let model = categories::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(category.name.trim().to_string()),
            description: ActiveValue::Set(normalize_description(category.description)),
        }
        .insert(&self.database)
        .await?;

        tracing::debug!("created category {}", model.id);
        Ok(model.into())
    }

    pub async fn update_category(&self, id: i64, category: Category) -> ResultEngine<Category> {
        self.category_model(id).await?;
        check(validation::category(&category))?;

        let model = categories::ActiveModel {
            id: ActiveValue::Unchanged(id),
            name: ActiveValue::Set(category.name.trim().to_string()),
            description: ActiveValue::Set(normalize_description(category.description)),
        }
        .update(&self.database)
        .await?;

        Ok(model.into())
    }

    pub async fn delete_category(&self, id: i64) -> ResultEngine<()> {
        let model = self.category_model(id).await?;

        let used_by = entries::Entity::find()
            .filter(entries::Column::CategoryId.eq(id))
            .count(&self.database)
            .await?;
        if used_by > 0 {
            return Err(EngineError::InUse(model.name));
        }

        categories::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        Ok(())
    }

    pub async fn list_entries(&self) -> ResultEngine<Vec<Entry>> {
        entries::Entity::find()
            .order_by_asc(entries::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Entry::try_from)
            .collect()
    }

    pub async fn entry(&self, id: i64) -> ResultEngine<Entry> {
        self.entry_model(id).await?.try_into()
    }

    pub async fn create_entry(&self, entry: Entry) -> ResultEngine<Entry> {
        let snapshot = self.checked_entry(&entry).await?;

        let model = entries::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(entry.name.trim().to_string()),
            description: ActiveValue::Set(normalize_description(entry.description)),
            kind: ActiveValue::Set(entry.kind.as_str().to_string()),
            amount: ActiveValue::Set(entry.amount.to_string()),
            date: ActiveValue::Set(entry.date),
            paid: ActiveValue::Set(entry.paid),
            category_id: ActiveValue::Set(entry.category_id),
            category: ActiveValue::Set(Some(snapshot)),
        }
        .insert(&self.database)
        .await?;

        tracing::debug!("created entry {}", model.id);
        model.try_into()
    }

    pub async fn update_entry(&self, id: i64, entry: Entry) -> ResultEngine<Entry> {
        self.entry_model(id).await?;
        let snapshot = self.checked_entry(&entry).await?;

        let model = entries::ActiveModel {
            id: ActiveValue::Unchanged(id),
            name: ActiveValue::Set(entry.name.trim().to_string()),
            description: ActiveValue::Set(normalize_description(entry.description)),
            kind: ActiveValue::Set(entry.kind.as_str().to_string()),
            amount: ActiveValue::Set(entry.amount.to_string()),
            date: ActiveValue::Set(entry.date),
            paid: ActiveValue::Set(entry.paid),
            category_id: ActiveValue::Set(entry.category_id),
            category: ActiveValue::Set(Some(snapshot)),
        }
        .update(&self.database)
        .await?;

        model.try_into()
    }

    pub async fn delete_entry(&self, id: i64) -> ResultEngine<()> {
        self.entry_model(id).await?;
        entries::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        Ok(())
    }

    async fn category_model(&self, id: i64) -> ResultEngine<categories::Model> {
        categories::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("category {id}")))
    }

    async fn entry_model(&self, id: i64) -> ResultEngine<entries::Model> {
        entries::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("entry {id}")))
    }

    /// Validates `entry` against its referenced category and returns the
    /// category snapshot to store with it.
    ///
    /// The embedded category, when present, must carry the same id as
    /// `category_id`; when absent the stored category is used.
    async fn checked_entry(&self, entry: &Entry) -> ResultEngine<String> {
        let mut errors = validation::entry(entry);

        let stored = categories::Entity::find_by_id(entry.category_id)
            .one(&self.database)
            .await?;
        if stored.is_none() {
            errors.push("category does not exist".to_string());
        }
        if let Some(embedded) = &entry.category {
            if embedded.id != Some(entry.category_id) {
                errors.push("category does not match categoryId".to_string());
            }
        }
        check(errors)?;

        let snapshot = match (&entry.category, stored) {
            (Some(embedded), _) => embedded.clone(),
            (None, Some(model)) => model.into(),
            (None, None) => {
                return Err(EngineError::KeyNotFound(format!(
                    "category {}",
                    entry.category_id
                )));
            }
        };
        serde_json::to_string(&snapshot)
            .map_err(|err| EngineError::InvalidData(format!("category snapshot: {err}")))
    }
}

fn check(errors: Vec<String>) -> ResultEngine<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(EngineError::Validation(errors))
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`, checking the database is reachable.
    pub async fn build(self) -> ResultEngine<Engine> {
        self.database.ping().await?;
        Ok(Engine {
            database: self.database,
        })
    }
}
