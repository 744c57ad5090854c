//! Entry records.
//!
//! `category` holds the JSON snapshot of the category the client embedded
//! when the entry was last written.

use std::str::FromStr;

use api_types::{
    category::Category,
    entry::{Entry, EntryType},
};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use crate::{ResultEngine, error::EngineError};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub kind: String,
    pub amount: String,
    pub date: Date,
    pub paid: bool,
    pub category_id: i64,
    pub category: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Category,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Entry {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        let kind = EntryType::parse(&model.kind).ok_or_else(|| {
            EngineError::InvalidData(format!("entry {}: unknown type {}", model.id, model.kind))
        })?;
        let amount = Decimal::from_str(&model.amount).map_err(|err| {
            EngineError::InvalidData(format!("entry {}: amount: {err}", model.id))
        })?;
        let category = model
            .category
            .as_deref()
            .map(serde_json::from_str::<Category>)
            .transpose()
            .map_err(|err| {
                EngineError::InvalidData(format!("entry {}: category: {err}", model.id))
            })?;

        Ok(Self {
            id: Some(model.id),
            name: model.name,
            description: model.description,
            kind,
            amount,
            date: model.date,
            paid: model.paid,
            category_id: model.category_id,
            category,
        })
    }
}
