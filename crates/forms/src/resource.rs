use api_types::{
    category::Category,
    entry::{Entry, EntryType},
};
use chrono::NaiveDate;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::form::{FormGroup, Validator};

pub const NAME_MIN_LEN: usize = 2;

/// A record editable through a [`FormController`](crate::FormController).
pub trait FormResource: Serialize + DeserializeOwned + Clone + Send {
    /// Route of the list page; edit pages live under `<list>/<id>/edit`.
    const LIST_ROUTE: &'static str;
    const NEW_TITLE: &'static str;
    /// Prefix of the edit page title, followed by the record name.
    const EDIT_TITLE: &'static str;

    fn build_form() -> FormGroup;

    fn id(&self) -> Option<i64>;

    fn name(&self) -> &str;

    /// Builds a record out of the form value.
    fn from_form(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

impl FormResource for Category {
    const LIST_ROUTE: &'static str = "categories";
    const NEW_TITLE: &'static str = "New category";
    const EDIT_TITLE: &'static str = "Editing category: ";

    fn build_form() -> FormGroup {
        FormGroup::new()
            .control("id", Value::Null, &[])
            .control(
                "name",
                Value::Null,
                &[Validator::Required, Validator::MinLength(NAME_MIN_LEN)],
            )
            .control("description", Value::Null, &[])
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FormResource for Entry {
    const LIST_ROUTE: &'static str = "entries";
    const NEW_TITLE: &'static str = "New entry";
    const EDIT_TITLE: &'static str = "Editing entry: ";

    fn build_form() -> FormGroup {
        FormGroup::new()
            .control("id", Value::Null, &[])
            .control(
                "name",
                Value::Null,
                &[Validator::Required, Validator::MinLength(NAME_MIN_LEN)],
            )
            .control("description", Value::Null, &[])
            .control("type", EntryType::Expense.as_str(), &[Validator::Required])
            .control("amount", Value::Null, &[Validator::Required])
            .control("date", Value::Null, &[Validator::Required])
            .control("paid", true, &[Validator::Required])
            .control("categoryId", Value::Null, &[Validator::Required])
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    /// Accepts the raw shapes inputs produce: `12,50` amounts, `dd/mm/yyyy`
    /// dates and string ids from select boxes.
    fn from_form(mut value: Value) -> Result<Self, serde_json::Error> {
        if let Some(fields) = value.as_object_mut() {
            if let Some(Value::String(amount)) = fields.get_mut("amount") {
                *amount = amount.trim().replace(',', ".");
            }
            if let Some(Value::String(date)) = fields.get_mut("date") {
                if let Ok(parsed) = NaiveDate::parse_from_str(date.trim(), "%d/%m/%Y") {
                    *date = parsed.format("%Y-%m-%d").to_string();
                }
            }
            if let Some(category_id) = fields.get_mut("categoryId") {
                let parsed = category_id
                    .as_str()
                    .and_then(|raw| raw.trim().parse::<i64>().ok());
                if let Some(parsed) = parsed {
                    *category_id = Value::from(parsed);
                }
            }
        }
        serde_json::from_value(value)
    }
}
