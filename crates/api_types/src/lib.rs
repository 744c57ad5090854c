use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Base path of the categories resource.
pub const CATEGORIES_PATH: &str = "api/categories";
/// Base path of the entries resource.
pub const ENTRIES_PATH: &str = "api/entries";

pub mod category {
    use super::*;

    /// A named grouping used to classify entries.
    ///
    /// `id` is assigned by the server and is absent before creation.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Category {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub id: Option<i64>,
        pub name: String,
        #[serde(default)]
        pub description: Option<String>,
    }
}

pub mod entry {
    use super::*;
    use crate::category::Category;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum EntryType {
        #[default]
        Expense,
        Revenue,
    }

    impl EntryType {
        pub const ALL: [EntryType; 2] = [EntryType::Expense, EntryType::Revenue];

        /// Returns the canonical string used on the wire and in the database.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Expense => "expense",
                Self::Revenue => "revenue",
            }
        }

        pub fn label(self) -> &'static str {
            match self {
                Self::Expense => "Expense",
                Self::Revenue => "Revenue",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            match value {
                "expense" => Some(Self::Expense),
                "revenue" => Some(Self::Revenue),
                _ => None,
            }
        }
    }

    /// A financial transaction record.
    ///
    /// `category` is a denormalized copy of the category referenced by
    /// `category_id`, attached by the client right before create/update.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Entry {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub id: Option<i64>,
        pub name: String,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(rename = "type")]
        pub kind: EntryType,
        /// Sent as a decimal string so no digit is lost; numbers are
        /// accepted on input.
        pub amount: Decimal,
        pub date: NaiveDate,
        #[serde(default = "default_paid")]
        pub paid: bool,
        pub category_id: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category: Option<Category>,
    }

    fn default_paid() -> bool {
        true
    }

    impl Entry {
        pub fn paid_text(&self) -> &'static str {
            if self.paid { "Paid" } else { "Pending" }
        }
    }
}

pub mod error {
    use super::*;

    /// Body of a `422 Unprocessable Entity` response.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ValidationErrors {
        pub errors: Vec<String>,
    }

    /// Body of every other error response.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ErrorBody {
        pub error: String,
    }
}
