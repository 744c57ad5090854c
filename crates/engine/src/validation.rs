//! Field rules shared by the backend. Each rule yields one human readable
//! message, collected into the `errors` list of a 422 response.

use api_types::{category::Category, entry::Entry};

pub const NAME_MIN_LEN: usize = 2;

fn name(value: &str, errors: &mut Vec<String>) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push("name is required".to_string());
    } else if trimmed.chars().count() < NAME_MIN_LEN {
        errors.push("name is too short".to_string());
    }
}

pub fn category(category: &Category) -> Vec<String> {
    let mut errors = Vec::new();
    name(&category.name, &mut errors);
    errors
}

pub fn entry(entry: &Entry) -> Vec<String> {
    let mut errors = Vec::new();
    name(&entry.name, &mut errors);
    errors
}
