//! Form model: named controls holding JSON values, each with its own
//! validators.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// Rejects null, empty or blank strings and empty arrays.
    Required,
    /// Rejects non-empty strings shorter than the given number of characters.
    MinLength(usize),
}

impl Validator {
    fn check(self, field: &str, value: &Value) -> Option<FieldError> {
        let kind = match self {
            Self::Required if is_empty(value) => FieldErrorKind::Required,
            Self::MinLength(required) => {
                let actual = length(value).filter(|len| *len > 0 && *len < required)?;
                FieldErrorKind::MinLength { required, actual }
            }
            Self::Required => return None,
        };
        Some(FieldError {
            field: field.to_string(),
            kind,
        })
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(text) => Some(text.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldErrorKind {
    Required,
    MinLength { required: usize, actual: usize },
    /// The form value could not be turned into a record.
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FieldErrorKind::Required => write!(f, "{} is required", self.field),
            FieldErrorKind::MinLength { required, .. } => {
                write!(f, "{} must have at least {required} characters", self.field)
            }
            FieldErrorKind::Invalid(reason) => write!(f, "{} is invalid: {reason}", self.field),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormControl {
    value: Value,
    validators: Vec<Validator>,
}

impl FormControl {
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn errors(&self, field: &str) -> Vec<FieldError> {
        self.validators
            .iter()
            .filter_map(|validator| validator.check(field, &self.value))
            .collect()
    }
}

/// Ordered group of controls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormGroup {
    controls: Vec<(String, FormControl)>,
}

impl FormGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a control with its initial value.
    pub fn control(
        mut self,
        name: &str,
        initial: impl Into<Value>,
        validators: &[Validator],
    ) -> Self {
        self.controls.push((
            name.to_string(),
            FormControl {
                value: initial.into(),
                validators: validators.to_vec(),
            },
        ));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.find(name).map(FormControl::value)
    }

    /// Sets one control; returns `false` when the form has no such control.
    pub fn set_value(&mut self, name: &str, value: impl Into<Value>) -> bool {
        match self.find_mut(name) {
            Some(control) => {
                control.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Copies every field of `record` that has a matching control.
    pub fn patch_value<T: Serialize>(&mut self, record: &T) -> Result<(), serde_json::Error> {
        if let Value::Object(fields) = serde_json::to_value(record)? {
            for (name, value) in fields {
                self.set_value(&name, value);
            }
        }
        Ok(())
    }

    /// JSON object with the current value of every control.
    pub fn value(&self) -> Value {
        let fields: Map<String, Value> = self
            .controls
            .iter()
            .map(|(name, control)| (name.clone(), control.value.clone()))
            .collect();
        Value::Object(fields)
    }

    pub fn errors(&self) -> Vec<FieldError> {
        self.controls
            .iter()
            .flat_map(|(name, control)| control.errors(name))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    fn find(&self, name: &str) -> Option<&FormControl> {
        self.controls
            .iter()
            .find_map(|(control_name, control)| (control_name == name).then_some(control))
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut FormControl> {
        self.controls
            .iter_mut()
            .find_map(|(control_name, control)| (control_name == name).then_some(control))
    }
}
