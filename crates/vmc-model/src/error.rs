//! Errors raised while editing and submitting the filter form.

use thiserror::Error;

use crate::field::Field;

/// A form edit that the form controls would not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// No such form field.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// The control for this field is disabled or hidden in the current state.
    #[error("{field} cannot be set: {reason}")]
    Disabled {
        field: Field,
        reason: &'static str,
    },

    /// The value is not one of the options offered for this field.
    #[error("'{value}' is not a valid option for {field}")]
    IllegalOption { field: Field, value: String },
}

/// Submit-time validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields are empty.
    #[error("missing required fields: {}", join_fields(.fields))]
    MissingRequired { fields: Vec<Field> },

    /// Undergraduate searches need a city.
    #[error("city is required for undergraduate searches")]
    CityRequired,
}

impl ValidationError {
    /// Message shown to the student in the blocking alert.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingRequired { .. } => "Please fill all required fields",
            Self::CityRequired => "Please select a city",
        }
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
