//! Form fields and the filter state they make up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FieldError;
use crate::level::EducationLevel;

/// A field of the filter form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    EducationLevel,
    Stream,
    Specialization,
    City,
    StudentName,
    SearchQuery,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Self; 6] = [
        Self::EducationLevel,
        Self::Stream,
        Self::Specialization,
        Self::City,
        Self::StudentName,
        Self::SearchQuery,
    ];

    /// Wire name used by the form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::EducationLevel => "educationLevel",
            Field::Stream => "courseName",
            Field::Specialization => "specialization",
            Field::City => "city",
            Field::StudentName => "studentName",
            Field::SearchQuery => "searchQuery",
        }
    }

    /// Label shown to the student.
    pub fn label(&self) -> &'static str {
        match self {
            Field::EducationLevel => "Education Level",
            Field::Stream => "Stream",
            Field::Specialization => "Specialization",
            Field::City => "City",
            Field::StudentName => "Student Name",
            Field::SearchQuery => "Search",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "educationLevel" | "level" => Ok(Field::EducationLevel),
            "courseName" | "stream" => Ok(Field::Stream),
            "specialization" | "spec" => Ok(Field::Specialization),
            "city" => Ok(Field::City),
            "studentName" | "name" => Ok(Field::StudentName),
            "searchQuery" | "search" => Ok(Field::SearchQuery),
            other => Err(FieldError::UnknownField(other.to_string())),
        }
    }
}

/// Current values of the filter form.
///
/// Created empty at session start. The session keeps `stream` legal for
/// `education_level` and resets `specialization` and `city` whenever either
/// of those changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub education_level: Option<EducationLevel>,
    pub stream: String,
    pub specialization: String,
    pub city: String,
    pub student_name: String,
    pub search_query: String,
}

impl FilterState {
    /// Current value of `field` as the form would display it.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::EducationLevel => self.education_level.map_or("", |level| level.as_str()),
            Field::Stream => &self.stream,
            Field::Specialization => &self.specialization,
            Field::City => &self.city,
            Field::StudentName => &self.student_name,
            Field::SearchQuery => &self.search_query,
        }
    }

    /// Whether `field` holds no value.
    pub fn is_empty(&self, field: Field) -> bool {
        self.value(field).is_empty()
    }

    /// Fields whose values differ between `self` and `previous`.
    pub fn changed_since(&self, previous: &FilterState) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.value(*field) != previous.value(*field))
            .collect()
    }

    /// Whether the selected level filters colleges by city.
    pub fn uses_city(&self) -> bool {
        self.education_level.is_some_and(|level| level.uses_city())
    }
}
