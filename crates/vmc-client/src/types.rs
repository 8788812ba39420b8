//! Wire types of the directory API.

use serde::Deserialize;

/// Every endpoint wraps its rows in `{ "data": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// Rows of the response.
    pub data: Vec<T>,
}

/// Row of the specializations endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecializationItem {
    /// Specialization name. The backend calls it a course.
    pub course: String,
}

/// Row of the cities endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CityItem {
    /// City name.
    pub city: String,
}
