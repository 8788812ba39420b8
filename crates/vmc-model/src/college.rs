//! College records returned by the directory and the queries that fetch them.

use serde::{Deserialize, Deserializer, Serialize};

use crate::field::FilterState;

/// One row of a college result set.
///
/// `college_code` and `city` are not sent by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollegeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college_code: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub institute_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub course: String,
}

/// Rows with a null name or course are still listed, with an empty value.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl CollegeRecord {
    /// College code, treating an empty string as absent.
    pub fn college_code(&self) -> Option<&str> {
        non_empty(self.college_code.as_deref())
    }

    /// City, treating an empty string as absent.
    pub fn city(&self) -> Option<&str> {
        non_empty(self.city.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Ordered college rows. Always replaced as a whole, never merged.
pub type ResultSet = Vec<CollegeRecord>;

/// Which optional columns a result set carries.
///
/// Computed over every record so that heterogeneous result sets still get a
/// column whenever at least one row has a value for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResultSchema {
    pub has_college_code: bool,
    pub has_city: bool,
}

impl ResultSchema {
    pub fn of(records: &[CollegeRecord]) -> Self {
        Self {
            has_college_code: records.iter().any(|r| r.college_code().is_some()),
            has_city: records.iter().any(|r| r.city().is_some()),
        }
    }
}

/// Parameters of a colleges lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CollegeQuery {
    pub stream: String,
    pub specialization: String,
    /// Only set for undergraduate searches with a selected city.
    pub city: Option<String>,
}

impl CollegeQuery {
    /// Builds the lookup for the current filter values.
    ///
    /// Returns `None` until both stream and specialization are selected. The
    /// city is attached only when the level filters by city and one is set.
    pub fn for_filter(state: &FilterState) -> Option<Self> {
        if state.stream.is_empty() || state.specialization.is_empty() {
            return None;
        }
        let city = (state.uses_city() && !state.city.is_empty()).then(|| state.city.clone());
        Some(Self {
            stream: state.stream.clone(),
            specialization: state.specialization.clone(),
            city,
        })
    }
}
