//! Education levels and the stream catalog.
//!
//! The set of streams a student may pick is fixed per education level. Stream
//! values are what the directory backend expects in its `stream` query
//! parameter; labels are what the form shows next to them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FieldError;
use crate::field::Field;

/// Education level of the programme a student is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EducationLevel {
    /// Bachelor programmes. Colleges are filtered by city.
    Undergraduate,
    /// Master programmes. Never city-filtered.
    Postgraduate,
}

impl EducationLevel {
    /// All levels in display order.
    pub const ALL: [Self; 2] = [Self::Undergraduate, Self::Postgraduate];

    /// Returns the canonical name sent by the form.
    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::Undergraduate => "Undergraduate",
            EducationLevel::Postgraduate => "Postgraduate",
        }
    }

    /// Whether colleges at this level are filtered by city.
    pub fn uses_city(&self) -> bool {
        matches!(self, EducationLevel::Undergraduate)
    }

    /// Legal streams for this level, in form order.
    pub fn streams(&self) -> &'static [StreamOption] {
        match self {
            EducationLevel::Undergraduate => UNDERGRADUATE_STREAMS,
            EducationLevel::Postgraduate => POSTGRADUATE_STREAMS,
        }
    }

    /// Looks up a stream by its value, ignoring ASCII case.
    pub fn stream(&self, value: &str) -> Option<&'static StreamOption> {
        let value = value.trim();
        self.streams()
            .iter()
            .find(|option| option.value.eq_ignore_ascii_case(value))
    }

    /// Whether `value` is one of the streams offered at this level.
    pub fn offers_stream(&self, value: &str) -> bool {
        self.stream(value).is_some()
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EducationLevel {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "undergraduate" | "ug" => Ok(EducationLevel::Undergraduate),
            "postgraduate" | "pg" => Ok(EducationLevel::Postgraduate),
            _ => Err(FieldError::IllegalOption {
                field: Field::EducationLevel,
                value: s.to_string(),
            }),
        }
    }
}

/// A selectable stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StreamOption {
    /// Value sent to the directory backend.
    pub value: &'static str,
    /// Human-readable label.
    pub label: &'static str,
}

const fn stream(value: &'static str, label: &'static str) -> StreamOption {
    StreamOption { value, label }
}

const UNDERGRADUATE_STREAMS: &[StreamOption] = &[
    stream("Sports Management", "Bachelors in Sports Management"),
    stream("Fine Arts", "Bachelors in Fine Arts"),
    stream("Performing Arts", "Bachelors in Performing Arts"),
    stream("Management", "Bachelors in Management Studies"),
    stream("Science", "Bachelors in Science"),
    stream("Commerce", "Bachelors in Commerce"),
    stream("Arts", "Bachelors in Arts"),
    stream("Vocational", "Bachelors in Vocational"),
    stream("International Accounting", "Bachelors in International Accounting"),
];

const POSTGRADUATE_STREAMS: &[StreamOption] = &[
    stream("Master of Science", "Master of Science"),
    stream("Master of Arts", "Master of Arts"),
    stream("Master of Commerce", "Master of Commerce"),
    stream("MA Psychology", "MA Psychology"),
];
