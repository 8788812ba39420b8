pub mod college;
pub mod error;
pub mod field;
pub mod level;

pub use college::{CollegeQuery, CollegeRecord, ResultSchema, ResultSet};
pub use error::{FieldError, ValidationError};
pub use field::{Field, FilterState};
pub use level::{EducationLevel, StreamOption};

/// City option that matches every city of an undergraduate stream.
pub const ALL_CITIES: &str = "All";
