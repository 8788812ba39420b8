//! Cascading college filter session.
//!
//! A [`FilterSession`] holds the form a student fills in (education level,
//! stream, specialization, city, name and search text), the option lists
//! derived from it, and the paginated result set. Edits return the directory
//! lookups they require; [`Driver`] runs them against a
//! [`CollegeDirectory`](vmc_client::CollegeDirectory) and feeds the responses
//! back. Responses that arrive after a newer request for the same list are
//! discarded.

pub mod derive;
pub mod driver;
pub mod error;
pub mod mode;
pub mod page;
pub mod request;
pub mod session;

pub use driver::Driver;
pub use error::SubmitError;
pub use mode::{Mode, ModeEvent};
pub use page::{PageView, Pager};
pub use request::{FetchOutcome, FetchRequest, Lookup, Payload, RequestKind, Ticket};
pub use session::{Applied, FilterSession, Submission};
