use thiserror::Error;

use vmc_client::ClientError;
use vmc_model::ValidationError;

/// Why a submit did not produce results.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("colleges lookup failed: {0}")]
    Fetch(#[source] ClientError),
}

impl SubmitError {
    /// Message shown to the student in the blocking alert.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.user_message(),
            Self::Fetch(_) => "Error fetching colleges. Please try again.",
        }
    }
}
