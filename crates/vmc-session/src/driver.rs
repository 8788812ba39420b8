//! Runs session requests against a directory.

use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;

use vmc_client::CollegeDirectory;
use vmc_model::{Field, FieldError};

use crate::error::SubmitError;
use crate::mode::Mode;
use crate::request::{FetchOutcome, FetchRequest, Lookup, Payload, Ticket};
use crate::session::{Applied, FilterSession, Submission};

/// Executes [`FetchRequest`]s concurrently and applies each response as soon
/// as it arrives.
pub struct Driver<D> {
    directory: D,
}

impl<D: CollegeDirectory> Driver<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Runs one lookup.
    pub async fn execute(&self, request: FetchRequest) -> (Ticket, FetchOutcome) {
        let FetchRequest { ticket, lookup } = request;
        let outcome = match lookup {
            Lookup::Specializations { stream } => self
                .directory
                .specializations(&stream)
                .await
                .map(Payload::Options),
            Lookup::Cities { stream } => self.directory.cities(&stream).await.map(Payload::Options),
            Lookup::Colleges(query) => self
                .directory
                .colleges(&query)
                .await
                .map(Payload::Colleges),
            Lookup::Search { query } => self.directory.search(&query).await.map(Payload::Colleges),
        };
        (ticket, outcome)
    }

    /// Runs `requests` concurrently, applying responses in completion order.
    pub async fn run(&self, session: &mut FilterSession, requests: Vec<FetchRequest>) -> Vec<Applied> {
        let mut pending: FuturesUnordered<_> = requests
            .into_iter()
            .map(|request| self.execute(request))
            .collect();
        let mut applied = Vec::with_capacity(pending.len());
        while let Some((ticket, outcome)) = pending.next().await {
            applied.push(session.apply(ticket, outcome));
        }
        applied
    }

    /// Edits a field and waits for every lookup the edit started.
    pub async fn set_field(
        &self,
        session: &mut FilterSession,
        field: Field,
        value: &str,
    ) -> Result<Vec<Applied>, FieldError> {
        let requests = session.set_field(field, value)?;
        Ok(self.run(session, requests).await)
    }

    /// Submits the form and waits for the colleges lookup.
    ///
    /// Returns the mode the session ends up in.
    pub async fn submit(&self, session: &mut FilterSession) -> Result<Mode, SubmitError> {
        match session.submit()? {
            Submission::Ignored(mode) => Ok(mode),
            Submission::Pending(request) => {
                let (ticket, outcome) = self.execute(request).await;
                match session.apply(ticket, outcome) {
                    Applied::SubmitFailed(err) => Err(err),
                    Applied::Updated | Applied::Stale => Ok(session.mode()),
                }
            }
        }
    }
}
