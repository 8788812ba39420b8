//! The filter session controller.
//!
//! `FilterSession` owns the form values, the option lists derived from them,
//! the current result set and the page being viewed. It performs no I/O:
//! edits and submits hand back [`FetchRequest`]s, and the caller reports each
//! response through [`FilterSession::apply`] in whatever order they complete.

use tracing::{debug, warn};

use vmc_client::ClientError;
use vmc_model::{
    ALL_CITIES, CollegeQuery, CollegeRecord, Field, FieldError, FilterState, ResultSchema,
    ResultSet, StreamOption, ValidationError,
};

use crate::derive::{self, Derivation, Plan};
use crate::error::SubmitError;
use crate::mode::{Mode, ModeEvent};
use crate::page::{PageView, Pager};
use crate::request::{
    FetchOutcome, FetchRequest, Lookup, Payload, RequestKind, Sequencer, Slot, Ticket,
};

/// Fields the submit action requires, in the order they are reported.
const REQUIRED_FIELDS: [Field; 4] = [
    Field::EducationLevel,
    Field::Stream,
    Field::Specialization,
    Field::StudentName,
];

/// What a call to [`FilterSession::submit`] started.
#[derive(Debug)]
pub enum Submission {
    /// The colleges lookup to run.
    Pending(FetchRequest),
    /// Submit is disabled in this mode.
    Ignored(Mode),
}

/// What applying a response did.
#[derive(Debug)]
pub enum Applied {
    Updated,
    /// A newer request or a clear superseded this response.
    Stale,
    /// The submit lookup failed; the result set is unchanged.
    SubmitFailed(SubmitError),
}

/// Filter form state, derived option lists and the paginated result set.
#[derive(Debug, Clone, Default)]
pub struct FilterSession {
    state: FilterState,
    specializations: Vec<String>,
    cities: Vec<String>,
    results: ResultSet,
    schema: ResultSchema,
    mode: Mode,
    pager: Pager,
    sequencer: Sequencer,
}

impl FilterSession {
    /// An empty session showing `page_size` rows per page.
    pub fn new(page_size: usize) -> Self {
        Self {
            pager: Pager::new(page_size),
            ..Self::default()
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn specializations(&self) -> &[String] {
        &self.specializations
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Streams selectable for the current education level.
    pub fn stream_options(&self) -> &'static [StreamOption] {
        match self.state.education_level {
            Some(level) => level.streams(),
            None => &[],
        }
    }

    /// City choices, "All" first. Empty while the city control is hidden or
    /// disabled.
    pub fn city_options(&self) -> Vec<&str> {
        if !self.state.uses_city() || self.state.stream.is_empty() {
            return Vec::new();
        }
        std::iter::once(ALL_CITIES)
            .chain(self.cities.iter().map(String::as_str))
            .collect()
    }

    pub fn results(&self) -> &[CollegeRecord] {
        &self.results
    }

    pub fn schema(&self) -> ResultSchema {
        self.schema
    }

    /// Whether the results table and pagination are on screen.
    pub fn results_visible(&self) -> bool {
        self.mode == Mode::Shown && !self.results.is_empty()
    }

    pub fn current_page(&self) -> usize {
        self.pager.current()
    }

    pub fn page_view(&self) -> PageView<'_> {
        PageView::new(&self.results, &self.pager, self.schema)
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next(self.results.len())
    }

    pub fn prev_page(&mut self) -> bool {
        self.pager.prev()
    }

    /// Edits one field and returns the lookups the edit requires.
    ///
    /// Changing the education level clears stream, specialization and city;
    /// changing the stream clears specialization and city. Both, and a
    /// specialization change, empty the result set. Re-entering the current
    /// value leaves the form as it is. Option lists whose dependencies
    /// changed are recomputed. A search edit runs the search for the trimmed
    /// text, or empties the results when it is blank.
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<Vec<FetchRequest>, FieldError> {
        let next = self.edited(field, value)?;
        let changed = next.changed_since(&self.state);
        self.state = next;

        if !changed.is_empty() {
            debug!(%field, ?changed, "Form field updated");
            if self.mode == Mode::Submitting {
                // The pending submit no longer matches the form.
                self.sequencer.invalidate(Slot::Results);
            }
            self.mode = self.mode.on(ModeEvent::Edited);
        }
        if matches!(
            field,
            Field::EducationLevel | Field::Stream | Field::Specialization
        ) && changed.contains(&field)
        {
            self.clear_results();
        }

        let mut requests: Vec<FetchRequest> = derive::affected(&changed)
            .filter_map(|derivation| self.recompute(derivation))
            .collect();
        if field == Field::SearchQuery {
            requests.extend(self.search());
        }
        Ok(requests)
    }

    fn edited(&self, field: Field, value: &str) -> Result<FilterState, FieldError> {
        let mut next = self.state.clone();
        match field {
            Field::EducationLevel => {
                let level = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                };
                if level != next.education_level {
                    next.education_level = level;
                    next.stream.clear();
                    next.specialization.clear();
                    next.city.clear();
                }
            }
            Field::Stream => {
                let Some(level) = next.education_level else {
                    return Err(FieldError::Disabled {
                        field,
                        reason: "select an education level first",
                    });
                };
                let stream = if value.trim().is_empty() {
                    ""
                } else {
                    level
                        .stream(value)
                        .map(|option| option.value)
                        .ok_or_else(|| FieldError::IllegalOption {
                            field,
                            value: value.to_string(),
                        })?
                };
                if stream != next.stream {
                    next.stream = stream.to_string();
                    next.specialization.clear();
                    next.city.clear();
                }
            }
            Field::Specialization => next.specialization = value.to_string(),
            Field::City => {
                if !next.uses_city() {
                    return Err(FieldError::Disabled {
                        field,
                        reason: "only undergraduate colleges are filtered by city",
                    });
                }
                if next.stream.is_empty() {
                    return Err(FieldError::Disabled {
                        field,
                        reason: "select a stream first",
                    });
                }
                next.city = value.to_string();
            }
            Field::StudentName => next.student_name = value.to_string(),
            Field::SearchQuery => next.search_query = value.to_string(),
        }
        Ok(next)
    }

    fn recompute(&mut self, derivation: &Derivation) -> Option<FetchRequest> {
        match derivation.plan(&self.state) {
            Plan::Fetch(lookup) => Some(self.issue(derivation.kind, lookup)),
            Plan::Clear => {
                match derivation.kind.slot() {
                    Slot::Specializations => {
                        self.sequencer.invalidate(Slot::Specializations);
                        self.specializations.clear();
                    }
                    Slot::Cities => {
                        self.sequencer.invalidate(Slot::Cities);
                        self.cities.clear();
                    }
                    Slot::Results => self.clear_results(),
                }
                None
            }
        }
    }

    fn search(&mut self) -> Option<FetchRequest> {
        let query = self.state.search_query.trim();
        if query.is_empty() {
            self.clear_results();
            return None;
        }
        let lookup = Lookup::Search {
            query: query.to_string(),
        };
        Some(self.issue(RequestKind::Search, lookup))
    }

    /// Validates the form and starts the authoritative colleges lookup.
    ///
    /// Does nothing while results are shown or a submit is in flight.
    pub fn submit(&mut self) -> Result<Submission, SubmitError> {
        if !self.mode.accepts_submit() {
            debug!(mode = %self.mode, "Submit ignored");
            return Ok(Submission::Ignored(self.mode));
        }
        self.validate()?;
        let query = CollegeQuery::for_filter(&self.state).ok_or(
            ValidationError::MissingRequired {
                fields: vec![Field::Stream, Field::Specialization],
            },
        )?;
        self.mode = self.mode.on(ModeEvent::SubmitStarted);
        Ok(Submission::Pending(
            self.issue(RequestKind::Submit, Lookup::Colleges(query)),
        ))
    }

    /// Checks the fields the submit action requires.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<Field> = REQUIRED_FIELDS
            .into_iter()
            .filter(|field| self.state.is_empty(*field))
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingRequired { fields: missing });
        }
        if self.state.uses_city() && self.state.city.is_empty() {
            return Err(ValidationError::CityRequired);
        }
        Ok(())
    }

    /// Applies the response of an issued request.
    ///
    /// Responses superseded by a newer request or a clear of the same slot
    /// are dropped.
    pub fn apply(&mut self, ticket: Ticket, outcome: FetchOutcome) -> Applied {
        if !self.sequencer.is_current(ticket) {
            debug!(kind = ?ticket.kind, seq = ticket.seq, "Discarding stale response");
            return Applied::Stale;
        }
        match ticket.kind {
            RequestKind::Specializations => {
                self.specializations = options(ticket.kind, outcome);
            }
            RequestKind::Cities => {
                self.cities = options(ticket.kind, outcome);
            }
            RequestKind::Colleges => {
                let results = colleges(ticket.kind, outcome).unwrap_or_default();
                self.replace_results(results);
            }
            RequestKind::Search => match colleges(ticket.kind, outcome) {
                Ok(results) => {
                    self.replace_results(results);
                    self.mode = self.mode.on(ModeEvent::SearchSucceeded);
                }
                Err(_) => {
                    self.replace_results(Vec::new());
                    self.mode = self.mode.on(ModeEvent::SearchFailed);
                }
            },
            RequestKind::Submit => match colleges(ticket.kind, outcome) {
                Ok(results) => {
                    self.replace_results(results);
                    self.mode = self.mode.on(ModeEvent::SubmitSucceeded);
                }
                Err(err) => {
                    self.mode = self.mode.on(ModeEvent::SubmitFailed);
                    return Applied::SubmitFailed(SubmitError::Fetch(err));
                }
            },
        }
        Applied::Updated
    }

    fn issue(&mut self, kind: RequestKind, lookup: Lookup) -> FetchRequest {
        let ticket = self.sequencer.issue(kind);
        debug!(?kind, seq = ticket.seq, "Issuing lookup");
        FetchRequest { ticket, lookup }
    }

    fn clear_results(&mut self) {
        self.sequencer.invalidate(Slot::Results);
        self.replace_results(Vec::new());
        self.mode = self.mode.on(ModeEvent::Cleared);
    }

    fn replace_results(&mut self, results: ResultSet) {
        debug!(count = results.len(), "Result set replaced");
        self.schema = ResultSchema::of(&results);
        self.results = results;
        self.pager.reset();
    }
}

fn options(kind: RequestKind, outcome: FetchOutcome) -> Vec<String> {
    match outcome {
        Ok(Payload::Options(options)) => {
            debug!(?kind, count = options.len(), "Options updated");
            options
        }
        Ok(Payload::Colleges(_)) => {
            warn!(?kind, "Expected option names, got college rows");
            Vec::new()
        }
        Err(err) => {
            warn!(?kind, error = %err, "Lookup failed, clearing options");
            Vec::new()
        }
    }
}

fn colleges(kind: RequestKind, outcome: FetchOutcome) -> Result<ResultSet, ClientError> {
    match outcome {
        Ok(Payload::Colleges(rows)) => Ok(rows),
        Ok(Payload::Options(_)) => {
            warn!(?kind, "Expected college rows, got option names");
            Err(ClientError::Decode("expected college rows".to_string()))
        }
        Err(err) => {
            warn!(?kind, error = %err, "Colleges lookup failed");
            Err(err)
        }
    }
}
