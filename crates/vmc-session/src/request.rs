//! Lookup requests and the sequencing that keeps late responses out.
//!
//! Every lookup the session issues carries a [`Ticket`]. Tickets are numbered
//! per [`Slot`], the piece of session state the response will overwrite.
//! Issuing a new request for a slot, or clearing the slot directly, moves the
//! slot's generation forward; a response is only applied when its ticket still
//! carries the latest generation of its slot.

use vmc_client::ClientError;
use vmc_model::{CollegeQuery, CollegeRecord};

/// Session state a response overwrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Specializations,
    Cities,
    /// The single result set shared by cascading lookups, submit and search.
    Results,
}

impl Slot {
    const COUNT: usize = 3;

    fn index(self) -> usize {
        match self {
            Slot::Specializations => 0,
            Slot::Cities => 1,
            Slot::Results => 2,
        }
    }
}

/// Why a request was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Specialization options after a stream change.
    Specializations,
    /// City options after a stream or level change.
    Cities,
    /// Cascading colleges lookup after a filter change.
    Colleges,
    /// Authoritative colleges lookup from the submit action.
    Submit,
    /// Free-text search.
    Search,
}

impl RequestKind {
    /// Slot the response of this request writes to.
    pub fn slot(&self) -> Slot {
        match self {
            RequestKind::Specializations => Slot::Specializations,
            RequestKind::Cities => Slot::Cities,
            RequestKind::Colleges | RequestKind::Submit | RequestKind::Search => Slot::Results,
        }
    }
}

/// Identifies an issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub kind: RequestKind,
    pub seq: u64,
}

/// Directory call a request needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Specializations { stream: String },
    Cities { stream: String },
    Colleges(CollegeQuery),
    Search { query: String },
}

/// A lookup the caller should run and feed back with
/// [`FilterSession::apply`](crate::FilterSession::apply).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: Ticket,
    pub lookup: Lookup,
}

/// Successful lookup response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Specialization or city names.
    Options(Vec<String>),
    /// College rows.
    Colleges(Vec<CollegeRecord>),
}

/// Result of running a [`FetchRequest`].
pub type FetchOutcome = Result<Payload, ClientError>;

/// Latest issued generation per slot.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    latest: [u64; Slot::COUNT],
}

impl Sequencer {
    /// Issues a ticket, superseding every earlier ticket of the same slot.
    pub fn issue(&mut self, kind: RequestKind) -> Ticket {
        let seq = self.advance(kind.slot());
        Ticket { kind, seq }
    }

    /// Supersedes every outstanding ticket of `slot`.
    pub fn invalidate(&mut self, slot: Slot) {
        self.advance(slot);
    }

    /// Whether a response for `ticket` may still be applied.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest[ticket.kind.slot().index()] == ticket.seq
    }

    fn advance(&mut self, slot: Slot) -> u64 {
        let latest = &mut self.latest[slot.index()];
        *latest += 1;
        *latest
    }
}
