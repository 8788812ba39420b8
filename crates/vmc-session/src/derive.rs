//! Derived lists and the fields they depend on.
//!
//! Each derivation declares its dependencies once. After an edit the session
//! recomputes exactly the derivations with a dependency whose value changed.

use vmc_model::{CollegeQuery, Field, FilterState};

use crate::request::{Lookup, RequestKind};

/// A list derived from the filter state through a directory lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Derivation {
    pub kind: RequestKind,
    pub depends_on: &'static [Field],
}

/// What recomputing a derivation amounts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Prerequisites are missing; the list becomes empty without a request.
    Clear,
    /// Run the lookup and replace the list with its response.
    Fetch(Lookup),
}

pub const SPECIALIZATIONS: Derivation = Derivation {
    kind: RequestKind::Specializations,
    depends_on: &[Field::Stream],
};

pub const CITIES: Derivation = Derivation {
    kind: RequestKind::Cities,
    depends_on: &[Field::Stream, Field::EducationLevel],
};

pub const COLLEGES: Derivation = Derivation {
    kind: RequestKind::Colleges,
    depends_on: &[
        Field::Stream,
        Field::Specialization,
        Field::City,
        Field::EducationLevel,
    ],
};

/// All derivations, in the order they are recomputed.
pub static DERIVATIONS: [Derivation; 3] = [SPECIALIZATIONS, CITIES, COLLEGES];

impl Derivation {
    /// Whether any of `changed` is a dependency.
    pub fn is_affected_by(&self, changed: &[Field]) -> bool {
        self.depends_on.iter().any(|field| changed.contains(field))
    }

    /// Decides how to recompute this list for `state`.
    pub fn plan(&self, state: &FilterState) -> Plan {
        match self.kind {
            RequestKind::Specializations => {
                if state.stream.is_empty() {
                    Plan::Clear
                } else {
                    Plan::Fetch(Lookup::Specializations {
                        stream: state.stream.clone(),
                    })
                }
            }
            RequestKind::Cities => {
                if state.uses_city() && !state.stream.is_empty() {
                    Plan::Fetch(Lookup::Cities {
                        stream: state.stream.clone(),
                    })
                } else {
                    Plan::Clear
                }
            }
            RequestKind::Colleges => {
                // Undergraduate colleges are only listed once a city is chosen.
                if state.uses_city() && state.city.is_empty() {
                    return Plan::Clear;
                }
                CollegeQuery::for_filter(state).map_or(Plan::Clear, |query| {
                    Plan::Fetch(Lookup::Colleges(query))
                })
            }
            RequestKind::Submit | RequestKind::Search => Plan::Clear,
        }
    }
}

/// Derivations to recompute after `changed` fields were edited.
pub fn affected(changed: &[Field]) -> impl Iterator<Item = &'static Derivation> + '_ {
    DERIVATIONS
        .iter()
        .filter(move |derivation| derivation.is_affected_by(changed))
}
