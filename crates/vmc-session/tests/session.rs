//! Session behaviour against an in-memory directory.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use vmc_client::{ClientError, CollegeDirectory};
use vmc_model::{CollegeQuery, CollegeRecord, Field, ValidationError};
use vmc_session::{
    Applied, Driver, FilterSession, Lookup, Mode, Payload, RequestKind, SubmitError, Submission,
};

#[derive(Default)]
struct FakeDirectory {
    calls: Mutex<Vec<String>>,
    specializations: Vec<String>,
    cities: Vec<String>,
    colleges: Vec<CollegeRecord>,
    fail_colleges: bool,
    fail_options: bool,
    search_delays_ms: HashMap<String, u64>,
}

impl FakeDirectory {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn forget_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl CollegeDirectory for FakeDirectory {
    async fn specializations(&self, stream: &str) -> vmc_client::Result<Vec<String>> {
        self.record(format!("specializations stream={stream}"));
        if self.fail_options {
            return Err(ClientError::Timeout);
        }
        Ok(self.specializations.clone())
    }

    async fn cities(&self, stream: &str) -> vmc_client::Result<Vec<String>> {
        self.record(format!("cities stream={stream}"));
        if self.fail_options {
            return Err(ClientError::Network("connection reset".to_string()));
        }
        Ok(self.cities.clone())
    }

    async fn colleges(&self, query: &CollegeQuery) -> vmc_client::Result<Vec<CollegeRecord>> {
        self.record(format!(
            "colleges stream={} specialization={} city={}",
            query.stream,
            query.specialization,
            query.city.as_deref().unwrap_or("-")
        ));
        if self.fail_colleges {
            return Err(ClientError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(self.colleges.clone())
    }

    async fn search(&self, query: &str) -> vmc_client::Result<Vec<CollegeRecord>> {
        self.record(format!("search q={query}"));
        if let Some(ms) = self.search_delays_ms.get(query) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        let needle = query.to_lowercase();
        Ok(self
            .colleges
            .iter()
            .filter(|c| c.institute_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

fn college(name: &str, city: Option<&str>) -> CollegeRecord {
    CollegeRecord {
        college_code: None,
        institute_name: name.to_string(),
        city: city.map(str::to_string),
        course: "Physics".to_string(),
    }
}

fn science_directory() -> FakeDirectory {
    FakeDirectory {
        specializations: vec!["Physics".to_string(), "Chemistry".to_string()],
        cities: vec!["Pune".to_string(), "Mumbai".to_string()],
        colleges: (1..=15)
            .map(|n| college(&format!("College {n}"), Some("Pune")))
            .collect(),
        ..FakeDirectory::default()
    }
}

async fn fill_undergraduate(driver: &Driver<FakeDirectory>, session: &mut FilterSession) {
    driver
        .set_field(session, Field::EducationLevel, "Undergraduate")
        .await
        .unwrap();
    driver.set_field(session, Field::Stream, "Science").await.unwrap();
    driver
        .set_field(session, Field::Specialization, "Physics")
        .await
        .unwrap();
    driver.set_field(session, Field::City, "All").await.unwrap();
    driver
        .set_field(session, Field::StudentName, "Asha")
        .await
        .unwrap();
}

#[tokio::test]
async fn undergraduate_submit_shows_first_page() {
    let driver = Driver::new(science_directory());
    let mut session = FilterSession::new(7);
    fill_undergraduate(&driver, &mut session).await;
    assert_eq!(session.city_options(), vec!["All", "Pune", "Mumbai"]);
    driver.directory().forget_calls();

    let mode = driver.submit(&mut session).await.unwrap();

    assert_eq!(mode, Mode::Shown);
    assert_eq!(
        driver.directory().calls(),
        vec!["colleges stream=Science specialization=Physics city=All"]
    );
    assert!(session.results_visible());
    let view = session.page_view();
    assert_eq!(view.records.len(), 7);
    assert_eq!(view.page_info(), "Page 1 of 3");
    assert_eq!(session.mode().submit_label(), "Results Displayed");
}

#[tokio::test]
async fn empty_submit_asks_for_required_fields() {
    let driver = Driver::new(science_directory());
    let mut session = FilterSession::new(7);

    let err = driver.submit(&mut session).await.unwrap_err();

    assert!(matches!(
        err,
        SubmitError::Validation(ValidationError::MissingRequired { .. })
    ));
    assert_eq!(err.user_message(), "Please fill all required fields");
    assert!(driver.directory().calls().is_empty());
    assert_eq!(session.mode(), Mode::Editing);
}

#[test]
fn undergraduate_submit_needs_a_city() {
    let mut session = FilterSession::new(7);
    session.set_field(Field::EducationLevel, "ug").unwrap();
    session.set_field(Field::Stream, "Commerce").unwrap();
    session.set_field(Field::Specialization, "Accounts").unwrap();
    session.set_field(Field::StudentName, "Ravi").unwrap();

    let err = session.submit().unwrap_err();
    assert_eq!(err.user_message(), "Please select a city");
}

#[test]
fn undergraduate_specialization_without_city_does_not_fetch_colleges() {
    let mut session = FilterSession::new(7);
    session.set_field(Field::EducationLevel, "ug").unwrap();
    session.set_field(Field::Stream, "Science").unwrap();
    let requests = session.set_field(Field::Specialization, "Physics").unwrap();
    assert!(requests.is_empty());
    assert!(session.results().is_empty());
}

#[tokio::test]
async fn postgraduate_flow_has_no_city() {
    let driver = Driver::new(science_directory());
    let mut session = FilterSession::new(7);

    let requests = session.set_field(Field::EducationLevel, "pg").unwrap();
    assert!(requests.is_empty());
    let requests = session.set_field(Field::Stream, "Master of Science").unwrap();
    let kinds: Vec<_> = requests.iter().map(|r| r.ticket.kind).collect();
    assert_eq!(kinds, vec![RequestKind::Specializations]);
    driver.run(&mut session, requests).await;
    assert!(session.cities().is_empty());
    assert!(session.city_options().is_empty());

    let requests = session
        .set_field(Field::Specialization, "Physics")
        .unwrap();
    assert_eq!(
        requests[0].lookup,
        Lookup::Colleges(CollegeQuery {
            stream: "Master of Science".to_string(),
            specialization: "Physics".to_string(),
            city: None,
        })
    );
    driver.run(&mut session, requests).await;
    session.set_field(Field::StudentName, "Meera").unwrap();
    driver.directory().forget_calls();

    assert_eq!(driver.submit(&mut session).await.unwrap(), Mode::Shown);
    assert_eq!(
        driver.directory().calls(),
        vec!["colleges stream=Master of Science specialization=Physics city=-"]
    );
}

#[tokio::test]
async fn level_change_resets_dependent_fields_and_results() {
    let driver = Driver::new(science_directory());
    let mut session = FilterSession::new(7);
    fill_undergraduate(&driver, &mut session).await;
    driver.submit(&mut session).await.unwrap();
    assert!(!session.results().is_empty());

    session.set_field(Field::EducationLevel, "pg").unwrap();

    let state = session.state();
    assert!(state.stream.is_empty());
    assert!(state.specialization.is_empty());
    assert!(state.city.is_empty());
    assert_eq!(state.student_name, "Asha");
    assert!(session.results().is_empty());
    assert!(session.specializations().is_empty());
    assert_eq!(session.mode(), Mode::Editing);
}

#[tokio::test]
async fn failed_submit_keeps_previous_results() {
    let mut directory = science_directory();
    directory.colleges.truncate(3);
    let driver = Driver::new(directory);
    let mut session = FilterSession::new(7);
    fill_undergraduate(&driver, &mut session).await;
    assert_eq!(session.results().len(), 3);

    let failing = Driver::new(FakeDirectory {
        fail_colleges: true,
        ..science_directory()
    });
    let err = failing.submit(&mut session).await.unwrap_err();

    assert!(matches!(err, SubmitError::Fetch(_)));
    assert_eq!(err.user_message(), "Error fetching colleges. Please try again.");
    assert_eq!(session.results().len(), 3);
    assert_eq!(session.mode(), Mode::Editing);
}

#[tokio::test]
async fn submit_is_ignored_while_results_are_shown() {
    let driver = Driver::new(science_directory());
    let mut session = FilterSession::new(7);
    fill_undergraduate(&driver, &mut session).await;
    driver.submit(&mut session).await.unwrap();
    driver.directory().forget_calls();

    assert!(matches!(
        session.submit().unwrap(),
        Submission::Ignored(Mode::Shown)
    ));
    assert!(driver.directory().calls().is_empty());

    // Editing the name re-enables submit.
    session.set_field(Field::StudentName, "Asha K").unwrap();
    assert_eq!(session.mode(), Mode::Editing);
    assert!(matches!(session.submit().unwrap(), Submission::Pending(_)));
}

#[tokio::test]
async fn pages_through_fifteen_results() {
    let driver = Driver::new(science_directory());
    let mut session = FilterSession::new(7);
    fill_undergraduate(&driver, &mut session).await;
    driver.submit(&mut session).await.unwrap();

    assert!(!session.prev_page());
    assert!(session.next_page());
    assert!(session.next_page());
    assert!(!session.next_page());
    let view = session.page_view();
    assert_eq!(view.page, 3);
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.records[0].institute_name, "College 15");
    assert!(view.schema.has_city);
    assert!(!view.schema.has_college_code);

    driver
        .set_field(&mut session, Field::SearchQuery, "College 1")
        .await
        .unwrap();
    assert_eq!(session.current_page(), 1);
}

#[test]
fn late_short_query_does_not_overwrite_longer_one() {
    let mut session = FilterSession::new(7);
    let short = session.set_field(Field::SearchQuery, "St").unwrap().remove(0);
    let long = session
        .set_field(Field::SearchQuery, "Stanford")
        .unwrap()
        .remove(0);

    let stanford = vec![college("Stanford", None)];
    let applied = session.apply(long.ticket, Ok(Payload::Colleges(stanford.clone())));
    assert!(matches!(applied, Applied::Updated));
    let applied = session.apply(
        short.ticket,
        Ok(Payload::Colleges(vec![
            college("St. Xavier's", None),
            college("Stanford", None),
        ])),
    );

    assert!(matches!(applied, Applied::Stale));
    assert_eq!(session.results(), stanford.as_slice());
    assert_eq!(session.mode(), Mode::Shown);
}

#[tokio::test]
async fn driver_discards_slow_stale_search() {
    let directory = FakeDirectory {
        colleges: vec![college("St. Xavier's", None), college("Stanford", None)],
        search_delays_ms: HashMap::from([("St".to_string(), 40)]),
        ..FakeDirectory::default()
    };
    let driver = Driver::new(directory);
    let mut session = FilterSession::new(7);

    let mut requests = session.set_field(Field::SearchQuery, "St").unwrap();
    requests.extend(session.set_field(Field::SearchQuery, "Stanford").unwrap());
    let applied = driver.run(&mut session, requests).await;

    assert!(matches!(applied[0], Applied::Updated));
    assert!(matches!(applied[1], Applied::Stale));
    assert_eq!(session.results().len(), 1);
    assert_eq!(session.results()[0].institute_name, "Stanford");
}

#[test]
fn blank_search_clears_results() {
    let mut session = FilterSession::new(7);
    let request = session
        .set_field(Field::SearchQuery, "Fergusson")
        .unwrap()
        .remove(0);
    session.apply(
        request.ticket,
        Ok(Payload::Colleges(vec![college("Fergusson College", None)])),
    );
    assert!(session.results_visible());

    let requests = session.set_field(Field::SearchQuery, "   ").unwrap();
    assert!(requests.is_empty());
    assert!(session.results().is_empty());
    assert!(!session.results_visible());
}

#[test]
fn stream_change_discards_pending_cascade() {
    let mut session = FilterSession::new(7);
    session.set_field(Field::EducationLevel, "pg").unwrap();
    session.set_field(Field::Stream, "Master of Arts").unwrap();
    let pending = session
        .set_field(Field::Specialization, "History")
        .unwrap()
        .remove(0);
    assert_eq!(pending.ticket.kind, RequestKind::Colleges);

    session.set_field(Field::Stream, "MA Psychology").unwrap();
    let applied = session.apply(
        pending.ticket,
        Ok(Payload::Colleges(vec![college("Elphinstone", None)])),
    );

    assert!(matches!(applied, Applied::Stale));
    assert!(session.results().is_empty());
}

#[test]
fn edit_during_submit_drops_its_response() {
    let mut session = FilterSession::new(7);
    session.set_field(Field::EducationLevel, "pg").unwrap();
    session.set_field(Field::Stream, "Master of Commerce").unwrap();
    session.set_field(Field::Specialization, "Finance").unwrap();
    session.set_field(Field::StudentName, "Kiran").unwrap();
    let Submission::Pending(request) = session.submit().unwrap() else {
        panic!("expected a pending submit");
    };
    assert_eq!(session.mode(), Mode::Submitting);

    session.set_field(Field::StudentName, "Kiran P").unwrap();
    let applied = session.apply(request.ticket, Ok(Payload::Colleges(Vec::new())));

    assert!(matches!(applied, Applied::Stale));
    assert_eq!(session.mode(), Mode::Editing);
}

#[tokio::test]
async fn reentering_level_or_stream_keeps_dependent_fields() {
    let driver = Driver::new(science_directory());
    let mut session = FilterSession::new(7);
    fill_undergraduate(&driver, &mut session).await;
    driver.submit(&mut session).await.unwrap();
    driver.directory().forget_calls();

    for stream in ["Science", "science"] {
        let requests = session.set_field(Field::Stream, stream).unwrap();
        assert!(requests.is_empty());
    }
    let requests = session
        .set_field(Field::EducationLevel, "Undergraduate")
        .unwrap();
    assert!(requests.is_empty());

    let state = session.state();
    assert_eq!(state.stream, "Science");
    assert_eq!(state.specialization, "Physics");
    assert_eq!(state.city, "All");
    assert_eq!(session.results().len(), 15);
    assert_eq!(session.specializations(), ["Physics", "Chemistry"]);
    assert_eq!(session.mode(), Mode::Shown);
    assert!(driver.directory().calls().is_empty());
}

#[tokio::test]
async fn failed_cascading_lookup_clears_results() {
    let mut directory = science_directory();
    directory.colleges.truncate(3);
    let driver = Driver::new(directory);
    let mut session = FilterSession::new(7);
    fill_undergraduate(&driver, &mut session).await;
    assert_eq!(session.results().len(), 3);

    let failing = Driver::new(FakeDirectory {
        fail_colleges: true,
        ..science_directory()
    });
    let applied = failing
        .set_field(&mut session, Field::City, "Pune")
        .await
        .unwrap();

    assert!(matches!(applied[..], [Applied::Updated]));
    assert_eq!(
        failing.directory().calls(),
        vec!["colleges stream=Science specialization=Physics city=Pune"]
    );
    assert!(session.results().is_empty());
    assert_eq!(session.mode(), Mode::Editing);
}

#[test]
fn failed_search_empties_results() {
    let mut session = FilterSession::new(7);
    let first = session
        .set_field(Field::SearchQuery, "Fergusson")
        .unwrap()
        .remove(0);
    session.apply(
        first.ticket,
        Ok(Payload::Colleges(vec![college("Fergusson College", None)])),
    );
    assert_eq!(session.mode(), Mode::Shown);

    let second = session
        .set_field(Field::SearchQuery, "Fergusson Coll")
        .unwrap()
        .remove(0);
    assert_eq!(session.results().len(), 1);
    let applied = session.apply(second.ticket, Err(ClientError::Timeout));

    assert!(matches!(applied, Applied::Updated));
    assert!(session.results().is_empty());
    assert_eq!(session.mode(), Mode::Editing);
    assert!(!session.results_visible());
}

#[tokio::test]
async fn failed_option_lookups_leave_empty_lists() {
    let driver = Driver::new(science_directory());
    let mut session = FilterSession::new(7);
    driver
        .set_field(&mut session, Field::EducationLevel, "ug")
        .await
        .unwrap();
    driver
        .set_field(&mut session, Field::Stream, "Science")
        .await
        .unwrap();
    assert_eq!(session.city_options(), vec!["All", "Pune", "Mumbai"]);

    let failing = Driver::new(FakeDirectory {
        fail_options: true,
        ..science_directory()
    });
    let applied = failing
        .set_field(&mut session, Field::Stream, "Arts")
        .await
        .unwrap();

    assert_eq!(applied.len(), 2);
    assert!(applied.iter().all(|a| matches!(a, Applied::Updated)));
    assert!(session.specializations().is_empty());
    assert!(session.cities().is_empty());
    assert_eq!(session.city_options(), vec!["All"]);
}

#[test]
fn late_options_for_previous_stream_are_dropped() {
    let mut session = FilterSession::new(7);
    session.set_field(Field::EducationLevel, "ug").unwrap();
    let science = session.set_field(Field::Stream, "Science").unwrap();
    assert_eq!(science.len(), 2);
    let commerce = session.set_field(Field::Stream, "Commerce").unwrap();

    for request in science {
        let applied = session.apply(
            request.ticket,
            Ok(Payload::Options(vec!["Physics".to_string()])),
        );
        assert!(matches!(applied, Applied::Stale));
    }
    assert!(session.specializations().is_empty());
    assert!(session.cities().is_empty());

    for request in commerce {
        let names = match request.ticket.kind {
            RequestKind::Specializations => vec!["Accounts".to_string()],
            _ => vec!["Nashik".to_string()],
        };
        let applied = session.apply(request.ticket, Ok(Payload::Options(names)));
        assert!(matches!(applied, Applied::Updated));
    }
    assert_eq!(session.specializations(), ["Accounts"]);
    assert_eq!(session.city_options(), vec!["All", "Nashik"]);
}
