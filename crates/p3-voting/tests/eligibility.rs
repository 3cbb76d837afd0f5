//! End-to-end checks of the voting rules against in-memory and scripted
//! record backends.

use std::cell::Cell;

use chrono::{Duration, TimeZone, Utc};
use p3_core::{
    Attendee, ConferenceEdition, ConferenceId, Fare, Order, PaymentMethod, SpeakerAssignment,
    Ticket, TicketAssignment, VotingWindow,
};
use p3_voting::{
    InMemoryRecords, RecordError, VotingPolicy, VotingRecords, is_voting_allowed,
    is_voting_opened,
};
use rstest::{fixture, rstest};

const ADA: &str = "ada@example.org";

fn eligible() -> Vec<ConferenceId> {
    ["ep2017", "ep2018", "ep2019"]
        .into_iter()
        .map(ConferenceId::from)
        .collect()
}

fn current() -> ConferenceId {
    ConferenceId::from("ep2019")
}

fn ticket(
    id: u64,
    owner: &str,
    conference: &str,
    order: Order,
    assigned: Option<&str>,
) -> Ticket {
    Ticket {
        id,
        owner: Some(owner.into()),
        conference: conference.into(),
        fare: Fare {
            code: "TRSP".into(),
            ticket_type: "conference".into(),
        },
        order,
        assignment: assigned.map(|a| TicketAssignment {
            assigned_to: a.into(),
        }),
    }
}

const PAID: Order = Order {
    complete: true,
    method: PaymentMethod::Stripe,
};

const UNPAID: Order = Order {
    complete: false,
    method: PaymentMethod::Stripe,
};

#[fixture]
fn ada() -> Attendee {
    Attendee::authenticated(ADA, false).unwrap()
}

#[rstest]
#[case::no_records(InMemoryRecords::default())]
#[case::speaker_and_ticket(InMemoryRecords::new(
    vec![ticket(1, ADA, "ep2019", PAID, Some(ADA))],
    vec![SpeakerAssignment { speaker_email: ADA.into(), talk: "t".into(), conference: "ep2019".into() }],
))]
fn anonymous_users_never_vote(#[case] records: InMemoryRecords) {
    assert!(!is_voting_allowed(
        &records,
        &Attendee::anonymous(),
        &current(),
        &eligible()
    ));
}

#[test]
fn superusers_always_vote() {
    let admin = Attendee::authenticated("staff@example.org", true).unwrap();
    assert!(is_voting_allowed(
        &InMemoryRecords::default(),
        &admin,
        &current(),
        &eligible()
    ));
}

#[rstest]
fn speakers_of_current_edition_vote(ada: Attendee) {
    let records = InMemoryRecords::new(
        Vec::new(),
        vec![SpeakerAssignment {
            speaker_email: ADA.into(),
            talk: "engines".into(),
            conference: "ep2019".into(),
        }],
    );
    assert!(is_voting_allowed(&records, &ada, &current(), &eligible()));
}

#[rstest]
fn speakers_of_past_edition_need_a_ticket(ada: Attendee) {
    let records = InMemoryRecords::new(
        Vec::new(),
        vec![SpeakerAssignment {
            speaker_email: ADA.into(),
            talk: "engines".into(),
            conference: "ep2018".into(),
        }],
    );
    assert!(!is_voting_allowed(&records, &ada, &current(), &eligible()));
}

#[rstest]
fn ticket_assigned_to_self_grants_vote(ada: Attendee) {
    // Bought by somebody else, assigned to Ada, order never completed.
    let records = InMemoryRecords::new(
        vec![ticket(1, "boss@example.org", "ep2018", UNPAID, Some(ADA))],
        Vec::new(),
    );
    assert!(is_voting_allowed(&records, &ada, &current(), &eligible()));
}

#[rstest]
fn assigned_ticket_outside_eligible_set_does_not_count(ada: Attendee) {
    let records = InMemoryRecords::new(
        vec![ticket(1, "boss@example.org", "ep2014", PAID, Some(ADA))],
        Vec::new(),
    );
    assert!(!is_voting_allowed(&records, &ada, &current(), &eligible()));
}

#[rstest]
fn nobody_without_tickets_or_talks_votes(ada: Attendee) {
    assert!(!is_voting_allowed(
        &InMemoryRecords::default(),
        &ada,
        &current(),
        &eligible()
    ));
}

#[rstest]
#[case::paid_unassigned(PAID, None, true)]
#[case::paid_blank(PAID, Some(""), true)]
#[case::admin_issued(Order { complete: false, method: PaymentMethod::Admin }, None, true)]
#[case::unpaid(UNPAID, None, false)]
#[case::given_away(PAID, Some("bob@example.org"), false)]
fn legacy_purchases(
    ada: Attendee,
    #[case] order: Order,
    #[case] assigned: Option<&str>,
    #[case] expected: bool,
) {
    let records = InMemoryRecords::new(vec![ticket(1, ADA, "ep2017", order, assigned)], Vec::new());
    assert_eq!(
        is_voting_allowed(&records, &ada, &current(), &eligible()),
        expected
    );
}

/// Backend that fails or succeeds on demand and counts legacy lookups.
struct Scripted {
    speaker: fn() -> Result<usize, RecordError>,
    assigned: Vec<Ticket>,
    owned: Vec<Ticket>,
    fail_owned: bool,
    owned_calls: Cell<usize>,
}

impl Scripted {
    fn new() -> Self {
        Self {
            speaker: || Err(RecordError::not_found("speaker", ADA)),
            assigned: Vec::new(),
            owned: Vec::new(),
            fail_owned: false,
            owned_calls: Cell::new(0),
        }
    }
}

impl VotingRecords for Scripted {
    fn speaker_talk_count(&self, _: &str, _: &ConferenceId) -> Result<usize, RecordError> {
        (self.speaker)()
    }

    fn assigned_tickets(&self, _: &str, _: &[ConferenceId]) -> Result<Vec<Ticket>, RecordError> {
        Ok(self.assigned.clone())
    }

    fn owned_tickets(&self, _: &str, _: &ConferenceId) -> Result<Vec<Ticket>, RecordError> {
        self.owned_calls.set(self.owned_calls.get() + 1);
        if self.fail_owned {
            return Err(RecordError::Backend("connection reset".into()));
        }
        Ok(self.owned.clone())
    }
}

#[rstest]
fn assigned_rule_short_circuits_legacy_rule(ada: Attendee) {
    let records = Scripted {
        assigned: vec![ticket(1, "boss@example.org", "ep2019", PAID, Some(ADA))],
        ..Scripted::new()
    };
    assert!(is_voting_allowed(&records, &ada, &current(), &eligible()));
    assert_eq!(records.owned_calls.get(), 0);
}

#[rstest]
fn legacy_rule_stops_at_first_matching_edition(ada: Attendee) {
    let records = Scripted {
        owned: vec![ticket(1, ADA, "ep2017", PAID, None)],
        ..Scripted::new()
    };
    assert!(is_voting_allowed(&records, &ada, &current(), &eligible()));
    assert_eq!(records.owned_calls.get(), 1);
}

#[rstest]
fn backend_failures_deny_without_panicking(ada: Attendee) {
    let records = Scripted {
        speaker: || Err(RecordError::Backend("timeout".into())),
        fail_owned: true,
        ..Scripted::new()
    };
    assert!(!is_voting_allowed(&records, &ada, &current(), &eligible()));
    assert_eq!(records.owned_calls.get(), eligible().len());
}

#[rstest]
fn policy_uses_configured_conferences(ada: Attendee) {
    let policy = VotingPolicy::new("ep2020".into(), vec!["ep2020".into()]);
    let records = InMemoryRecords::new(
        vec![ticket(1, ADA, "ep2019", PAID, Some(ADA))],
        Vec::new(),
    );
    assert!(!policy.allows(&records, &ada));
}

#[rstest]
fn voting_page_opens_during_window_or_for_superusers(ada: Attendee) {
    let start = Utc.with_ymd_and_hms(2019, 4, 1, 0, 0, 0).unwrap();
    let edition = ConferenceEdition::new("ep2019", "EuroPython 2019").with_voting(VotingWindow {
        start,
        end: start + Duration::days(14),
    });
    let admin = Attendee::authenticated("staff@example.org", true).unwrap();

    assert!(is_voting_opened(&ada, &edition, start + Duration::days(1)));
    assert!(!is_voting_opened(&ada, &edition, start - Duration::days(1)));
    assert!(is_voting_opened(&admin, &edition, start - Duration::days(1)));
}
