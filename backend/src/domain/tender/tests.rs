//! Tests for tender value types and snapshot behaviour.

use super::*;
use crate::domain::test_fixtures::{sample_tender, ORG_1, USER_1};
use chrono::TimeZone;
use rstest::rstest;

#[rstest]
#[case("CREATED", TenderStatus::Created)]
#[case("PUBLISHED", TenderStatus::Published)]
#[case("CLOSED", TenderStatus::Closed)]
fn parses_known_statuses(#[case] raw: &str, #[case] expected: TenderStatus) {
    assert_eq!(raw.parse::<TenderStatus>(), Ok(expected));
    assert_eq!(expected.to_string(), raw);
}

#[rstest]
#[case("published")]
#[case("OPEN")]
#[case("")]
fn rejects_unknown_statuses(#[case] raw: &str) {
    assert_eq!(
        raw.parse::<TenderStatus>(),
        Err(TenderValidationError::UnknownStatus {
            value: raw.to_owned()
        })
    );
}

#[rstest]
#[case("0")]
#[case("-1")]
#[case("abc")]
#[case("1.5")]
#[case("")]
fn rejects_non_positive_or_non_numeric_versions(#[case] raw: &str) {
    assert_eq!(
        raw.parse::<TenderVersion>(),
        Err(TenderValidationError::InvalidVersion {
            value: raw.to_owned()
        })
    );
}

#[rstest]
fn next_version_increments_by_one() {
    assert_eq!(TenderVersion::INITIAL.next(), TenderVersion::new(2).ok());
    assert_eq!(TenderVersion::new(i32::MAX).ok().and_then(TenderVersion::next), None);
}

#[rstest]
fn edit_accepts_empty_description() {
    let edit = TenderEdit::new(None, Some(String::new()), None).expect("empty description");
    let mut tender = sample_tender();
    tender.apply_edit(&edit);
    assert_eq!(tender.description, "");
    assert_eq!(tender.name, sample_tender().name);
}

#[rstest]
fn edit_rejects_blank_present_fields() {
    assert_eq!(
        TenderEdit::new(None, None, Some(String::new())),
        Err(TenderValidationError::EmptyServiceType)
    );
    assert_eq!(
        TenderEdit::new(Some("\t".into()), None, None),
        Err(TenderValidationError::EmptyName)
    );
}

#[rstest]
fn apply_edit_only_touches_present_fields() {
    let mut tender = sample_tender();
    let original = tender.clone();
    let edit = TenderEdit::new(None, Some("Resurface the bridge".into()), None)
        .expect("valid edit");

    tender.apply_edit(&edit);

    assert_eq!(tender.description, "Resurface the bridge");
    assert_eq!(tender.name, original.name);
    assert_eq!(tender.service_type, original.service_type);
}

#[rstest]
fn restore_copies_snapshot_fields() {
    let original = sample_tender();
    let recorded_at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).single().expect("valid time");
    let snapshot = TenderHistory::snapshot(&original, recorded_at);

    let mut tender = original.clone();
    tender.name = TenderName::new("Renamed").expect("valid name");
    tender.status = TenderStatus::Closed;
    tender.restore(&snapshot);

    assert_eq!(tender.name, original.name);
    assert_eq!(tender.status, original.status);
    assert_eq!(snapshot.version, original.version);
}

#[rstest]
fn draft_takes_resolved_creator() {
    let draft = TenderDraft {
        name: TenderName::new("Road works").expect("valid name"),
        description: String::new(),
        service_type: ServiceType::new("Construction").expect("valid service type"),
        status: TenderStatus::Created,
        organization_id: OrganizationId::new(ORG_1).expect("valid org"),
    };
    let creator = UserId::new(USER_1).expect("valid user");

    let new_tender = draft.with_creator(creator.clone());

    assert_eq!(new_tender.creator_id, creator);
}

#[rstest]
fn tender_serialises_in_camel_case() {
    let value = serde_json::to_value(sample_tender()).expect("tender serialises");
    assert_eq!(value["serviceType"], "Construction");
    assert_eq!(value["status"], "CREATED");
    assert_eq!(value["version"], 1);
    assert_eq!(value["creatorId"], USER_1);
}
