//! Sanitizer Integration Tests
//!
//! Properties of the sanitizer over the kind of noise an extraction oracle
//! produces: placeholders, half-formed dates, replays and stale field names.

use chrono::NaiveDate;
use serde_json::{json, Value};

use biographer::services::biographer::{fix_up, sanitize, CandidateFields};
use biographer::RejectionReason;
use biographer_core::schema;
use biographer_core::{FieldValue, Profile};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn candidates(value: Value) -> CandidateFields {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn noisy_candidate_sets() -> Vec<CandidateFields> {
    vec![
        candidates(json!({"gothra": "Bharadwaja", "diet": "veg"})),
        candidates(json!({"dob": "1993"})),
        candidates(json!({"dob": "12/04/1993", "age": "31 years"})),
        candidates(json!({"partner_preferences": "Someone kind"})),
        candidates(json!({"spiritual_org": "ISKCON, Art of Living"})),
        candidates(json!({"spiritual_org": ["iskcon", "Chinmaya Mission"]})),
        candidates(json!({"location": "skip", "height": "...", "about_me": ""})),
        candidates(json!({"favourite_colour": "blue", "age": "thirty"})),
        candidates(json!({"time_of_birth": null, "dob": "April 1993"})),
    ]
}

fn seeded_profile() -> Profile {
    let mut profile = Profile::from_pairs([
        ("full_name", "Asha Rao"),
        ("partner_preferences", "Family oriented"),
    ]);
    profile.set("spiritual_org", vec!["ISKCON".to_string()]);
    profile
}

#[test]
fn test_sanitize_is_idempotent() {
    for set in noisy_candidate_sets() {
        let once = sanitize(&seeded_profile(), &set, today()).profile;
        let twice = sanitize(&once, &set, today()).profile;
        assert_eq!(once, twice, "candidates: {set:?}");
    }
}

#[test]
fn test_input_is_never_mutated() {
    let original = seeded_profile();
    for set in noisy_candidate_sets() {
        let _ = sanitize(&original, &set, today());
        assert_eq!(original, seeded_profile());
    }
}

#[test]
fn test_skip_never_changes_any_field() {
    let profile = seeded_profile();
    for field in schema::ordered_fields() {
        let mut set = CandidateFields::new();
        set.insert(field.name.to_string(), json!("skip"));
        let outcome = sanitize(&profile, &set, today());
        assert_eq!(outcome.profile.get(field.name), profile.get(field.name), "{}", field.name);
        assert_eq!(outcome.rejected[0].reason, RejectionReason::Placeholder);
    }
}

#[test]
fn test_bare_year_becomes_age() {
    let outcome = sanitize(&Profile::new(), &candidates(json!({"dob": "1993"})), today());
    assert_eq!(outcome.profile.integer("age"), Some(2025 - 1993));
    assert!(!outcome.profile.contains("dob"));
    assert_eq!(outcome.rejected[0].reason, RejectionReason::YearConvertedToAge);

    let mut with_null_dob = Profile::new();
    with_null_dob.set("dob", FieldValue::Null);
    let outcome = sanitize(&with_null_dob, &candidates(json!({"dob": "1993"})), today());
    assert_eq!(outcome.profile.get("dob"), Some(&FieldValue::Null));
}

#[test]
fn test_full_date_is_normalized() {
    let outcome = sanitize(
        &Profile::new(),
        &candidates(json!({"dob": "12/04/1993"})),
        today(),
    );
    assert_eq!(outcome.profile.text("dob"), Some("1993-04-12"));
    assert_eq!(outcome.profile.integer("age"), Some(32));
}

#[test]
fn test_preferences_accumulate_across_turns() {
    let mut profile = seeded_profile();
    for fragment in ["Likes travel", "Vegetarian", "Likes travel"] {
        profile = sanitize(
            &profile,
            &candidates(json!({"partner_preferences": fragment})),
            today(),
        )
        .profile;
    }
    assert_eq!(
        profile.text("partner_preferences"),
        Some("Family oriented. Likes travel. Vegetarian")
    );
}

#[test]
fn test_fix_up_heals_stale_profiles() {
    let mut profile = Profile::from_pairs([
        ("spiritual_org", "ISKCON"),
        ("dob", "1993"),
        ("time_of_birth", ""),
        ("star", "Rohini"),
        ("sub_caste", "Iyer"),
    ]);
    fix_up(&mut profile);

    assert_eq!(profile.list("spiritual_org"), Some(&["ISKCON".to_string()][..]));
    assert_eq!(profile.get("dob"), Some(&FieldValue::Null));
    assert_eq!(profile.get("time_of_birth"), Some(&FieldValue::Null));
    assert!(!profile.contains("star"));
    assert!(!profile.contains("sub_caste"));
}

#[test]
fn test_profile_round_trips_as_plain_json() {
    let outcome = sanitize(
        &Profile::new(),
        &candidates(json!({
            "full_name": "Asha Rao",
            "age": 31,
            "spiritual_org": ["ISKCON"],
        })),
        today(),
    );
    let json = serde_json::to_value(&outcome.profile).unwrap();
    assert_eq!(
        json,
        json!({"full_name": "Asha Rao", "age": 31, "spiritual_org": ["ISKCON"]})
    );
}
