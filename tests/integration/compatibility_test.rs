//! Compatibility Integration Tests
//!
//! Scoring over profiles in their persisted JSON shape.

use serde_json::{json, Value};

use biographer::services::biographer::fix_up;
use biographer::{evaluate, score};
use biographer_core::Profile;

fn profile(value: Value) -> Profile {
    let mut profile: Profile = serde_json::from_value(value).unwrap();
    fix_up(&mut profile);
    profile
}

fn asha() -> Profile {
    profile(json!({
        "full_name": "Asha Rao",
        "age": 31,
        "gothra": "Kashyapa",
        "sub_community": "Havyaka",
        "diet": "Vegetarian",
        "nakshatra": "Rohini",
        "location": "Bengaluru",
        "height": "165 cm",
        "education": "MBA",
        "visa_status": "Citizen",
        "spiritual_org": "Art of Living"
    }))
}

fn vikram() -> Profile {
    profile(json!({
        "full_name": "Vikram Bhat",
        "age": 33,
        "gothra": "Bharadwaja",
        "sub_community": "havyaka",
        "diet": "vegetarian",
        "nakshatra": "Ashwini",
        "location": "bengaluru",
        "height": "172 cm",
        "education": "mba",
        "visa_status": "citizen"
    }))
}

#[test]
fn test_perfect_match_is_capped() {
    let outcome = evaluate(&asha(), &vikram());
    assert!(!outcome.disqualified);
    assert_eq!(outcome.raw_total(), 110);
    assert_eq!(outcome.score, 99);
}

#[test]
fn test_sagothra_always_scores_zero() {
    for gothra in ["Kashyapa", "KASHYAPA", "  kashyapa "] {
        let mut them = vikram();
        them.set("gothra", gothra);
        let outcome = evaluate(&asha(), &them);
        assert!(outcome.is_sagothra(), "{gothra}");
        assert_eq!(outcome.score, 0);
        assert!(outcome.breakdown.is_empty());
    }
}

#[test]
fn test_placeholder_gothra_does_not_veto() {
    let mut me = asha();
    let mut them = vikram();
    me.set("gothra", "skip");
    them.set("gothra", "skip");
    assert!(!evaluate(&me, &them).disqualified);
}

#[test]
fn test_scores_are_always_in_bounds() {
    let diets = ["Vegan", "Non-Vegetarian", "Eggetarian", ""];
    let ages = [20, 31, 45, 70];
    let heights = ["5.4", "180 cm", "tall", ""];

    for diet in diets {
        for age in ages {
            for height in heights {
                let mut them = vikram();
                them.set("diet", diet);
                them.set("age", age as i64);
                them.set("height", height);
                let value = score(&asha(), &them);
                assert!(value <= 99);
            }
        }
    }
}

#[test]
fn test_sparse_profiles_score_low() {
    let me = profile(json!({"full_name": "Asha Rao"}));
    let them = profile(json!({"full_name": "Vikram Bhat", "nakshatra": "Ashwini"}));
    let outcome = evaluate(&me, &them);
    assert_eq!(outcome.score, 10);
    assert_eq!(outcome.breakdown.len(), 1);
}

#[test]
fn test_clashing_diets_can_floor_at_zero() {
    let me = profile(json!({"diet": "Vegan"}));
    let them = profile(json!({"diet": "Non-Vegetarian"}));
    let outcome = evaluate(&me, &them);
    assert_eq!(outcome.raw_total(), -5);
    assert_eq!(outcome.score, 0);
    assert!(!outcome.is_sagothra());
}

#[test]
fn test_outcome_json_shape() {
    let outcome = evaluate(&asha(), &vikram());
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["score"], 99);
    assert_eq!(json["disqualified"], false);
    assert_eq!(json["breakdown"][0]["category"], "sub_community");
    assert_eq!(json["breakdown"][0]["points"], 25);
}
