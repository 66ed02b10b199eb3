//! Sanitizer
//!
//! Turns a raw candidate map from the extraction oracle into a new profile
//! snapshot. Two passes:
//!
//! 1. Per-candidate rules: placeholder rejection, date-of-birth guard,
//!    accumulator append, numeric coercion, set-union for array fields,
//!    enum canonicalization, then plain string passthrough.
//! 2. A fix-up pass over the whole resulting profile that heals shapes the
//!    external store would reject, including values written by older code.
//!
//! The input profile is never mutated and the current date is injected, so
//! `sanitize` is a pure function.

use std::sync::OnceLock;

use biographer_core::schema::{self, FieldKind, FieldSpec};
use biographer_core::{FieldValue, Profile};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::models::turn::{RejectedField, RejectionReason};

/// Raw, untyped extraction output
pub type CandidateFields = serde_json::Map<String, Value>;

/// Formats tried, in order, for separated date-of-birth values
const DOB_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];

const EARLIEST_BIRTH_YEAR: i32 = 1900;
const MAX_AGE: i64 = 120;

/// Separator between accumulated fragments
const ACCUMULATOR_SEPARATOR: &str = ". ";

/// New snapshot plus diagnostics for every dropped candidate
#[derive(Debug, Clone)]
pub struct SanitizeOutcome {
    pub profile: Profile,
    pub rejected: Vec<RejectedField>,
}

/// Merge `candidates` into a copy of `current`, then run the fix-up pass.
pub fn sanitize(current: &Profile, candidates: &CandidateFields, today: NaiveDate) -> SanitizeOutcome {
    let mut profile = current.clone();
    let mut rejected = Vec::new();

    for (key, value) in candidates {
        if let Err(reason) = apply_candidate(&mut profile, key, value, today) {
            debug!(field = %key, reason = ?reason, "Candidate rejected");
            rejected.push(RejectedField::new(key.clone(), reason));
        }
    }

    fix_up(&mut profile);

    if !rejected.is_empty() {
        debug!(
            candidates = candidates.len(),
            rejected = rejected.len(),
            "Sanitized candidate fields"
        );
    }

    SanitizeOutcome { profile, rejected }
}

fn apply_candidate(
    profile: &mut Profile,
    key: &str,
    value: &Value,
    today: NaiveDate,
) -> Result<(), RejectionReason> {
    let spec = schema::field_spec(key).ok_or(RejectionReason::UnknownField)?;
    reject_placeholder(value)?;

    match spec.kind {
        FieldKind::Date => apply_dob(profile, spec, value, today),
        FieldKind::Integer => apply_integer(profile, spec, value),
        FieldKind::Accumulator => apply_accumulator(profile, spec, value),
        FieldKind::StringArray => apply_string_array(profile, spec, value),
        FieldKind::Enumerated(_) => {
            let text = candidate_text(value)?;
            let canonical = spec
                .canonical_option(&text)
                .map(str::to_string)
                .unwrap_or(text);
            profile.set(spec.name, canonical);
            Ok(())
        }
        FieldKind::Text | FieldKind::Time => {
            profile.set(spec.name, candidate_text(value)?);
            Ok(())
        }
    }
}

// ============================================================================
// Per-candidate rules
// ============================================================================

fn reject_placeholder(value: &Value) -> Result<(), RejectionReason> {
    let blank = match value {
        Value::Null => true,
        Value::String(s) => schema::is_placeholder(s),
        Value::Array(items) => items
            .iter()
            .all(|item| scalar_text(item).map_or(true, |s| schema::is_placeholder(&s))),
        _ => false,
    };
    if blank {
        Err(RejectionReason::Placeholder)
    } else {
        Ok(())
    }
}

/// A bare year becomes an age; anything else must be a real, separated date.
fn apply_dob(
    profile: &mut Profile,
    spec: &FieldSpec,
    value: &Value,
    today: NaiveDate,
) -> Result<(), RejectionReason> {
    let raw = candidate_text(value)?;

    if is_bare_year(&raw) {
        let year: i32 = raw.parse().map_err(|_| RejectionReason::UnparseableDate)?;
        if !(EARLIEST_BIRTH_YEAR..=today.year()).contains(&year) {
            return Err(RejectionReason::OutOfRange);
        }
        if profile.integer(schema::AGE).is_none() {
            profile.set(schema::AGE, i64::from(today.year() - year));
        }
        return Err(RejectionReason::YearConvertedToAge);
    }

    if !raw.contains('-') && !raw.contains('/') {
        return Err(RejectionReason::UnparseableDate);
    }

    let date = parse_dob(&raw).ok_or(RejectionReason::UnparseableDate)?;
    if date > today || date.year() < EARLIEST_BIRTH_YEAR {
        return Err(RejectionReason::OutOfRange);
    }

    profile.set(spec.name, date.format("%Y-%m-%d").to_string());
    if profile.integer(schema::AGE).is_none() {
        profile.set(schema::AGE, age_on(date, today));
    }
    Ok(())
}

fn apply_integer(profile: &mut Profile, spec: &FieldSpec, value: &Value) -> Result<(), RejectionReason> {
    let number = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .ok_or(RejectionReason::NotANumber)?,
        Value::String(s) => leading_integer(s).ok_or(RejectionReason::NotANumber)?,
        _ => return Err(RejectionReason::NotANumber),
    };
    if !(0..=MAX_AGE).contains(&number) {
        return Err(RejectionReason::OutOfRange);
    }
    profile.set(spec.name, number);
    Ok(())
}

/// Append-only; a fragment already contained in the text is a duplicate.
/// A stored placeholder counts as empty and is replaced.
fn apply_accumulator(
    profile: &mut Profile,
    spec: &FieldSpec,
    value: &Value,
) -> Result<(), RejectionReason> {
    let fragment = candidate_text(value)?;
    let existing = profile
        .display(spec.name)
        .filter(|text| !schema::is_placeholder(text))
        .unwrap_or_default();

    if existing.contains(&fragment) {
        return Err(RejectionReason::Duplicate);
    }

    let merged = if existing.is_empty() {
        fragment
    } else {
        format!(
            "{}{}{}",
            existing.trim_end().trim_end_matches('.'),
            ACCUMULATOR_SEPARATOR,
            fragment
        )
    };
    profile.set(spec.name, merged);
    Ok(())
}

/// Case-insensitive set union with whatever the field already holds.
fn apply_string_array(
    profile: &mut Profile,
    spec: &FieldSpec,
    value: &Value,
) -> Result<(), RejectionReason> {
    let incoming: Vec<String> = match value {
        Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
        Value::String(s) => split_list(s),
        _ => return Err(RejectionReason::UnsupportedShape),
    };

    let incoming: Vec<String> = incoming
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !schema::is_placeholder(item))
        .collect();
    if incoming.is_empty() {
        return Err(RejectionReason::Placeholder);
    }

    let mut merged = existing_list(profile.get(spec.name));
    let before = merged.len();
    for item in incoming {
        if !merged.iter().any(|m| m.eq_ignore_ascii_case(&item)) {
            merged.push(item);
        }
    }

    if merged.len() == before && profile.list(spec.name).is_some() {
        return Err(RejectionReason::Duplicate);
    }
    profile.set(spec.name, merged);
    Ok(())
}

// ============================================================================
// Whole-profile fix-up
// ============================================================================

/// Heal the whole profile, not only fields touched this turn.
pub fn fix_up(profile: &mut Profile) {
    for spec in schema::all_fields() {
        let Some(value) = profile.get(spec.name).cloned() else {
            continue;
        };
        match spec.kind {
            FieldKind::StringArray => {
                if value.as_list().is_none() {
                    profile.set(spec.name, existing_list(Some(&value)));
                }
            }
            FieldKind::Date => {
                let keep = value
                    .to_display_string()
                    .map(|s| !s.trim().is_empty() && s.contains('-'))
                    .unwrap_or(false);
                if !keep && value != FieldValue::Null {
                    profile.set(spec.name, FieldValue::Null);
                }
            }
            FieldKind::Time => {
                if value.as_text().is_some_and(|s| s.trim().is_empty()) {
                    profile.set(spec.name, FieldValue::Null);
                }
            }
            _ => {}
        }
    }

    for ghost in schema::GHOST_FIELDS {
        if profile.remove(ghost).is_some() {
            debug!(field = %ghost, "Removed deprecated field");
        }
    }
}

// ============================================================================
// Utility functions
// ============================================================================

/// String coercion for scalar candidates; lists are joined.
fn candidate_text(value: &Value) -> Result<String, RejectionReason> {
    match value {
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(scalar_text)
                .filter(|s| !schema::is_placeholder(s))
                .collect();
            if parts.is_empty() {
                Err(RejectionReason::Placeholder)
            } else {
                Ok(parts.join(", "))
            }
        }
        Value::Object(_) => Err(RejectionReason::UnsupportedShape),
        other => scalar_text(other)
            .map(|s| s.trim().to_string())
            .ok_or(RejectionReason::Placeholder),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(
            n.as_i64()
                .map(|i| i.to_string())
                .unwrap_or_else(|| n.to_string()),
        ),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Current contents of an array field, whatever shape it was stored in
fn existing_list(value: Option<&FieldValue>) -> Vec<String> {
    match value {
        Some(FieldValue::List(items)) => items.clone(),
        Some(FieldValue::Text(s)) if !schema::is_placeholder(s) => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

fn is_bare_year(text: &str) -> bool {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(text))
}

/// Leading base-10 integer, ignoring trailing text: "30 years" -> 30
fn leading_integer(text: &str) -> Option<i64> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([+-]?\d+)").ok())
        .as_ref()?
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn parse_dob(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);
    DOB_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

/// Completed years between `dob` and `today`
fn age_on(dob: NaiveDate, today: NaiveDate) -> i64 {
    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    i64::from(years)
}
