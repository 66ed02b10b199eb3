//! Compatibility Scorer
//!
//! Weighted rule categories summed and clamped to `0..=MAX_SCORE`. Each
//! category is skipped when either side lacks its data, except birth-star
//! presence which rewards partial data too. A shared Gothra vetoes the match
//! before any category runs.

use biographer_core::schema::{self, is_placeholder};
use biographer_core::Profile;
use biographer_knowledge::same_gothra;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 100 is never reached
pub const MAX_SCORE: u8 = 99;

/// Diet tokens for the vegetarian family, matched as substrings
const VEGETARIAN_TOKENS: &[&str] = &["vegetarian", "vegan", "eggetarian", "jain", "veg"];

/// Visa values that count as settled residency, matched as substrings
const SETTLED_TOKENS: &[&str] = &["citizen", "green card", "greencard", "permanent"];

/// A rule category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SubCommunity,
    Diet,
    AgeGap,
    Nakshatra,
    Location,
    Height,
    Education,
    VisaStatus,
}

/// Points one category contributed. May be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub points: i32,
}

/// Result of comparing two profiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Clamped total, `0..=MAX_SCORE`
    pub score: u8,
    /// Same Gothra; `score` is 0 and `breakdown` is empty
    pub disqualified: bool,
    /// Categories that contributed, in evaluation order
    pub breakdown: Vec<CategoryScore>,
}

impl MatchOutcome {
    fn sagothra() -> Self {
        Self {
            score: 0,
            disqualified: true,
            breakdown: Vec::new(),
        }
    }

    /// True when the zero score is the Gothra veto rather than zero points
    pub fn is_sagothra(&self) -> bool {
        self.disqualified
    }

    /// Unclamped sum of the breakdown
    pub fn raw_total(&self) -> i32 {
        self.breakdown.iter().map(|c| c.points).sum()
    }
}

/// Score `me` against `them`.
pub fn evaluate(me: &Profile, them: &Profile) -> MatchOutcome {
    if let (Some(a), Some(b)) = (value(me, schema::GOTHRA), value(them, schema::GOTHRA)) {
        if same_gothra(&a, &b) {
            debug!(gothra = %a, "Sagothra match, disqualified");
            return MatchOutcome::sagothra();
        }
    }

    let rules: [(Category, fn(&Profile, &Profile) -> Option<i32>); 8] = [
        (Category::SubCommunity, sub_community_points),
        (Category::Diet, diet_points),
        (Category::AgeGap, age_gap_points),
        (Category::Nakshatra, nakshatra_points),
        (Category::Location, location_points),
        (Category::Height, height_points),
        (Category::Education, education_points),
        (Category::VisaStatus, visa_points),
    ];

    let breakdown: Vec<CategoryScore> = rules
        .iter()
        .filter_map(|(category, rule)| {
            rule(me, them).map(|points| CategoryScore {
                category: *category,
                points,
            })
        })
        .collect();

    let total: i32 = breakdown.iter().map(|c| c.points).sum();
    let score = total.clamp(0, MAX_SCORE as i32) as u8;
    debug!(total = total, score = score, categories = breakdown.len(), "Compatibility scored");

    MatchOutcome {
        score,
        disqualified: false,
        breakdown,
    }
}

/// Score only; 0 for both a veto and zero points.
pub fn score(me: &Profile, them: &Profile) -> u8 {
    evaluate(me, them).score
}

/// Lowercased, trimmed, non-placeholder value
fn value(profile: &Profile, field: &str) -> Option<String> {
    profile
        .display(field)
        .filter(|v| !is_placeholder(v))
        .map(|v| v.to_lowercase())
}

fn pair(me: &Profile, them: &Profile, field: &str) -> Option<(String, String)> {
    Some((value(me, field)?, value(them, field)?))
}

/// Exact match, else substring either direction
fn match_or_contains(a: &str, b: &str, exact: i32, partial: i32) -> i32 {
    if a == b {
        exact
    } else if a.contains(b) || b.contains(a) {
        partial
    } else {
        0
    }
}

fn sub_community_points(me: &Profile, them: &Profile) -> Option<i32> {
    let (a, b) = pair(me, them, schema::SUB_COMMUNITY)?;
    Some(match_or_contains(&a, &b, 25, 15))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DietFamily {
    Vegetarian,
    NonVegetarian,
}

fn diet_family(diet: &str) -> Option<DietFamily> {
    let non_veg = (diet.contains("non") && diet.contains("veg"))
        || diet.contains("meat")
        || diet.contains("pescatarian");
    if non_veg {
        Some(DietFamily::NonVegetarian)
    } else if VEGETARIAN_TOKENS.iter().any(|t| diet.contains(t)) {
        Some(DietFamily::Vegetarian)
    } else {
        None
    }
}

fn diet_points(me: &Profile, them: &Profile) -> Option<i32> {
    let (a, b) = pair(me, them, schema::DIET)?;
    if a == b {
        return Some(20);
    }
    let points = match (diet_family(&a), diet_family(&b)) {
        (Some(x), Some(y)) if x == y => 15,
        (Some(_), Some(_)) => -5,
        _ => 0,
    };
    Some(points)
}

fn age_gap_points(me: &Profile, them: &Profile) -> Option<i32> {
    let a = me.integer(schema::AGE)?;
    let b = them.integer(schema::AGE)?;
    let points = match a.abs_diff(b) {
        0..=3 => 15,
        4..=5 => 12,
        6..=8 => 8,
        9..=12 => 3,
        _ => 0,
    };
    Some(points)
}

/// Presence proxy only; no astrological matching
fn nakshatra_points(me: &Profile, them: &Profile) -> Option<i32> {
    let present = [me, them]
        .iter()
        .filter(|p| value(p, schema::NAKSHATRA).is_some())
        .count();
    match present {
        2 => Some(20),
        1 => Some(10),
        _ => None,
    }
}

fn location_points(me: &Profile, them: &Profile) -> Option<i32> {
    let (a, b) = pair(me, them, schema::LOCATION)?;
    Some(match_or_contains(&a, &b, 10, 5))
}

/// Units as stored; a side without a leading number scores the minimum
fn height_points(me: &Profile, them: &Profile) -> Option<i32> {
    let (a, b) = pair(me, them, schema::HEIGHT)?;
    let points = match (leading_number(&a), leading_number(&b)) {
        (Some(x), Some(y)) => {
            let diff = (x - y).abs();
            if diff <= 10.0 {
                10
            } else if diff <= 20.0 {
                7
            } else {
                3
            }
        }
        _ => 3,
    };
    Some(points)
}

/// Digits and dots only, so feet-inches values ("5'10", "5'8") read as feet
fn leading_number(text: &str) -> Option<f64> {
    let end = text
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

fn education_points(me: &Profile, them: &Profile) -> Option<i32> {
    let (a, b) = pair(me, them, schema::EDUCATION)?;
    Some(if a == b { 5 } else { 0 })
}

fn is_settled(visa: &str) -> bool {
    visa == "pr" || SETTLED_TOKENS.iter().any(|t| visa.contains(t))
}

fn visa_points(me: &Profile, them: &Profile) -> Option<i32> {
    let (a, b) = pair(me, them, schema::VISA_STATUS)?;
    let points = if a == b {
        5
    } else if is_settled(&a) && is_settled(&b) {
        3
    } else {
        0
    };
    Some(points)
}
