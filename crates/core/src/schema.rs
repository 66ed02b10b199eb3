//! Field Schema
//!
//! The canonical, ordered list of profile fields and the per-shape
//! completeness predicates. The order is a product decision: horoscope
//! critical fields come first, lifestyle fields next, optional media after
//! that, and partner preferences is pinned last.

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::profile::{FieldValue, Profile};

pub const FULL_NAME: &str = "full_name";
pub const GENDER: &str = "gender";
pub const DOB: &str = "dob";
pub const TIME_OF_BIRTH: &str = "time_of_birth";
pub const PLACE_OF_BIRTH: &str = "place_of_birth";
pub const GOTHRA: &str = "gothra";
pub const PRAVARA: &str = "pravara";
pub const NAKSHATRA: &str = "nakshatra";
pub const RASHI: &str = "rashi";
pub const SUB_COMMUNITY: &str = "sub_community";
pub const SPIRITUAL_ORG: &str = "spiritual_org";
pub const DIET: &str = "diet";
pub const HEIGHT: &str = "height";
pub const EDUCATION: &str = "education";
pub const PROFESSION: &str = "profession";
pub const LOCATION: &str = "location";
pub const VISA_STATUS: &str = "visa_status";
pub const MARITAL_STATUS: &str = "marital_status";
pub const ABOUT_ME: &str = "about_me";
pub const PHOTO_URL: &str = "photo_url";
pub const VIDEO_URL: &str = "video_url";
pub const PARTNER_PREFERENCES: &str = "partner_preferences";
pub const AGE: &str = "age";

/// Accumulated partner-preference text must be longer than this to count.
pub const MIN_PARTNER_PREFERENCES_LEN: usize = 5;

/// Values that mean "nothing was said".
pub const PLACEHOLDER_VALUES: &[&str] = &["...", "", "skip"];

/// Field names from older schema revisions. Deleted on every sanitize pass.
pub const GHOST_FIELDS: &[&str] = &[
    "star",
    "sub_caste",
    "spiritual_orgs",
    "horoscope_file",
    "dob_year",
];

/// Canonical option plus the lowercase spellings that map onto it.
pub type EnumOption = (&'static str, &'static [&'static str]);

/// Shape of a field, which decides both completeness and sanitization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Enumerated(&'static [EnumOption]),
    Integer,
    Date,
    Time,
    StringArray,
    /// Append-only free text
    Accumulator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldTier {
    Horoscope,
    Lifestyle,
    Media,
    Preferences,
    /// Written by the sanitizer, never asked for
    Derived,
}

/// One schema entry.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Human-readable topic label
    pub label: &'static str,
    pub kind: FieldKind,
    pub tier: FieldTier,
}

impl FieldSpec {
    const fn new(
        name: &'static str,
        label: &'static str,
        kind: FieldKind,
        tier: FieldTier,
    ) -> Self {
        Self {
            name,
            label,
            kind,
            tier,
        }
    }

    /// Shape-specific completeness predicate.
    pub fn is_filled(&self, value: Option<&FieldValue>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match self.kind {
            FieldKind::StringArray => match value {
                FieldValue::List(items) => !items.is_empty(),
                FieldValue::Text(s) => !is_placeholder(s),
                _ => false,
            },
            FieldKind::Accumulator => value
                .to_display_string()
                .map(|s| s.trim().chars().count() > MIN_PARTNER_PREFERENCES_LEN)
                .unwrap_or(false),
            _ => value
                .to_display_string()
                .map(|s| !is_placeholder(&s))
                .unwrap_or(false),
        }
    }

    /// Map a raw answer onto the canonical option of an enumerated field.
    pub fn canonical_option(&self, raw: &str) -> Option<&'static str> {
        let FieldKind::Enumerated(options) = self.kind else {
            return None;
        };
        let needle = raw.trim().to_lowercase();
        options
            .iter()
            .find(|(canonical, aliases)| {
                canonical.to_lowercase() == needle || aliases.iter().any(|a| *a == needle)
            })
            .map(|(canonical, _)| *canonical)
    }
}

const GENDERS: &[EnumOption] = &[
    ("Male", &["m", "man", "boy", "groom"]),
    ("Female", &["f", "woman", "girl", "bride"]),
];

const DIETS: &[EnumOption] = &[
    ("Vegetarian", &["veg", "pure veg", "pure vegetarian"]),
    ("Vegan", &["plant based", "plant-based"]),
    ("Eggetarian", &["egg", "ovo vegetarian"]),
    ("Jain", &["jain vegetarian"]),
    (
        "Non-Vegetarian",
        &["non-veg", "nonveg", "non veg", "non vegetarian", "nonvegetarian"],
    ),
];

const MARITAL_STATUSES: &[EnumOption] = &[
    ("Never Married", &["single", "unmarried", "never-married"]),
    ("Divorced", &[]),
    ("Widowed", &["widow", "widower"]),
    ("Separated", &["awaiting divorce"]),
];

const VISA_STATUSES: &[EnumOption] = &[
    ("Citizen", &["us citizen", "citizenship"]),
    ("Green Card", &["greencard", "permanent resident", "pr"]),
    ("H1B", &["h-1b", "h1-b", "h1 b", "work visa"]),
    ("Student Visa", &["f1", "f-1", "student"]),
    ("OCI", &["overseas citizen of india"]),
];

static ORDERED_FIELDS: [FieldSpec; 22] = [
    FieldSpec::new(FULL_NAME, "Full name", FieldKind::Text, FieldTier::Horoscope),
    FieldSpec::new(GENDER, "Gender", FieldKind::Enumerated(GENDERS), FieldTier::Horoscope),
    FieldSpec::new(DOB, "Date of birth", FieldKind::Date, FieldTier::Horoscope),
    FieldSpec::new(TIME_OF_BIRTH, "Time of birth", FieldKind::Time, FieldTier::Horoscope),
    FieldSpec::new(PLACE_OF_BIRTH, "Place of birth", FieldKind::Text, FieldTier::Horoscope),
    FieldSpec::new(GOTHRA, "Gothra", FieldKind::Text, FieldTier::Horoscope),
    FieldSpec::new(PRAVARA, "Pravara", FieldKind::Text, FieldTier::Horoscope),
    FieldSpec::new(NAKSHATRA, "Birth star (Nakshatra)", FieldKind::Text, FieldTier::Horoscope),
    FieldSpec::new(RASHI, "Moon sign (Rashi)", FieldKind::Text, FieldTier::Horoscope),
    FieldSpec::new(SUB_COMMUNITY, "Sub-community", FieldKind::Text, FieldTier::Lifestyle),
    FieldSpec::new(
        SPIRITUAL_ORG,
        "Spiritual affiliation",
        FieldKind::StringArray,
        FieldTier::Lifestyle,
    ),
    FieldSpec::new(DIET, "Diet", FieldKind::Enumerated(DIETS), FieldTier::Lifestyle),
    FieldSpec::new(HEIGHT, "Height", FieldKind::Text, FieldTier::Lifestyle),
    FieldSpec::new(EDUCATION, "Education", FieldKind::Text, FieldTier::Lifestyle),
    FieldSpec::new(PROFESSION, "Profession", FieldKind::Text, FieldTier::Lifestyle),
    FieldSpec::new(LOCATION, "Current location", FieldKind::Text, FieldTier::Lifestyle),
    FieldSpec::new(
        VISA_STATUS,
        "Visa / residency status",
        FieldKind::Enumerated(VISA_STATUSES),
        FieldTier::Lifestyle,
    ),
    FieldSpec::new(
        MARITAL_STATUS,
        "Marital status",
        FieldKind::Enumerated(MARITAL_STATUSES),
        FieldTier::Lifestyle,
    ),
    FieldSpec::new(ABOUT_ME, "About me", FieldKind::Text, FieldTier::Lifestyle),
    FieldSpec::new(PHOTO_URL, "Profile photo", FieldKind::Text, FieldTier::Media),
    FieldSpec::new(VIDEO_URL, "Video introduction", FieldKind::Text, FieldTier::Media),
    FieldSpec::new(
        PARTNER_PREFERENCES,
        "Partner preferences",
        FieldKind::Accumulator,
        FieldTier::Preferences,
    ),
];

static DERIVED_FIELDS: [FieldSpec; 1] =
    [FieldSpec::new(AGE, "Age", FieldKind::Integer, FieldTier::Derived)];

/// The fields a complete profile needs, in the order they are asked.
pub fn ordered_fields() -> &'static [FieldSpec] {
    &ORDERED_FIELDS
}

/// Every field the schema knows about, asked fields first.
pub fn all_fields() -> impl Iterator<Item = &'static FieldSpec> {
    ORDERED_FIELDS.iter().chain(DERIVED_FIELDS.iter())
}

/// All known field names; this is the key set the extraction oracle may use.
pub fn field_names() -> Vec<&'static str> {
    all_fields().map(|f| f.name).collect()
}

pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    all_fields().find(|f| f.name == name)
}

/// Like `field_spec`, for callers that treat an unknown name as an error.
pub fn require_field(name: &str) -> CoreResult<&'static FieldSpec> {
    field_spec(name).ok_or_else(|| CoreError::unknown_field(name))
}

/// Trimmed, case-insensitive placeholder check.
pub fn is_placeholder(value: &str) -> bool {
    let v = value.trim();
    PLACEHOLDER_VALUES
        .iter()
        .any(|p| p.eq_ignore_ascii_case(v))
}

/// Whether `field` counts as filled in `profile`. Unknown names are never complete.
pub fn is_complete(profile: &Profile, field: &str) -> bool {
    require_field(field)
        .map(|spec| spec.is_filled(profile.get(field)))
        .unwrap_or(false)
}

/// Asked fields that are still incomplete, in canonical order.
pub fn missing_fields(profile: &Profile) -> Vec<&'static FieldSpec> {
    ordered_fields()
        .iter()
        .filter(|f| !f.is_filled(profile.get(f.name)))
        .collect()
}

/// Share of asked fields that are complete, 0-100.
pub fn completion_progress(profile: &Profile) -> f64 {
    let total = ordered_fields().len();
    let done = total - missing_fields(profile).len();
    (done as f64 / total as f64) * 100.0
}

/// `"place_of_birth"` -> `"place of birth"`
pub fn humanize(field: &str) -> String {
    field.replace('_', " ")
}
