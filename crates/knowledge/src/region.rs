//! Region Classification
//!
//! Maps a free-text location ("Pune, Maharashtra", "Edison NJ, USA") to a
//! broad `Region` by keyword. Keywords are matched on whole words after
//! punctuation is folded to spaces, so "uk" does not match "ukraine".

use crate::models::Region;

/// Checked in order; the first region with a matching keyword wins.
const REGION_KEYWORDS: &[(Region, &[&str])] = &[
    (
        Region::SouthIndia,
        &[
            "chennai", "tamil nadu", "tamilnadu", "bangalore", "bengaluru", "karnataka",
            "mysore", "mysuru", "kerala", "kochi", "cochin", "trivandrum",
            "thiruvananthapuram", "hyderabad", "secunderabad", "telangana", "andhra",
            "vijayawada", "visakhapatnam", "vizag", "coimbatore", "madurai", "mangalore",
            "udupi", "tirupati",
        ],
    ),
    (
        Region::WestIndia,
        &[
            "mumbai", "bombay", "maharashtra", "pune", "nagpur", "nashik", "gujarat",
            "ahmedabad", "surat", "vadodara", "baroda", "goa", "thane",
        ],
    ),
    (
        Region::EastIndia,
        &[
            "kolkata", "calcutta", "west bengal", "bengal", "odisha", "orissa",
            "bhubaneswar", "assam", "guwahati", "jharkhand", "ranchi",
        ],
    ),
    (
        Region::NorthIndia,
        &[
            "delhi", "new delhi", "noida", "gurgaon", "gurugram", "punjab", "haryana",
            "uttar pradesh", "lucknow", "kanpur", "varanasi", "allahabad", "prayagraj",
            "jaipur", "rajasthan", "himachal", "uttarakhand", "dehradun", "chandigarh",
            "kashmir", "jammu", "bihar", "patna", "madhya pradesh", "bhopal", "indore",
        ],
    ),
    (
        Region::NorthAmerica,
        &[
            "usa", "united states", "america", "new jersey", "nj", "california",
            "texas", "tx", "new york", "ny", "chicago", "illinois", "seattle",
            "boston", "massachusetts", "atlanta", "virginia", "north carolina", "florida",
            "michigan", "ohio", "pennsylvania", "bay area", "san francisco", "san jose",
            "dallas", "houston", "austin", "canada", "toronto", "vancouver", "ontario",
        ],
    ),
    (
        Region::Europe,
        &[
            "uk", "united kingdom", "england", "london", "manchester", "scotland",
            "germany", "berlin", "munich", "frankfurt", "france", "paris", "netherlands",
            "amsterdam", "ireland", "dublin", "switzerland", "zurich", "sweden",
        ],
    ),
    (
        Region::MiddleEast,
        &[
            "dubai", "uae", "abu dhabi", "sharjah", "qatar", "doha", "saudi", "riyadh",
            "oman", "muscat", "kuwait", "bahrain",
        ],
    ),
    (
        Region::AsiaPacific,
        &[
            "singapore", "australia", "sydney", "melbourne", "new zealand", "auckland",
            "malaysia", "kuala lumpur", "japan", "tokyo", "hong kong",
        ],
    ),
];

/// Codes that are also ordinary words ("near us"). These only count as a
/// whole comma-separated segment after the first: "San Diego, CA".
const SEGMENT_CODES: &[(Region, &[&str])] =
    &[(Region::NorthAmerica, &["us", "u s", "u s a", "ca"])];

/// Classify a free-text location. Blank or unrecognized input is `Region::Unknown`.
pub fn classify_region(location: &str) -> Region {
    let padded = fold_location(location);
    if padded.trim().is_empty() {
        return Region::Unknown;
    }

    REGION_KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            keywords
                .iter()
                .any(|kw| padded.contains(&format!(" {} ", kw)))
        })
        .map(|(region, _)| *region)
        .or_else(|| segment_code_region(location))
        .unwrap_or(Region::Unknown)
}

fn segment_code_region(location: &str) -> Option<Region> {
    let segments: Vec<String> = location
        .split(',')
        .skip(1)
        .map(|segment| fold_location(segment).trim().to_string())
        .collect();

    SEGMENT_CODES
        .iter()
        .find(|(_, codes)| segments.iter().any(|s| codes.contains(&s.as_str())))
        .map(|(region, _)| *region)
}

/// Lowercase, fold punctuation to spaces, and pad so every word is space-delimited.
fn fold_location(location: &str) -> String {
    let folded: String = location
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let words: Vec<&str> = folded.split_whitespace().collect();
    format!(" {} ", words.join(" "))
}
