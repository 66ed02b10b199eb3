//! Knowledge Base Models
//!
//! Data structures for lineage lookups, community catalogs, and regions.

use serde::{Deserialize, Serialize};

/// Broad geographic region used to tailor community suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    NorthIndia,
    SouthIndia,
    EastIndia,
    WestIndia,
    NorthAmerica,
    Europe,
    MiddleEast,
    AsiaPacific,
    Unknown,
}

impl Region {
    /// Get human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Region::NorthIndia => "North India",
            Region::SouthIndia => "South India",
            Region::EastIndia => "East India",
            Region::WestIndia => "West India",
            Region::NorthAmerica => "North America",
            Region::Europe => "Europe",
            Region::MiddleEast => "Middle East",
            Region::AsiaPacific => "Asia Pacific",
            Region::Unknown => "Unknown",
        }
    }

    /// Regions inside India, where sub-community catalogs are organized
    pub fn is_indian(&self) -> bool {
        matches!(
            self,
            Region::NorthIndia | Region::SouthIndia | Region::EastIndia | Region::WestIndia
        )
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A Gothra and the Pravara sequences recognized for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GothraEntry {
    /// Display name, e.g. "Bharadwaja"
    pub gothra: String,
    /// Ordered Pravara options, e.g. "Angirasa - Barhaspatya - Bharadwaja (3 Rishis)"
    pub pravara_options: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// A sub-community and the region it is most associated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCommunity {
    pub name: String,
    pub region: Region,
}

/// How a Gothra query was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Normalized query equals the normalized key
    Exact,
    /// Substring match in either direction
    Fuzzy,
}

/// Result of a successful Gothra lookup.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GothraMatch<'a> {
    pub entry: &'a GothraEntry,
    pub kind: MatchKind,
}

/// The full table set. This is also the on-disk format for replacement tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeTables {
    #[serde(default)]
    pub gothras: Vec<GothraEntry>,
    #[serde(default)]
    pub spiritual_lineages: Vec<String>,
    #[serde(default)]
    pub sub_communities: Vec<SubCommunity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_serialization() {
        let json = serde_json::to_string(&Region::SouthIndia).unwrap();
        assert_eq!(json, "\"south_india\"");

        let parsed: Region = serde_json::from_str("\"north_america\"").unwrap();
        assert_eq!(parsed, Region::NorthAmerica);
    }

    #[test]
    fn test_region_is_indian() {
        assert!(Region::WestIndia.is_indian());
        assert!(!Region::Europe.is_indian());
        assert!(!Region::Unknown.is_indian());
    }

    #[test]
    fn test_tables_tolerate_missing_sections() {
        let tables: KnowledgeTables =
            serde_json::from_str(r#"{"spiritual_lineages": ["ISKCON"]}"#).unwrap();
        assert!(tables.gothras.is_empty());
        assert_eq!(tables.spiritual_lineages, vec!["ISKCON".to_string()]);
    }
}
