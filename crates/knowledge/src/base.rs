//! Knowledge Base
//!
//! Read-only facade over the lineage and community tables. Shared freely
//! across turns; nothing here mutates after construction.

use std::path::Path;

use crate::data::builtin_tables;
use crate::error::{KnowledgeError, KnowledgeResult};
use crate::gothra;
use crate::models::{GothraMatch, KnowledgeTables, Region, SubCommunity};
use crate::region::classify_region;

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    tables: KnowledgeTables,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KnowledgeBase {
    /// Knowledge base backed by the compiled-in tables
    pub fn builtin() -> Self {
        Self {
            tables: builtin_tables(),
        }
    }

    /// Wrap an arbitrary table set. Malformed entries surface at lookup time.
    pub fn from_tables(tables: KnowledgeTables) -> Self {
        Self { tables }
    }

    /// Parse replacement tables from JSON
    pub fn from_json(json: &str) -> KnowledgeResult<Self> {
        let tables: KnowledgeTables = serde_json::from_str(json)?;
        Ok(Self::from_tables(tables))
    }

    /// Load replacement tables from a JSON file
    pub fn load(path: impl AsRef<Path>) -> KnowledgeResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn tables(&self) -> &KnowledgeTables {
        &self.tables
    }

    /// Resolve a Gothra, reporting whether the match was exact or fuzzy
    pub fn lookup_gothra(&self, query: &str) -> KnowledgeResult<GothraMatch<'_>> {
        gothra::lookup(&self.tables.gothras, query)
    }

    /// All Pravara options for the best-matching Gothra
    pub fn pravara_options(&self, query: &str) -> KnowledgeResult<&[String]> {
        self.lookup_gothra(query)
            .map(|m| m.entry.pravara_options.as_slice())
    }

    /// First `n` Gothra names in table order
    pub fn well_known_gothras(&self, n: usize) -> Vec<&str> {
        self.tables
            .gothras
            .iter()
            .take(n)
            .map(|e| e.gothra.as_str())
            .collect()
    }

    /// Spiritual-lineage catalog. An empty catalog is malformed data.
    pub fn spiritual_lineages(&self) -> KnowledgeResult<&[String]> {
        if self.tables.spiritual_lineages.is_empty() {
            return Err(KnowledgeError::MalformedEntry(
                "spiritual lineage catalog is empty".to_string(),
            ));
        }
        Ok(&self.tables.spiritual_lineages)
    }

    pub fn sub_communities(&self) -> &[SubCommunity] {
        &self.tables.sub_communities
    }

    /// Sub-communities associated with a region
    pub fn sub_communities_in(&self, region: Region) -> Vec<&SubCommunity> {
        self.tables
            .sub_communities
            .iter()
            .filter(|s| s.region == region)
            .collect()
    }

    /// Catalog region of a sub-community, matched case-insensitively
    pub fn region_of_sub_community(&self, name: &str) -> Option<Region> {
        let key = gothra::normalize_key(name);
        self.tables
            .sub_communities
            .iter()
            .find(|s| gothra::normalize_key(&s.name) == key)
            .map(|s| s.region)
    }

    pub fn classify_region(&self, location: &str) -> Region {
        classify_region(location)
    }

    /// Sagothra check used by compatibility scoring
    pub fn same_gothra(&self, a: &str, b: &str) -> bool {
        gothra::same_gothra(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_pravara_options_for_bharadwaja() {
        let kb = KnowledgeBase::builtin();
        let options = kb.pravara_options("Bharadwaja").unwrap();
        assert_eq!(options[0], "Angirasa - Barhaspatya - Bharadwaja (3 Rishis)");
    }

    #[test]
    fn test_pravara_lookup_is_case_and_whitespace_insensitive() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(
            kb.pravara_options("KASHYAPA ").unwrap(),
            kb.pravara_options("kashyapa").unwrap()
        );
    }

    #[test]
    fn test_well_known_gothras() {
        let kb = KnowledgeBase::builtin();
        let names = kb.well_known_gothras(3);
        assert_eq!(names, vec!["Bharadwaja", "Kashyapa", "Vasishta"]);
    }

    #[test]
    fn test_empty_spiritual_catalog_is_malformed() {
        let kb = KnowledgeBase::from_tables(KnowledgeTables::default());
        assert!(matches!(
            kb.spiritual_lineages(),
            Err(KnowledgeError::MalformedEntry(_))
        ));
    }

    #[test]
    fn test_sub_communities_by_region() {
        let kb = KnowledgeBase::builtin();
        let south = kb.sub_communities_in(Region::SouthIndia);
        assert!(south.iter().any(|s| s.name == "Iyengar"));
        assert!(south.iter().all(|s| s.region == Region::SouthIndia));
        assert_eq!(kb.region_of_sub_community("chitpavan"), Some(Region::WestIndia));
        assert_eq!(kb.region_of_sub_community("unknown"), None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"gothras": [{{"gothra": "Atreya", "pravara_options": ["Atreya (1 Rishi)"]}}]}}"#
        )
        .unwrap();

        let kb = KnowledgeBase::load(file.path()).unwrap();
        assert_eq!(kb.pravara_options("atreya").unwrap(), ["Atreya (1 Rishi)"]);
        assert!(kb.pravara_options("Kashyapa").is_err());
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        assert!(matches!(
            KnowledgeBase::from_json("{ not json"),
            Err(KnowledgeError::Load(_))
        ));
    }
}
