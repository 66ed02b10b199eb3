//! Knowledge Base Integration Tests

use std::io::Write;

use biographer_knowledge::{KnowledgeBase, KnowledgeError, MatchKind, Region};

#[test]
fn test_pravara_lookup_normalizes_query() {
    let kb = KnowledgeBase::builtin();
    assert_eq!(
        kb.pravara_options("KASHYAPA ").unwrap(),
        kb.pravara_options("kashyapa").unwrap()
    );
}

#[test]
fn test_fuzzy_lookup_from_a_sentence() {
    let kb = KnowledgeBase::builtin();
    let found = kb.lookup_gothra("I am Bharadwaja").unwrap();
    assert_eq!(found.entry.gothra, "Bharadwaja");
    assert_eq!(found.kind, MatchKind::Fuzzy);

    let found = kb.lookup_gothra("bharadwaj").unwrap();
    assert_eq!(found.entry.gothra, "Bharadwaja");
}

#[test]
fn test_unknown_gothra() {
    let kb = KnowledgeBase::builtin();
    assert!(matches!(
        kb.lookup_gothra("Zzyzx"),
        Err(KnowledgeError::UnknownGothra(_))
    ));
    assert!(kb.lookup_gothra("   ").is_err());
}

#[test]
fn test_replacement_tables_take_over_every_lookup() {
    let kb = KnowledgeBase::from_json(
        r#"{
            "gothras": [
                {"gothra": "Kutsa", "pravara_options": ["Angirasa - Mandhatra - Kautsa (3 Rishis)"]},
                {"gothra": "Empty", "pravara_options": []}
            ],
            "spiritual_lineages": ["Ramakrishna Mission"],
            "sub_communities": [{"name": "Kota", "region": "south_india"}]
        }"#,
    )
    .unwrap();

    assert_eq!(
        kb.pravara_options("kutsa").unwrap(),
        ["Angirasa - Mandhatra - Kautsa (3 Rishis)"]
    );
    assert!(matches!(
        kb.pravara_options("Empty"),
        Err(KnowledgeError::MalformedEntry(_))
    ));
    assert!(kb.pravara_options("Bharadwaja").is_err());
    assert_eq!(kb.spiritual_lineages().unwrap(), ["Ramakrishna Mission"]);
    assert_eq!(kb.well_known_gothras(5), vec!["Kutsa", "Empty"]);
    assert_eq!(kb.region_of_sub_community("KOTA"), Some(Region::SouthIndia));
}

#[test]
fn test_load_tables_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"spiritual_lineages": ["Isha Foundation"]}}"#).unwrap();

    let kb = KnowledgeBase::load(file.path()).unwrap();
    assert_eq!(kb.spiritual_lineages().unwrap(), ["Isha Foundation"]);
    assert!(kb.sub_communities().is_empty());

    assert!(matches!(
        KnowledgeBase::load("/nonexistent/tables.json"),
        Err(KnowledgeError::Load(_))
    ));
}

#[test]
fn test_region_drives_community_catalog() {
    let kb = KnowledgeBase::builtin();
    let region = kb.classify_region("Chennai, Tamil Nadu");
    assert_eq!(region, Region::SouthIndia);

    let names: Vec<&str> = kb
        .sub_communities_in(region)
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert!(names.contains(&"Iyer"));
    assert!(names.contains(&"Iyengar"));

    assert_eq!(kb.classify_region("Somewhere"), Region::Unknown);
    assert!(kb.sub_communities_in(Region::Unknown).is_empty());
}

#[test]
fn test_sagothra_comparison() {
    let kb = KnowledgeBase::builtin();
    assert!(kb.same_gothra("Kashyapa", " KASHYAPA"));
    assert!(!kb.same_gothra("Kashyapa", "Bharadwaja"));
    assert!(!kb.same_gothra("", ""));
}
