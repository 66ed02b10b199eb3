//! Built-in Tables
//!
//! Static lineage and community data compiled into the binary. Replaced
//! wholesale when a tables file is configured.

use crate::models::{GothraEntry, KnowledgeTables, Region, SubCommunity};

/// (gothra, pravara options, description)
const GOTHRAS: &[(&str, &[&str], &str)] = &[
    (
        "Bharadwaja",
        &[
            "Angirasa - Barhaspatya - Bharadwaja (3 Rishis)",
            "Angirasa - Barhaspatya - Bharadwaja - Shaunga - Shaishira (5 Rishis)",
        ],
        "Descendants of sage Bharadwaja, of the Angirasa line.",
    ),
    (
        "Kashyapa",
        &[
            "Kashyapa - Avatsara - Naidhruva (3 Rishis)",
            "Kashyapa - Avatsara - Asita (3 Rishis)",
        ],
        "Descendants of sage Kashyapa, one of the Saptarishis.",
    ),
    (
        "Vasishta",
        &[
            "Vasishta (1 Rishi)",
            "Vasishta - Indrapramada - Abharadvasavya (3 Rishis)",
        ],
        "Descendants of sage Vasishta, preceptor of the Solar dynasty.",
    ),
    (
        "Vishwamitra",
        &["Vaishvamitra - Devarata - Audala (3 Rishis)"],
        "Descendants of sage Vishwamitra.",
    ),
    (
        "Gautama",
        &["Angirasa - Ayasya - Gautama (3 Rishis)"],
        "Descendants of sage Gautama Maharishi.",
    ),
    (
        "Atreya",
        &["Atreya - Archanasa - Shyavashva (3 Rishis)"],
        "Descendants of sage Atri.",
    ),
    (
        "Jamadagni",
        &["Bhargava - Chyavana - Apnavana - Aurva - Jamadagnya (5 Rishis)"],
        "Descendants of sage Jamadagni, of the Bhrigu line.",
    ),
    (
        "Srivatsa",
        &["Bhargava - Chyavana - Apnavana - Aurva - Jamadagnya (5 Rishis)"],
        "Bhrigu-line Gothra sharing the Jamadagni Pravara.",
    ),
    (
        "Kaundinya",
        &["Vasishta - Maitravaruna - Kaundinya (3 Rishis)"],
        "Vasishta-line Gothra of sage Kaundinya.",
    ),
    (
        "Harita",
        &["Angirasa - Ambarisha - Yauvanashva (3 Rishis)"],
        "Gothra of sage Harita, of the Angirasa line.",
    ),
    (
        "Kaushika",
        &["Vaishvamitra - Aghamarshana - Kaushika (3 Rishis)"],
        "Vishwamitra-line Gothra of sage Kaushika.",
    ),
    (
        "Shandilya",
        &[
            "Kashyapa - Avatsara - Shandilya (3 Rishis)",
            "Kashyapa - Daivala - Asita (3 Rishis)",
        ],
        "Kashyapa-line Gothra of sage Shandilya.",
    ),
    (
        "Parashara",
        &["Vasishta - Shaktya - Parasharya (3 Rishis)"],
        "Vasishta-line Gothra of sage Parashara.",
    ),
    (
        "Agastya",
        &["Agastya - Dardhachyuta - Idhmavaha (3 Rishis)"],
        "Descendants of sage Agastya.",
    ),
    (
        "Maudgalya",
        &["Angirasa - Bharmyashva - Maudgalya (3 Rishis)"],
        "Angirasa-line Gothra of sage Mudgala.",
    ),
    (
        "Kutsa",
        &["Angirasa - Mandhatra - Kautsa (3 Rishis)"],
        "Angirasa-line Gothra of sage Kutsa.",
    ),
    (
        "Garga",
        &["Angirasa - Barhaspatya - Bharadwaja - Shainya - Gargya (5 Rishis)"],
        "Bharadwaja-line Gothra of sage Garga.",
    ),
    (
        "Upamanyu",
        &["Vasishta - Indrapramada - Abharadvasavya (3 Rishis)"],
        "Vasishta-line Gothra of sage Upamanyu.",
    ),
    (
        "Naidhruva Kashyapa",
        &["Kashyapa - Avatsara - Naidhruva (3 Rishis)"],
        "Naidhruva branch of the Kashyapa Gothra.",
    ),
];

const SPIRITUAL_LINEAGES: &[&str] = &[
    "Art of Living",
    "ISKCON",
    "Isha Foundation",
    "Chinmaya Mission",
    "Ramakrishna Mission",
    "Sringeri Sharada Peetham",
    "Kanchi Kamakoti Peetham",
    "BAPS Swaminarayan Sanstha",
    "Sri Sathya Sai Seva Organization",
    "Ahobila Mutt",
    "Uttaradi Mutt",
    "Mata Amritanandamayi Math",
    "Self-Realization Fellowship",
    "Brahma Kumaris",
];

const SUB_COMMUNITIES: &[(&str, Region)] = &[
    ("Iyer", Region::SouthIndia),
    ("Iyengar", Region::SouthIndia),
    ("Madhwa", Region::SouthIndia),
    ("Smartha", Region::SouthIndia),
    ("Havyaka", Region::SouthIndia),
    ("Hoysala Karnataka", Region::SouthIndia),
    ("Niyogi", Region::SouthIndia),
    ("Vaidiki", Region::SouthIndia),
    ("Nambudiri", Region::SouthIndia),
    ("Deshastha", Region::WestIndia),
    ("Chitpavan", Region::WestIndia),
    ("Karhade", Region::WestIndia),
    ("Gowd Saraswat", Region::WestIndia),
    ("Nagar", Region::WestIndia),
    ("Audichya", Region::WestIndia),
    ("Anavil", Region::WestIndia),
    ("Kanyakubja", Region::NorthIndia),
    ("Saryupareen", Region::NorthIndia),
    ("Gaur", Region::NorthIndia),
    ("Saraswat", Region::NorthIndia),
    ("Mohyal", Region::NorthIndia),
    ("Kashmiri Pandit", Region::NorthIndia),
    ("Maithil", Region::NorthIndia),
    ("Utkala", Region::EastIndia),
    ("Kulin", Region::EastIndia),
    ("Barendra", Region::EastIndia),
    ("Rarhi", Region::EastIndia),
];

/// Materialize the compiled-in tables.
pub fn builtin_tables() -> KnowledgeTables {
    KnowledgeTables {
        gothras: GOTHRAS
            .iter()
            .map(|(gothra, options, description)| GothraEntry {
                gothra: gothra.to_string(),
                pravara_options: options.iter().map(|o| o.to_string()).collect(),
                description: description.to_string(),
            })
            .collect(),
        spiritual_lineages: SPIRITUAL_LINEAGES.iter().map(|s| s.to_string()).collect(),
        sub_communities: SUB_COMMUNITIES
            .iter()
            .map(|(name, region)| SubCommunity {
                name: name.to_string(),
                region: *region,
            })
            .collect(),
    }
}
