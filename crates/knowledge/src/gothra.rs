//! Gothra Lookup
//!
//! Exact match on the normalized key first, then a substring fallback.
//! No edit-distance scoring: "Bharadwaj" resolves because it is a substring
//! of "bharadwaja", "Bhardwaj" does not.

use tracing::debug;

use crate::error::{KnowledgeError, KnowledgeResult};
use crate::models::{GothraEntry, GothraMatch, MatchKind};

/// Queries shorter than this never take the substring path.
pub const MIN_FUZZY_QUERY_LEN: usize = 3;

/// Lookup key: trimmed and lowercased.
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Sagothra check: both non-empty and equal after normalization.
pub fn same_gothra(a: &str, b: &str) -> bool {
    let a = normalize_key(a);
    let b = normalize_key(b);
    !a.is_empty() && a == b
}

/// Resolve a query against a table.
///
/// Fuzzy resolution prefers the longest key contained in the query, then the
/// shortest key containing the query. Ties go to table order. An entry without
/// Pravara options is reported as malformed rather than returned.
pub fn lookup<'a>(table: &'a [GothraEntry], query: &str) -> KnowledgeResult<GothraMatch<'a>> {
    let key = normalize_key(query);
    if key.is_empty() {
        return Err(KnowledgeError::UnknownGothra(query.to_string()));
    }

    let found = table
        .iter()
        .find(|e| normalize_key(&e.gothra) == key)
        .map(|entry| GothraMatch {
            entry,
            kind: MatchKind::Exact,
        })
        .or_else(|| fuzzy(table, &key));

    let found = found.ok_or_else(|| KnowledgeError::UnknownGothra(query.to_string()))?;

    if found.entry.pravara_options.is_empty() {
        return Err(KnowledgeError::MalformedEntry(format!(
            "gothra '{}' has no pravara options",
            found.entry.gothra
        )));
    }

    if found.kind == MatchKind::Fuzzy {
        debug!(query = %query, resolved = %found.entry.gothra, "Gothra resolved by substring match");
    }
    Ok(found)
}

fn fuzzy<'a>(table: &'a [GothraEntry], key: &str) -> Option<GothraMatch<'a>> {
    if key.chars().count() < MIN_FUZZY_QUERY_LEN {
        return None;
    }

    let contained_in_query = table
        .iter()
        .map(|e| (e, normalize_key(&e.gothra)))
        .filter(|(_, k)| !k.is_empty() && key.contains(k.as_str()))
        .min_by_key(|(_, k)| std::cmp::Reverse(k.len()));

    let best = contained_in_query.or_else(|| {
        table
            .iter()
            .map(|e| (e, normalize_key(&e.gothra)))
            .filter(|(_, k)| k.contains(key))
            .min_by_key(|(_, k)| k.len())
    });

    best.map(|(entry, _)| GothraMatch {
        entry,
        kind: MatchKind::Fuzzy,
    })
}
