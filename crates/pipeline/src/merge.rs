//! Union of prior state and freshly loaded feeds, plus the reserved-name
//! augmenter and the final normalize/sort pass.

use std::collections::HashSet;

use crate::model::{recommend_slug, Record};

/// Union the prior state with each source sequence in order. First seen
/// wins by id; a later record with a known id is dropped silently, field
/// disagreements included.
pub fn union_by_id(prior: Vec<Record>, sources: Vec<Vec<Record>>) -> Vec<Record> {
    let mut records = prior;
    let mut seen: HashSet<String> = records.iter().map(|r| r.id.clone()).collect();
    for source in sources {
        for record in source {
            if seen.insert(record.id.clone()) {
                records.push(record);
            }
        }
    }
    records
}

/// Split a newline-delimited identifier list, trimming and skipping blanks.
pub fn parse_reserved_names(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Append a placeholder record for each name not already present as some
/// record's reservation key. Runs after the source merge.
pub fn augment_reserved(records: &mut Vec<Record>, names: &[String]) {
    let mut keys: HashSet<String> = records
        .iter()
        .filter(|r| !r.reservation_key.is_empty())
        .map(|r| r.reservation_key.clone())
        .collect();
    for name in names {
        if keys.insert(name.clone()) {
            records.push(Record::reservation(name));
        }
    }
}

/// Recompute every derived slug, then impose the single deterministic
/// ordering used by all artifacts: (id, reservation_key) ascending.
pub fn finalize(records: &mut [Record]) {
    for record in records.iter_mut() {
        record.recommend_url = recommend_slug(&record.id);
    }
    records.sort_by(|a, b| {
        (&a.id, &a.reservation_key).cmp(&(&b.id, &b.reservation_key))
    });
}
