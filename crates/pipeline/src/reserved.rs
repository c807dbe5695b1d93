//! Derivation of the reserved list: the deduplicated mapping from
//! reservation key to representative record id.

use std::collections::BTreeMap;

use regex::Regex;

use crate::error::PipelineError;
use crate::model::{Record, ReservedEntry};

/// Character class every emitted reservation key must satisfy.
pub const KEY_PATTERN: &str = "^[a-z0-9-]+$";

/// Curation markers that never reach the output, regardless of content.
const SENTINEL_KEYS: [&str; 2] = ["tbd", "skip"];

/// Derive the reserved list from the already-sorted record set.
///
/// Iteration order is the record order, so the first writer wins for every
/// key — including the hyphen-stripped variant, which is added when
/// stripping changes the key and never overwrites an existing entry.
/// Validation runs last; the first offending key aborts the stage before
/// any artifact is rendered.
pub fn derive_reserved(records: &[Record]) -> Result<Vec<ReservedEntry>, PipelineError> {
    let mut mapping: BTreeMap<String, String> = BTreeMap::new();

    for record in records {
        let key = record.reservation_key.as_str();
        if key.is_empty() {
            continue;
        }
        if !mapping.contains_key(key) {
            mapping.insert(key.to_string(), record.id.clone());
        }
        let stripped: String = key.chars().filter(|c| *c != '-').collect();
        if stripped != key && !mapping.contains_key(&stripped) {
            mapping.insert(stripped, record.id.clone());
        }
    }

    for sentinel in SENTINEL_KEYS {
        mapping.remove(sentinel);
    }

    let key_check = Regex::new(KEY_PATTERN).unwrap();
    for key in mapping.keys() {
        if !key_check.is_match(key) {
            return Err(PipelineError::InvalidReservationKey { key: key.clone() });
        }
    }

    Ok(mapping
        .into_iter()
        .map(|(key, id)| ReservedEntry { key, id })
        .collect())
}
