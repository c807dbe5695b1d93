use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One named project or reservation candidate. Field order here is the wire
/// order of every artifact (CSV column order, JSON object key order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub grant: String,
    /// The identifier-namespace slug this record reserves. Blank unless the
    /// record is explicitly a reservation.
    #[serde(rename = "icnaming", default)]
    pub reservation_key: String,
    /// Derived slug; recomputed after every merge, never trusted from input.
    #[serde(default)]
    pub recommend_url: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    #[serde(default)]
    pub url: String,
}

impl Record {
    /// Build a record from one source-feed entry. The id is normalized and
    /// the reservation key left blank.
    pub fn from_source(kind: RecordKind, raw_id: &str, title: &str, summary: &str, grant: &str, url: &str) -> Self {
        let id = normalize_id(raw_id);
        let recommend_url = recommend_slug(&id);
        Self {
            id,
            title: title.to_string(),
            summary: summary.to_string(),
            grant: grant.to_string(),
            reservation_key: String::new(),
            recommend_url,
            kind,
            url: url.to_string(),
        }
    }

    /// Placeholder for a reserved name with no backing project. The key is
    /// kept verbatim; the id is its normalized form.
    pub fn reservation(name: &str) -> Self {
        let id = normalize_id(name);
        let recommend_url = recommend_slug(&id);
        Self {
            id,
            title: String::new(),
            summary: String::new(),
            grant: String::new(),
            reservation_key: name.to_string(),
            recommend_url,
            kind: RecordKind::Reserved,
            url: String::new(),
        }
    }
}

/// Normalized form of a record id: trimmed, lowercased.
pub fn normalize_id(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Derived slug: lowercase id with spaces replaced by hyphens.
pub fn recommend_slug(id: &str) -> String {
    id.to_lowercase().replace(' ', "-")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Grant,
    Icp123,
    Icapp,
    Showcase,
    Reserved,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grant => "grant",
            Self::Icp123 => "icp123",
            Self::Icapp => "icapp",
            Self::Showcase => "showcase",
            Self::Reserved => "reserved",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Pre-loaded document texts for one run. Each feed is a sequence of dated
/// export files, already read and ordered by the caller.
#[derive(Debug, Default)]
pub struct PipelineInput {
    /// Prior canonical state (`reserved.json`), if it exists.
    pub prior_state: Option<String>,
    pub grant: Vec<String>,
    pub icp123: Vec<String>,
    pub icapp: Vec<String>,
    pub showcase: Vec<String>,
    /// Extra reserved identifiers (`reserved.txt`), if the file exists.
    pub reserved_names: Option<String>,
}

// ---------------------------------------------------------------------------
// Reserved list
// ---------------------------------------------------------------------------

/// One entry of the derived reserved list: reservation key mapped to the
/// representative record id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservedEntry {
    pub key: String,
    pub id: String,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Records carried over from the prior canonical state.
    pub prior: usize,
    /// Records loaded per feed, before de-duplication.
    pub grant: usize,
    pub icp123: usize,
    pub icapp: usize,
    pub showcase: usize,
    /// Records the four feeds contributed beyond the prior state.
    pub added_from_sources: usize,
    /// Placeholder records appended for unseen reserved names.
    pub added_reserved: usize,
    /// Size of the merged set.
    pub total: usize,
    /// Entries in the derived reserved list (key variants included).
    pub reserved_entries: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub pipeline_version: String,
    pub run_at: String,
}

impl RunMeta {
    pub fn now() -> Self {
        Self {
            pipeline_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Machine-readable account of one run. Never written into the canonical
/// state artifacts, so repeated runs stay byte-identical.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub meta: RunMeta,
    pub summary: RunSummary,
}

#[derive(Debug)]
pub struct PipelineRun {
    pub report: RunReport,
    pub records: Vec<Record>,
    pub reserved: Vec<ReservedEntry>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
