//! Artifact renderers. Every renderer takes the already-ordered data and
//! returns the artifact text; callers decide where it lands.

use crate::error::PipelineError;
use crate::model::{Record, ReservedEntry};

/// Column order of the canonical records CSV.
pub const RECORDS_HEADER: [&str; 8] =
    ["id", "title", "summary", "grant", "icnaming", "recommend_url", "type", "url"];

/// Header of the reserved-list CSV.
pub const RESERVED_LIST_HEADER: [&str; 2] = ["icnaming", "id"];

pub fn records_csv(records: &[Record]) -> Result<String, PipelineError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(RECORDS_HEADER).map_err(render_err)?;
    for r in records {
        writer
            .write_record([
                r.id.as_str(),
                r.title.as_str(),
                r.summary.as_str(),
                r.grant.as_str(),
                r.reservation_key.as_str(),
                r.recommend_url.as_str(),
                r.kind.as_str(),
                r.url.as_str(),
            ])
            .map_err(render_err)?;
    }
    into_text(writer)
}

/// Pretty-printed array of record objects; the next run's canonical state.
pub fn records_json(records: &[Record]) -> Result<String, PipelineError> {
    serde_json::to_string_pretty(records).map_err(render_err)
}

pub fn reserved_list_csv(entries: &[ReservedEntry]) -> Result<String, PipelineError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(RESERVED_LIST_HEADER).map_err(render_err)?;
    for entry in entries {
        writer.write_record([entry.key.as_str(), entry.id.as_str()]).map_err(render_err)?;
    }
    into_text(writer)
}

/// The generated constant-array source file compiled into the downstream
/// registry. Keys only, sorted order; format changes break that build.
pub fn reserved_list_source(entries: &[ReservedEntry]) -> String {
    let mut out = String::from("pub const RESERVED_NAMES: &[&str] = &[\n");
    for entry in entries {
        out.push_str("    \"");
        out.push_str(&entry.key);
        out.push_str("\",\n");
    }
    out.push_str("];\n");
    out
}

fn render_err(e: impl std::fmt::Display) -> PipelineError {
    PipelineError::Render(e.to_string())
}

fn into_text(writer: csv::Writer<Vec<u8>>) -> Result<String, PipelineError> {
    let bytes = writer.into_inner().map_err(render_err)?;
    String::from_utf8(bytes).map_err(render_err)
}
