//! Loaders for the four external feeds and the prior canonical state.
//!
//! Each loader is a pure function of one document's text. A source either
//! loads completely or the run aborts; there is no partial-success mode.

use serde::Deserialize;
use serde_json::Value;

use crate::error::PipelineError;
use crate::model::{Record, RecordKind};

// ---------------------------------------------------------------------------
// Prior state
// ---------------------------------------------------------------------------

/// Parse the prior canonical state: an array of record objects with the
/// eight wire fields.
pub fn parse_state(input: &str) -> Result<Vec<Record>, PipelineError> {
    serde_json::from_str(input).map_err(|e| PipelineError::StateParse(e.to_string()))
}

// ---------------------------------------------------------------------------
// grant — flat array of {grantee, summary, grant}
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct GrantEntry {
    grantee: String,
    summary: String,
    grant: Value,
}

pub fn parse_grant(input: &str) -> Result<Vec<Record>, PipelineError> {
    let entries: Vec<GrantEntry> = serde_json::from_str(input).map_err(|e| parse_err("grant", e))?;
    Ok(entries
        .iter()
        .map(|e| {
            Record::from_source(RecordKind::Grant, &e.grantee, &e.grantee, &e.summary, &value_text(&e.grant), "")
        })
        .collect())
}

// ---------------------------------------------------------------------------
// icp123 — pageProps.projectData array of {id, title, summary, url}
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct Icp123Entry {
    id: String,
    title: String,
    summary: String,
    url: String,
}

pub fn parse_icp123(input: &str) -> Result<Vec<Record>, PipelineError> {
    let mut root: Value = serde_json::from_str(input).map_err(|e| parse_err("icp123", e))?;
    let data = take_at(&mut root, "/pageProps/projectData", "icp123")?;
    let entries: Vec<Icp123Entry> = serde_json::from_value(data).map_err(|e| parse_err("icp123", e))?;
    Ok(entries
        .iter()
        .map(|e| Record::from_source(RecordKind::Icp123, &e.id, &e.title, &e.summary, "", &e.url))
        .collect())
}

// ---------------------------------------------------------------------------
// icapp — valueRanges[0].values row-arrays, header row skipped
// ---------------------------------------------------------------------------

const ICAPP_COL_ID: usize = 0;
const ICAPP_COL_TITLE: usize = 1;
const ICAPP_COL_URL: usize = 5;
const ICAPP_COL_SUMMARY: usize = 19;

pub fn parse_icapp(input: &str) -> Result<Vec<Record>, PipelineError> {
    let mut root: Value = serde_json::from_str(input).map_err(|e| parse_err("icapp", e))?;
    let values = take_at(&mut root, "/valueRanges/0/values", "icapp")?;
    let rows = match values {
        Value::Array(rows) => rows,
        _ => {
            return Err(PipelineError::SourceShape {
                source: "icapp".into(),
                detail: "values is not an array".into(),
            })
        }
    };

    let mut records = Vec::new();
    for (index, row) in rows.iter().enumerate().skip(1) {
        let row = row.as_array().ok_or_else(|| PipelineError::SourceShape {
            source: "icapp".into(),
            detail: format!("row {index} is not an array"),
        })?;
        let id = cell(row, ICAPP_COL_ID, index)?;
        let title = cell(row, ICAPP_COL_TITLE, index)?;
        let url = cell(row, ICAPP_COL_URL, index)?;
        let summary = cell(row, ICAPP_COL_SUMMARY, index)?;
        records.push(Record::from_source(RecordKind::Icapp, id, title, summary, "", url));
    }
    Ok(records)
}

fn cell(row: &[Value], column: usize, row_index: usize) -> Result<&str, PipelineError> {
    row.get(column).and_then(Value::as_str).ok_or_else(|| PipelineError::SourceShape {
        source: "icapp".into(),
        detail: format!("row {row_index}: missing or non-text column {column}"),
    })
}

// ---------------------------------------------------------------------------
// showcase — result.data.page.projects array of
// {name, description.childMarkdownRemark.html, website}
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ShowcaseEntry {
    name: String,
    description: ShowcaseDescription,
    website: String,
}

#[derive(Deserialize)]
struct ShowcaseDescription {
    #[serde(rename = "childMarkdownRemark")]
    child_markdown_remark: ChildMarkdownRemark,
}

#[derive(Deserialize)]
struct ChildMarkdownRemark {
    html: String,
}

pub fn parse_showcase(input: &str) -> Result<Vec<Record>, PipelineError> {
    let mut root: Value = serde_json::from_str(input).map_err(|e| parse_err("showcase", e))?;
    let data = take_at(&mut root, "/result/data/page/projects", "showcase")?;
    let entries: Vec<ShowcaseEntry> =
        serde_json::from_value(data).map_err(|e| parse_err("showcase", e))?;
    Ok(entries
        .iter()
        .map(|e| {
            Record::from_source(
                RecordKind::Showcase,
                &e.name,
                &e.name,
                &e.description.child_markdown_remark.html,
                "",
                &e.website,
            )
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_err(source: &str, e: impl std::fmt::Display) -> PipelineError {
    PipelineError::SourceParse { source: source.into(), msg: e.to_string() }
}

/// Take the value at a JSON pointer path, or fail with a shape error.
fn take_at(root: &mut Value, pointer: &str, source: &str) -> Result<Value, PipelineError> {
    root.pointer_mut(pointer).map(Value::take).ok_or_else(|| PipelineError::SourceShape {
        source: source.into(),
        detail: format!("missing path {pointer}"),
    })
}

/// Text form of a JSON value: strings verbatim, everything else as its
/// literal rendering (grant amounts arrive as both).
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
