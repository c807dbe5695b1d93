//! Pipeline orchestration: parse every input, merge, augment, finalize,
//! derive. The two entry points exist so a caller can write the canonical
//! artifacts before reserved-list derivation gets a chance to fail.

use crate::error::PipelineError;
use crate::merge;
use crate::model::{PipelineInput, PipelineRun, Record, RunMeta, RunReport, RunSummary};
use crate::reserved;
use crate::sources;

/// Assemble the merged, ordered record set from pre-loaded inputs.
pub fn assemble(input: &PipelineInput) -> Result<(Vec<Record>, RunSummary), PipelineError> {
    let prior = match input.prior_state.as_deref() {
        Some(text) => sources::parse_state(text)?,
        None => Vec::new(),
    };

    let grant = parse_feed(&input.grant, sources::parse_grant)?;
    let icp123 = parse_feed(&input.icp123, sources::parse_icp123)?;
    let icapp = parse_feed(&input.icapp, sources::parse_icapp)?;
    let showcase = parse_feed(&input.showcase, sources::parse_showcase)?;

    let mut summary = RunSummary {
        prior: prior.len(),
        grant: grant.len(),
        icp123: icp123.len(),
        icapp: icapp.len(),
        showcase: showcase.len(),
        added_from_sources: 0,
        added_reserved: 0,
        total: 0,
        reserved_entries: 0,
    };

    let mut records = merge::union_by_id(prior, vec![grant, icp123, icapp, showcase]);
    summary.added_from_sources = records.len() - summary.prior;

    if let Some(text) = input.reserved_names.as_deref() {
        let names = merge::parse_reserved_names(text);
        let before = records.len();
        merge::augment_reserved(&mut records, &names);
        summary.added_reserved = records.len() - before;
    }

    merge::finalize(&mut records);
    summary.total = records.len();

    Ok((records, summary))
}

/// Full run: assemble, then derive the reserved list.
pub fn run(input: &PipelineInput) -> Result<PipelineRun, PipelineError> {
    let (records, mut summary) = assemble(input)?;
    let reserved = reserved::derive_reserved(&records)?;
    summary.reserved_entries = reserved.len();
    Ok(PipelineRun {
        report: RunReport { meta: RunMeta::now(), summary },
        records,
        reserved,
    })
}

fn parse_feed(
    docs: &[String],
    parse: fn(&str) -> Result<Vec<Record>, PipelineError>,
) -> Result<Vec<Record>, PipelineError> {
    let mut records = Vec::new();
    for doc in docs {
        records.extend(parse(doc)?);
    }
    Ok(records)
}
