//! `namereserve run` / `namereserve validate` — file discovery, backup,
//! pipeline invocation, artifact writes, exit-code mapping.

use std::fs;
use std::path::{Path, PathBuf};

use namereserve_pipeline::model::{PipelineInput, RunMeta, RunReport};
use namereserve_pipeline::{engine, render, reserved, PipelineConfig};

use crate::exit_codes::EXIT_ERROR;
use crate::CliError;

pub fn cmd_run(config_path: Option<PathBuf>, dir: PathBuf, json: bool) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;
    let base = dir;

    // Back up, then read the prior canonical state.
    let state_path = base.join(&config.state_file);
    let prior_state = if state_path.exists() {
        let backup_path = base.join(config.backup_file());
        fs::copy(&state_path, &backup_path).map_err(|e| {
            CliError::write(format!("cannot back up {}: {e}", state_path.display()))
        })?;
        eprintln!("backed up {} to {}", state_path.display(), backup_path.display());
        Some(read_input(&state_path)?)
    } else {
        eprintln!("{} not found, starting from an empty set", state_path.display());
        None
    };

    let projects_dir = base.join(&config.projects_dir);
    let grant = read_feed(&projects_dir, "grant")?;
    let icp123 = read_feed(&projects_dir, "icp123")?;
    let icapp = read_feed(&projects_dir, "icapp")?;
    let showcase = read_feed(&projects_dir, "showcase")?;

    let reserved_path = base.join(&config.reserved_names_file);
    let reserved_names = if reserved_path.exists() {
        Some(read_input(&reserved_path)?)
    } else {
        eprintln!("{} not found, no extra reserved names", reserved_path.display());
        None
    };

    let input = PipelineInput { prior_state, grant, icp123, icapp, showcase, reserved_names };
    let (records, mut summary) = engine::assemble(&input).map_err(CliError::pipeline)?;

    eprintln!(
        "merged {} records ({} prior, {} from feeds, {} reserved placeholders)",
        summary.total, summary.prior, summary.added_from_sources, summary.added_reserved,
    );

    // Canonical artifacts land first; reserved-list derivation can still
    // abort the run and must leave the previous reserved-list files alone.
    let records_csv = render::records_csv(&records).map_err(CliError::pipeline)?;
    write_artifact(&base.join(&config.records_csv), &records_csv)?;
    let records_json = render::records_json(&records).map_err(CliError::pipeline)?;
    write_artifact(&base.join(&config.records_json), &records_json)?;

    let entries = reserved::derive_reserved(&records).map_err(CliError::pipeline)?;
    summary.reserved_entries = entries.len();

    let list_csv = render::reserved_list_csv(&entries).map_err(CliError::pipeline)?;
    write_artifact(&base.join(&config.reserved_list_csv), &list_csv)?;
    write_artifact(&base.join(&config.reserved_list_source), &render::reserved_list_source(&entries))?;

    eprintln!("reserved list: {} entries", entries.len());

    if json {
        let report = RunReport { meta: RunMeta::now(), summary };
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::write(format!("JSON serialization error: {e}")))?;
        println!("{out}");
    }

    Ok(())
}

pub fn cmd_validate(config_path: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;
    eprintln!(
        "valid: feeds from {}/, state {}, reserved list {} + {}",
        config.projects_dir, config.state_file, config.reserved_list_csv, config.reserved_list_source,
    );
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<PipelineConfig, CliError> {
    match path {
        None => Ok(PipelineConfig::default()),
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| CliError::input(format!("cannot read config {}: {e}", path.display())))?;
            PipelineConfig::from_toml(&text).map_err(CliError::pipeline)
        }
    }
}

/// Discover one feed's dated exports: `<projects_dir>/<prefix>_*.json`,
/// lexicographic order. A feed with no files is a hard error.
fn read_feed(projects_dir: &Path, prefix: &str) -> Result<Vec<String>, CliError> {
    let pattern = projects_dir.join(format!("{prefix}_*.json"));
    let pattern = pattern.to_string_lossy().into_owned();

    let mut paths: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(|e| CliError {
            code: EXIT_ERROR,
            message: format!("bad feed pattern {pattern}: {e}"),
            hint: None,
        })?
        .filter_map(Result::ok)
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(CliError::input(format!("no {prefix} feed matches {pattern}"))
            .with_hint(format!("export the {prefix} feed as {prefix}_<date>.json")));
    }

    let mut docs = Vec::with_capacity(paths.len());
    for path in paths {
        docs.push(read_input(&path)?);
        eprintln!("read {}", path.display());
    }
    Ok(docs)
}

fn read_input(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|e| CliError::input(format!("cannot read {}: {e}", path.display())))
}

fn write_artifact(path: &Path, text: &str) -> Result<(), CliError> {
    fs::write(path, text).map_err(|e| CliError::write(format!("cannot write {}: {e}", path.display())))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
