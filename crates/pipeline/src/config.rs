use serde::Deserialize;

use crate::error::PipelineError;

/// Mapping of every logical input/output name to a path. Defaults are the
/// fixed relative paths the tool has always used; a TOML file can override
/// any subset. All paths resolve against the caller's base directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory scanned for the dated feed exports
    /// (`grant_*.json`, `icp123_*.json`, `icapp_*.json`, `showcase_*.json`).
    pub projects_dir: String,
    /// Prior canonical state; backed up to `<state_file>.bak` before each run.
    pub state_file: String,
    /// Optional newline-delimited list of extra reserved identifiers.
    pub reserved_names_file: String,
    pub records_csv: String,
    /// New canonical state. Defaults to the state file, overwriting the
    /// input once the merge is complete.
    pub records_json: String,
    pub reserved_list_csv: String,
    /// Generated constant-array source file; pointed into the registry
    /// source tree in real deployments.
    pub reserved_list_source: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            projects_dir: "projects".into(),
            state_file: "reserved.json".into(),
            reserved_names_file: "reserved.txt".into(),
            records_csv: "reserved.csv".into(),
            records_json: "reserved.json".into(),
            reserved_list_csv: "reserved_list.csv".into(),
            reserved_list_source: "reserved_list.rs".into(),
        }
    }
}

impl PipelineConfig {
    pub fn from_toml(input: &str) -> Result<Self, PipelineError> {
        let config: PipelineConfig =
            toml::from_str(input).map_err(|e| PipelineError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        let paths = [
            ("projects_dir", &self.projects_dir),
            ("state_file", &self.state_file),
            ("reserved_names_file", &self.reserved_names_file),
            ("records_csv", &self.records_csv),
            ("records_json", &self.records_json),
            ("reserved_list_csv", &self.reserved_list_csv),
            ("reserved_list_source", &self.reserved_list_source),
        ];
        for (name, path) in paths {
            if path.is_empty() {
                return Err(PipelineError::ConfigValidation(format!("{name} must not be empty")));
            }
        }
        if self.records_csv == self.records_json {
            return Err(PipelineError::ConfigValidation(
                "records_csv and records_json must be distinct paths".into(),
            ));
        }
        if self.reserved_list_csv == self.reserved_list_source {
            return Err(PipelineError::ConfigValidation(
                "reserved_list_csv and reserved_list_source must be distinct paths".into(),
            ));
        }
        Ok(())
    }

    /// Sibling backup path for the state file, overwritten on every run.
    pub fn backup_file(&self) -> String {
        format!("{}.bak", self.state_file)
    }
}
