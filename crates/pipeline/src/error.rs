use std::fmt;

#[derive(Debug)]
pub enum PipelineError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty path, output path collision).
    ConfigValidation(String),
    /// Prior canonical state failed to deserialize.
    StateParse(String),
    /// A source document is not valid JSON, or a required field is missing.
    SourceParse { source: String, msg: String },
    /// A source document parsed, but a required level or column is absent.
    SourceShape { source: String, detail: String },
    /// A reservation key failed the character-class check.
    InvalidReservationKey { key: String },
    /// Artifact rendering error (CSV writer, JSON serializer).
    Render(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::StateParse(msg) => write!(f, "state parse error: {msg}"),
            Self::SourceParse { source, msg } => {
                write!(f, "source '{source}': parse error: {msg}")
            }
            Self::SourceShape { source, detail } => write!(f, "source '{source}': {detail}"),
            Self::InvalidReservationKey { key } => {
                write!(f, "invalid reservation key '{key}' (expected ^[a-z0-9-]+$)")
            }
            Self::Render(msg) => write!(f, "render error: {msg}"),
        }
    }
}

impl std::error::Error for PipelineError {}
