//! CLI exit code registry.
//!
//! Single source of truth for all exit codes. They are part of the shell
//! contract — release scripts branch on them.
//!
//! | Code | Meaning                                             |
//! |------|-----------------------------------------------------|
//! | 0    | Success                                             |
//! | 1    | General error (unspecified)                         |
//! | 2    | Usage or config error (bad args, invalid TOML)      |
//! | 3    | Missing or unreadable required input                |
//! | 4    | Source or state parse/shape error                   |
//! | 5    | Reservation-key validation failure                  |
//! | 6    | Output write error                                  |

use namereserve_pipeline::PipelineError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, invalid or unparsable config.
pub const EXIT_USAGE: u8 = 2;

/// A required input is missing or unreadable (feed glob with no matches,
/// unreadable file).
pub const EXIT_MISSING_INPUT: u8 = 3;

/// A required source or the present state file failed to parse.
pub const EXIT_PARSE: u8 = 4;

/// A reservation key failed the character-class check; the reserved-list
/// artifacts were not written.
pub const EXIT_KEY_VALIDATION: u8 = 5;

/// An output artifact could not be rendered or written.
pub const EXIT_WRITE: u8 = 6;

/// Map a pipeline error to its exit code.
pub fn pipeline_exit_code(err: &PipelineError) -> u8 {
    match err {
        PipelineError::ConfigParse(_) | PipelineError::ConfigValidation(_) => EXIT_USAGE,
        PipelineError::StateParse(_)
        | PipelineError::SourceParse { .. }
        | PipelineError::SourceShape { .. } => EXIT_PARSE,
        PipelineError::InvalidReservationKey { .. } => EXIT_KEY_VALIDATION,
        PipelineError::Render(_) => EXIT_WRITE,
    }
}
