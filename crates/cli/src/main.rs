// namereserve CLI - reserved-name reconciliation runner

mod exit_codes;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{pipeline_exit_code, EXIT_MISSING_INPUT, EXIT_SUCCESS, EXIT_WRITE};

#[derive(Parser)]
#[command(name = "namereserve")]
#[command(about = "Reconcile project feeds into the reserved-name registry artifacts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full reconciliation pipeline
    #[command(after_help = "\
Examples:
  namereserve run
  namereserve run --dir data/
  namereserve run --config paths.toml --json")]
    Run {
        /// TOML file overriding input/output paths
        #[arg(long)]
        config: Option<PathBuf>,

        /// Base directory all relative paths resolve against
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Print the run summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Validate a pipeline config without running
    #[command(after_help = "\
Examples:
  namereserve validate --config paths.toml")]
    Validate {
        /// TOML file overriding input/output paths
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        // Bare invocation behaves like the original script: fixed paths,
        // current directory.
        None => run::cmd_run(None, PathBuf::from("."), false),
        Some(Commands::Run { config, dir, json }) => run::cmd_run(config, dir, json),
        Some(Commands::Validate { config }) => run::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn input(msg: impl Into<String>) -> Self {
        Self { code: EXIT_MISSING_INPUT, message: msg.into(), hint: None }
    }

    pub fn write(msg: impl Into<String>) -> Self {
        Self { code: EXIT_WRITE, message: msg.into(), hint: None }
    }

    /// Create error from a pipeline error with its mapped exit code.
    pub fn pipeline(err: namereserve_pipeline::PipelineError) -> Self {
        Self { code: pipeline_exit_code(&err), message: err.to_string(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
