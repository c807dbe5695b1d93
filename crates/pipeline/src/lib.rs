//! `namereserve-pipeline` — reserved-name reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded source documents, returns the
//! merged record set and derived reserved-list entries. No CLI or IO
//! dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod merge;
pub mod model;
pub mod render;
pub mod reserved;
pub mod sources;

pub use config::PipelineConfig;
pub use engine::run;
pub use error::PipelineError;
pub use model::{PipelineInput, PipelineRun, Record, RecordKind, ReservedEntry};
