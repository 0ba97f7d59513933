pub mod download_orchestrator;
pub mod download_summary;
pub mod orchestrator_error;
pub mod orchestrator_state;
pub mod run_context;

pub use download_orchestrator::DownloadOrchestrator;
pub use download_summary::{DownloadSummary, FailedFile};
pub use orchestrator_error::OrchestratorError;
pub use orchestrator_state::OrchestratorState;
pub use run_context::RunContext;
