use std::path::PathBuf;

use thiserror::Error;

use loopgen_core::error::CoreError;
use loopgen_output::error::OutputError;
use loopgen_runner::error::ToolError;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("failed to read configuration file {}: {reason}", .path.display())]
    ConfigFile { path: PathBuf, reason: String },
}
