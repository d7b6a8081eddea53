use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("logger setup failed: {0}")]
    Logger(String),
}

pub type OutputResult<T> = Result<T, OutputError>;
