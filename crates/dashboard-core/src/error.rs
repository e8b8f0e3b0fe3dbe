use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
