use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeskError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
