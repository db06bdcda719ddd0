#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("invalid hex digest: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("digest must be {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, VerifyError>;
