use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("response body is not JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("cannot open event stream: {0}")]
    Stream(String),
}

pub type Result<T, E = ApiError> = std::result::Result<T, E>;
