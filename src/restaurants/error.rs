use thiserror::Error;

/// Error type for the restaurant lookup
#[derive(Error, Debug)]
pub enum RestaurantError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for RestaurantError {
    fn from(err: reqwest::Error) -> Self {
        RestaurantError::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RestaurantError>;
