/// Core error type.
///
/// Callers map [`Error::InvalidAddress`] to a user-facing "unrecognized
/// format" reply; [`Error::Config`] is a setup failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid address: {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    pub fn invalid_address(address: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            address: address.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
