use thiserror::Error;

/// Convenient result alias for the planner.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level planner error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Input data was malformed or did not match the facility size.
    #[error("invalid input: {message}")]
    Config { message: String },

    /// A location index fell outside `[0, size)`.
    #[error("location index {index} out of range for {size} locations")]
    IndexOutOfRange { index: usize, size: usize },

    /// The next-hop chain did not arrive at the destination.
    #[error("next-hop chain from {start} never reached {goal}")]
    RouteReconstruction { start: usize, goal: usize },

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON rendering errors.
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
