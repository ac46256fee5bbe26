use thiserror::Error;

/// The Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum encapsulating all the possible errors from this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Indicates that a statistic was requested on an empty vector.
    #[error("Cannot compute the {0} of an empty vector")]
    EmptyInput(&'static str),

    /// Indicates that a statistic requires more samples.
    #[error("Too few samples: {0} is below limit {1}")]
    TooFewSamples(usize, usize),

    /// Indicates that two sequences have incompatible lengths.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Indicates that a relative change has a zero baseline.
    #[error("Cannot compare the {0}: the baseline is zero but the splice protocol is not")]
    ZeroBaseline(&'static str),

    /// Indicates that the encryption provider failed.
    #[error("{0}")]
    Provider(#[from] ckks::Error),

    /// Indicates that the report could not be written.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
