use thiserror::Error;

#[derive(Error, Debug)]
pub enum MdError {
    // Construction errors
    #[error("Invalid {name}: {value} (must be finite and positive)")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("Record interval must be at least 1 step")]
    InvalidRecordInterval,

    // Initial conditions
    #[error("Could not place particles at least {min_separation:.3} apart after {attempts} attempts")]
    PlacementFailed { attempts: usize, min_separation: f64 },

    // Configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to read configuration file '{path}': {source}")]
    ConfigFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yml::Error),
}

pub type Result<T> = std::result::Result<T, MdError>;

/// Reject zero, negative and non-finite physical parameters.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(MdError::InvalidParameter { name, value })
    }
}
