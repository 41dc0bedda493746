//! Error types for isoline generation.

use thiserror::Error;

/// Errors that can occur while building or configuring isolines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IsolineError {
    /// A build was requested before a scalar field was attached.
    #[error("no data source set")]
    NoDataSource,

    /// The traced value lies outside the value range of a cell.
    #[error("isoline value {value} is out of cell ({x}, {y})")]
    ValueOutOfCell { value: f64, x: usize, y: usize },

    /// A saddle cell could not be resolved within the subdivision limits.
    #[error("data is too coarse to resolve isoline {value} in cell ({x}, {y})")]
    DataUndetailed { value: f64, x: usize, y: usize },

    /// The scalar field buffers are inconsistent.
    #[error("invalid scalar field: {0}")]
    InvalidField(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl IsolineError {
    /// Create an InvalidField error.
    pub fn invalid_field(msg: impl Into<String>) -> Self {
        Self::InvalidField(msg.into())
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether the error comes from the field data rather than from setup.
    ///
    /// Callers may retry these with a lower density or a finer grid.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::ValueOutOfCell { .. } | Self::DataUndetailed { .. }
        )
    }
}

/// Result type for isoline operations.
pub type Result<T> = std::result::Result<T, IsolineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(IsolineError::NoDataSource.to_string(), "no data source set");
        let err = IsolineError::DataUndetailed { value: 5.0, x: 3, y: 4 };
        assert!(err.to_string().contains("(3, 4)"));
    }

    #[test]
    fn test_is_data_error() {
        assert!(IsolineError::ValueOutOfCell { value: 1.0, x: 0, y: 0 }.is_data_error());
        assert!(!IsolineError::NoDataSource.is_data_error());
        assert!(!IsolineError::invalid_config("density").is_data_error());
    }
}
