use thiserror::Error;

/// Error type for invalid inputs and failed calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RSCarbonError {
    /// An inbound record violates a declared physical range.
    #[error("Invalid value for {field}: {value} (expected {constraint})")]
    Validation {
        field: String,
        value: String,
        constraint: String,
    },
    /// An operation that needs at least one record received none.
    #[error("No {0} provided")]
    EmptyInput(String),
    /// A formula was evaluated outside the domain it is defined on.
    #[error("{quantity} must be positive, got {value}")]
    Domain { quantity: String, value: f64 },
    /// A step of an orchestrated calculation failed; no partial result is returned.
    #[error("Calculation failed during {step}: {message}")]
    Computation { step: String, message: String },
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl RSCarbonError {
    /// Build a validation error from anything displayable.
    pub fn validation(
        field: impl Into<String>,
        value: impl ToString,
        constraint: impl Into<String>,
    ) -> Self {
        Self::Validation {
            field: field.into(),
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }

    /// Wrap an error raised inside an orchestration step.
    pub fn during(step: impl ToString, source: RSCarbonError) -> Self {
        Self::Computation {
            step: step.to_string(),
            message: source.to_string(),
        }
    }
}

/// Convenience type for `Result<T, RSCarbonError>`.
pub type RSCarbonResult<T> = Result<T, RSCarbonError>;
