use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Invalid input: {}", details.join(", "))]
    Validation { details: Vec<String> },

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CalcError {
    /// True when the caller can fix the request and resubmit. Everything
    /// else is an internal failure and should be reported generically.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CalcError::Validation { .. })
    }

    /// Violation messages carried by a validation failure, empty otherwise.
    pub fn details(&self) -> &[String] {
        match self {
            CalcError::Validation { details } => details,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError(e.to_string())
    }
}
