use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidSourceAddress { input: String },
    InvalidDestination { input: String },
    TooManyDestinations { max: usize, actual: usize },
    InvalidOptionalField { field: &'static str, reason: &'static str },
    InvalidClientType { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidSourceAddress { input } => {
                write!(f, "source address not valid: {input}")
            }
            Self::InvalidDestination { input } => {
                write!(f, "one or more destinations invalid: {input}")
            }
            Self::TooManyDestinations { max, actual } => {
                write!(f, "too many destinations: {actual} (max {max})")
            }
            Self::InvalidOptionalField { field, reason } => {
                write!(f, "invalid optional field {field}: {reason}")
            }
            Self::InvalidClientType { input } => {
                write!(f, "client type must be H, S, D or M, got {input:?}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
