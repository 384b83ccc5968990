use thiserror::Error;

/// Error type for invalid estimation inputs.
///
/// Every variant traces back to a validated precondition so callers can show
/// the offending field and condition to the operator verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FootprintError {
    #[error("{field} must be {requirement} (got {value})")]
    OutOfRange {
        field: String,
        requirement: String,
        value: f64,
    },
    #[error("{context} requires {}", .fields.join(" or "))]
    MissingField {
        context: String,
        fields: Vec<String>,
    },
    #[error("{context} does not accept {}", .fields.join(", "))]
    ConflictingFields {
        context: String,
        fields: Vec<String>,
    },
    #[error("Unknown {kind} '{key}'. {hint}")]
    UnknownCategory {
        kind: String,
        key: String,
        hint: String,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl FootprintError {
    pub fn out_of_range(field: &str, requirement: &str, value: f64) -> Self {
        Self::OutOfRange {
            field: field.to_string(),
            requirement: requirement.to_string(),
            value,
        }
    }

    pub fn missing(context: &str, fields: &[&str]) -> Self {
        Self::MissingField {
            context: context.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn conflicting(context: &str, fields: &[&str]) -> Self {
        Self::ConflictingFields {
            context: context.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Name of the field the failure refers to, if there is exactly one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::OutOfRange { field, .. } => Some(field.as_str()),
            Self::MissingField { fields, .. } if fields.len() == 1 => Some(fields[0].as_str()),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for FootprintError {
    fn from(e: toml::de::Error) -> Self {
        Self::InvalidConfiguration(e.to_string())
    }
}

/// Convenience type for `Result<T, FootprintError>`.
pub type FootprintResult<T> = Result<T, FootprintError>;
