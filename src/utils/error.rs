use thiserror::Error;

#[derive(Error, Debug)]
pub enum AllocError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Input is missing column '{column}' (found: {available})")]
    MissingColumnError { column: String, available: String },

    #[error("Invalid input at line {line}: {message}")]
    InvalidInputError { line: u64, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Config,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AllocError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AllocError::CsvError(_)
            | AllocError::MissingColumnError { .. }
            | AllocError::InvalidInputError { .. } => ErrorCategory::Input,
            AllocError::ConfigError { .. }
            | AllocError::ConfigValidationError { .. }
            | AllocError::InvalidConfigValueError { .. }
            | AllocError::MissingConfigError { .. } => ErrorCategory::Config,
            AllocError::SerializationError(_) => ErrorCategory::Output,
            AllocError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AllocError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                ErrorSeverity::High
            }
            AllocError::IoError(_) => ErrorSeverity::Critical,
            AllocError::SerializationError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AllocError::CsvError(_) => {
                "Check that the input is valid UTF-8 CSV with balanced quotes"
                    .to_string()
            }
            AllocError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                "Check that the input file path exists".to_string()
            }
            AllocError::IoError(_) => {
                "Check file permissions and available disk space".to_string()
            }
            AllocError::SerializationError(_) => {
                "Report this as a bug: the summary could not be serialized".to_string()
            }
            AllocError::ConfigError { .. } | AllocError::ConfigValidationError { .. } => {
                "Review the configuration file syntax and values".to_string()
            }
            AllocError::InvalidConfigValueError { field, .. } => {
                format!("Provide a valid value for '{}'", field)
            }
            AllocError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration", field)
            }
            AllocError::MissingColumnError { column, .. } => format!(
                "Rename the header to '{}' or pass the actual column name via configuration",
                column
            ),
            AllocError::InvalidInputError { line, .. } => {
                format!("Fix the input row at line {}", line)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Could not read the team list: {}", self),
            ErrorCategory::Config => format!("Invalid configuration: {}", self),
            ErrorCategory::Output => format!("Could not write the results: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, AllocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_high_severity_input_hint() {
        let err = AllocError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert!(err.recovery_suggestion().contains("input file"));
    }

    #[test]
    fn test_missing_column_is_input_error() {
        let err = AllocError::MissingColumnError {
            column: "Echipa".to_string(),
            available: "Team, Options".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert!(err.user_friendly_message().starts_with("Could not read the team list"));
        assert!(err.to_string().contains("Echipa"));
    }

    #[test]
    fn test_permission_error_is_critical() {
        let err = AllocError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_invalid_row_points_at_line() {
        let err = AllocError::InvalidInputError {
            line: 4,
            message: "found 3 fields, the header has 2".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.recovery_suggestion(), "Fix the input row at line 4");
        assert!(err.to_string().contains("line 4"));
    }
}
