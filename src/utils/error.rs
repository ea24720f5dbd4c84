use thiserror::Error;

#[derive(Error, Debug)]
pub enum DojoError {
    #[error("Index {index} is out of bounds for a roster of {len} record(s)")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl DojoError {
    pub fn out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            index: i64::try_from(index).unwrap_or(i64::MAX),
            len,
        }
    }

    /// Errors the menu loop reports and then keeps running after.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::IndexOutOfBounds { .. } | Self::IoError(_))
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IndexOutOfBounds { index, len } if *len == 0 => {
                format!("There is no record #{index}: the roster is empty.")
            }
            Self::IndexOutOfBounds { index, len } => format!(
                "There is no record #{index}. Valid indices are 0 to {}.",
                len - 1
            ),
            Self::IoError(e) => format!("Could not access the records file: {e}"),
            Self::ConfigValidationError { field, message } => {
                format!("The configuration is invalid ({field}): {message}")
            }
            Self::InvalidConfigValueError { field, value, reason } => {
                format!("'{value}' is not a valid value for {field}: {reason}")
            }
            Self::MissingConfigError { field } => {
                format!("The configuration is missing '{field}'")
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IndexOutOfBounds { .. } => "Use 'View' to list the current indices, then try again.",
            Self::IoError(_) => "Check that the log path exists and is writable.",
            Self::ConfigValidationError { .. } => "Check the TOML syntax of the configuration file.",
            Self::InvalidConfigValueError { .. } => "Fix the highlighted value in the configuration.",
            Self::MissingConfigError { .. } => "Add the missing field to the configuration.",
        }
    }
}

pub type Result<T> = std::result::Result<T, DojoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_messages() {
        let empty = DojoError::out_of_bounds(0, 0);
        assert!(empty.user_friendly_message().contains("empty"));

        let past_end = DojoError::out_of_bounds(5, 3);
        assert_eq!(
            past_end.user_friendly_message(),
            "There is no record #5. Valid indices are 0 to 2."
        );
        assert!(past_end.is_recoverable());
    }

    #[test]
    fn test_config_errors_are_fatal() {
        let err = DojoError::MissingConfigError {
            field: "storage.log_path".to_string(),
        };
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("storage.log_path"));
    }
}
