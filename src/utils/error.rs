use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("Failed to load model artifact '{path}': {reason}")]
    ArtifactLoadFailure { path: String, reason: String },

    #[error("Model rejected the aligned input: {reason}")]
    SchemaMismatch { reason: String },

    #[error("No rows submitted for prediction")]
    EmptyInput,

    #[error("Malformed upload: {reason}")]
    MalformedUpload { reason: String },

    #[error("Model output violates the prediction contract: {reason}")]
    InvalidModelOutput { reason: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Artifact,
    Input,
    Model,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PredictorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PredictorError::ArtifactLoadFailure { .. } => ErrorCategory::Artifact,
            PredictorError::SchemaMismatch { .. } | PredictorError::InvalidModelOutput { .. } => {
                ErrorCategory::Model
            }
            PredictorError::EmptyInput
            | PredictorError::MalformedUpload { .. }
            | PredictorError::CsvError(_) => ErrorCategory::Input,
            PredictorError::ConfigError { .. } | PredictorError::ValidationError { .. } => {
                ErrorCategory::Configuration
            }
            PredictorError::IoError(_) | PredictorError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 沒有資料列只是空操作
            PredictorError::EmptyInput => ErrorSeverity::Low,
            PredictorError::MalformedUpload { .. }
            | PredictorError::CsvError(_)
            | PredictorError::ValidationError { .. } => ErrorSeverity::Medium,
            PredictorError::SchemaMismatch { .. }
            | PredictorError::InvalidModelOutput { .. }
            | PredictorError::ConfigError { .. } => ErrorSeverity::High,
            PredictorError::ArtifactLoadFailure { .. }
            | PredictorError::IoError(_)
            | PredictorError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PredictorError::ArtifactLoadFailure { path, .. } => {
                format!("The prediction model at '{}' could not be loaded", path)
            }
            PredictorError::SchemaMismatch { reason } => {
                format!("Prediction failed: the input does not fit the model ({})", reason)
            }
            PredictorError::EmptyInput => {
                "Nothing to predict: the input contains no data rows".to_string()
            }
            PredictorError::MalformedUpload { reason } => {
                format!("The uploaded file could not be read as CSV ({})", reason)
            }
            PredictorError::CsvError(e) => {
                format!("The uploaded file could not be read as CSV ({})", e)
            }
            PredictorError::InvalidModelOutput { .. } => {
                "The model returned an unusable prediction".to_string()
            }
            PredictorError::ValidationError { field, reason, .. } => {
                format!("Invalid input for {}: {}", field, reason)
            }
            PredictorError::ConfigError { message } => format!("Configuration problem: {}", message),
            PredictorError::IoError(e) => format!("File access failed: {}", e),
            PredictorError::SerializationError(e) => format!("Could not encode output: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PredictorError::ArtifactLoadFailure { .. } => {
                "Check that the model file exists and is a valid model artifact"
            }
            PredictorError::SchemaMismatch { .. } => {
                "Provide columns matching the model's training features; retrying the same input will fail again"
            }
            PredictorError::EmptyInput => "Upload a CSV with at least one data row",
            PredictorError::MalformedUpload { .. } | PredictorError::CsvError(_) => {
                "Make sure the file is comma-separated with a single header row"
            }
            PredictorError::InvalidModelOutput { .. } => {
                "The model artifact is likely incompatible with the Awareness/Engagement/Conversion label set"
            }
            PredictorError::ValidationError { .. } => "Correct the highlighted value and submit again",
            PredictorError::ConfigError { .. } => "Review the configuration file or command-line flags",
            PredictorError::IoError(_) => "Check file paths and permissions",
            PredictorError::SerializationError(_) => "Check the input values for unsupported content",
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_low_severity() {
        let err = PredictorError::EmptyInput;
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.category(), ErrorCategory::Input);
    }

    #[test]
    fn test_artifact_failure_is_critical() {
        let err = PredictorError::ArtifactLoadFailure {
            path: "models/missing.json".to_string(),
            reason: "not found".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("models/missing.json"));
    }

    #[test]
    fn test_schema_mismatch_message_carries_reason() {
        let err = PredictorError::SchemaMismatch {
            reason: "X has 2 features, but model is expecting 8 features".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Model);
        assert!(err.to_string().contains("expecting 8 features"));
    }
}
